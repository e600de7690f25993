use banzuke_core::{allocate, plan_day, Attributes, Capacity, Competitor, RankSlot, RuleSet, Tier};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Full ladder with every fixed tier at quota and a 200-strong bottom tier.
fn roster(rules: &RuleSet) -> Vec<Competitor> {
    let mut roster = Vec::new();
    let mut n = 0usize;
    for &tier in Tier::all() {
        let count = match rules.capacity(tier) {
            Capacity::Unbounded => 2,
            Capacity::Minimum(k) => k + 1,
            Capacity::Fixed(_) if tier == Tier::bottom() => 200,
            Capacity::Fixed(k) => k,
        };
        for slot in 0..count {
            let rank = RankSlot::from_slot(tier, slot);
            let mut c = Competitor::new(format!("c{:04}", n), format!("stable{:02}", n % 41), tier)
                .with_slot(rank.position, rank.side)
                .with_attributes(Attributes::new(
                    (35 + n * 7 % 60) as u8,
                    (35 + n * 11 % 60) as u8,
                    (35 + n * 13 % 60) as u8,
                ));
            let bouts = rules.bouts_for(tier).min(4);
            c.record.wins = (n % (bouts as usize + 1)) as u8;
            c.record.losses = bouts - c.record.wins;
            roster.push(c);
            n += 1;
        }
    }
    roster
}

fn bench_schedule_day(c: &mut Criterion) {
    let rules = RuleSet::standard();
    let roster = roster(&rules);

    c.bench_function("plan_day_early", |b| {
        b.iter(|| plan_day(black_box(&roster), black_box(5), &rules))
    });
    c.bench_function("plan_day_final", |b| {
        b.iter(|| plan_day(black_box(&roster), black_box(15), &rules))
    });
}

fn bench_allocate(c: &mut Criterion) {
    let rules = RuleSet::standard();
    let roster = roster(&rules);

    c.bench_function("allocate_full_roster", |b| {
        b.iter(|| allocate(black_box(&roster), "bench", &rules))
    });
}

criterion_group!(benches, bench_schedule_day, bench_allocate);
criterion_main!(benches);
