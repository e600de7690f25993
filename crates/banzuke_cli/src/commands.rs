//! Subcommand bodies, kept apart from argument parsing so they can be tested.

use anyhow::{bail, Context, Result};
use banzuke_core::{
    allocate_detailed, apply_outcome, period_champion, plan_day, resolve, Allocation, AllocationContext,
    Competitor, DaySchedule, RuleSet,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Everything one simulated period produced.
#[derive(Debug, Serialize)]
pub struct PeriodSummary {
    pub period_id: String,
    pub seed: u64,
    pub bouts: usize,
    pub champion: Option<String>,
    /// Each day's card with winners filled in.
    pub days: Vec<DaySchedule>,
    pub allocation: Allocation,
}

pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => RuleSet::load(path).with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(RuleSet::standard()),
    }
}

pub fn read_roster(path: &Path) -> Result<Vec<Competitor>> {
    let contents = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let roster: Vec<Competitor> =
        serde_json::from_str(&contents).with_context(|| format!("Invalid roster JSON in {}", path.display()))?;

    let mut seen = HashSet::new();
    for c in &roster {
        if !seen.insert(c.id.as_str()) {
            bail!("Duplicate competitor id {} in {}", c.id, path.display());
        }
    }
    debug!(path = %path.display(), competitors = roster.len(), "roster loaded");
    Ok(roster)
}

pub fn allocate(
    roster: &[Competitor],
    period_id: &str,
    rules: &RuleSet,
    current_champion: Option<String>,
    previous_champion: Option<String>,
) -> Allocation {
    let context = AllocationContext::new(current_champion, previous_champion);
    allocate_detailed(roster, period_id, rules, &context)
}

pub fn schedule(roster: &[Competitor], day: u8, rules: &RuleSet) -> Result<DaySchedule> {
    if day == 0 || day > rules.period_days {
        bail!("Day {} is outside the period (1..={})", day, rules.period_days);
    }
    Ok(plan_day(roster, day, rules))
}

/// Run every day of a period, then allocate the next banzuke with the
/// period's champion.
pub fn simulate(
    mut roster: Vec<Competitor>,
    period_id: &str,
    seed: u64,
    previous_champion: Option<String>,
    rules: &RuleSet,
) -> Result<PeriodSummary> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut days = Vec::with_capacity(rules.period_days as usize);
    let mut bouts = 0;

    for day in 1..=rules.period_days {
        let mut schedule = plan_day(&roster, day, rules);
        for pairing in schedule.pairings.iter_mut() {
            let east = roster
                .iter()
                .find(|c| c.id == pairing.east)
                .cloned()
                .with_context(|| format!("Scheduled competitor {} not in roster", pairing.east))?;
            let west = roster
                .iter()
                .find(|c| c.id == pairing.west)
                .cloned()
                .with_context(|| format!("Scheduled competitor {} not in roster", pairing.west))?;

            let outcome = resolve(&east, &west, rules, &mut rng);
            if apply_outcome(&mut roster, pairing, &outcome) {
                bouts += 1;
            }
        }
        debug!(day, bouts = schedule.pairings.len(), byes = schedule.byes.len(), "day complete");
        days.push(schedule);
    }

    let champion = period_champion(&roster);
    info!(period_id, bouts, champion = champion.as_deref().unwrap_or("-"), "period simulated");

    let allocation = allocate(&roster, period_id, rules, champion.clone(), previous_champion);
    Ok(PeriodSummary { period_id: period_id.to_string(), seed, bouts, champion, days, allocation })
}

pub fn write_json<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    write_text(out, &json)
}

pub fn write_text(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
