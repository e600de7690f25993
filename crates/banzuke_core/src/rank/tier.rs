//! Tier ladder, sides and divisions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Tier
// ============================================================================

/// Rank tiers, highest first. `Ord` follows declaration order, so a *smaller*
/// value is the *higher* rank (`Tier::Yokozuna < Tier::Ozeki`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Yokozuna,
    Ozeki,
    Sekiwake,
    Komusubi,
    Maegashira,
    Juryo,
    Makushita,
    Sandanme,
}

impl Tier {
    /// All tiers, highest first.
    pub fn all() -> &'static [Tier] {
        &[
            Tier::Yokozuna,
            Tier::Ozeki,
            Tier::Sekiwake,
            Tier::Komusubi,
            Tier::Maegashira,
            Tier::Juryo,
            Tier::Makushita,
            Tier::Sandanme,
        ]
    }

    /// Zero-based index from the top of the ladder.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn top() -> Tier {
        Tier::Yokozuna
    }

    pub fn bottom() -> Tier {
        Tier::Sandanme
    }

    /// True if `self` ranks strictly above `other`.
    pub fn is_above(self, other: Tier) -> bool {
        self < other
    }

    /// The tier directly above, `None` for the top tier.
    pub fn promoted(self) -> Option<Tier> {
        self.ordinal().checked_sub(1).map(|i| Tier::all()[i])
    }

    /// The tier directly below, `None` for the bottom tier.
    pub fn demoted(self) -> Option<Tier> {
        Tier::all().get(self.ordinal() + 1).copied()
    }

    pub fn division(self) -> Division {
        match self {
            Tier::Yokozuna | Tier::Ozeki | Tier::Sekiwake | Tier::Komusubi | Tier::Maegashira => {
                Division::Makuuchi
            }
            Tier::Juryo => Division::Juryo,
            Tier::Makushita => Division::Makushita,
            Tier::Sandanme => Division::Sandanme,
        }
    }

    /// Yokozuna and Ozeki. Bouts between two of them are held back until the
    /// final days of a period.
    pub fn is_top_two(self) -> bool {
        matches!(self, Tier::Yokozuna | Tier::Ozeki)
    }

    /// Salaried tiers (top division plus Juryo).
    pub fn is_sekitori(self) -> bool {
        self.division().is_salaried()
    }

    /// Scheduling bracket this tier is paired in.
    pub fn bracket(self) -> Bracket {
        match self.division() {
            Division::Makuuchi | Division::Juryo => Bracket::Sekitori,
            Division::Makushita => Bracket::Makushita,
            Division::Sandanme => Bracket::Sandanme,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Tier::Yokozuna => "Y",
            Tier::Ozeki => "O",
            Tier::Sekiwake => "S",
            Tier::Komusubi => "K",
            Tier::Maegashira => "M",
            Tier::Juryo => "J",
            Tier::Makushita => "Ms",
            Tier::Sandanme => "Sd",
        }
    }
}

// ============================================================================
// Side
// ============================================================================

/// Cosmetic parity slot within a rank. East is the senior side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Side {
    #[default]
    East,
    West,
}

impl Side {
    /// Side for a zero-based slot inside a tier.
    pub fn for_slot(slot: usize) -> Side {
        if slot % 2 == 0 {
            Side::East
        } else {
            Side::West
        }
    }

    pub fn letter(self) -> char {
        match self {
            Side::East => 'e',
            Side::West => 'w',
        }
    }
}

/// Position (1-based) for a zero-based slot inside a tier.
pub fn position_for_slot(slot: usize) -> u16 {
    (slot / 2 + 1) as u16
}

// ============================================================================
// Division / Bracket
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    Makuuchi,
    Juryo,
    Makushita,
    Sandanme,
}

impl Division {
    pub fn is_salaried(self) -> bool {
        matches!(self, Division::Makuuchi | Division::Juryo)
    }
}

/// Pools the daily scheduler builds. All salaried tiers are paired together;
/// each lower division is paired on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bracket {
    Sekitori,
    Makushita,
    Sandanme,
}

impl Bracket {
    pub fn all() -> &'static [Bracket] {
        &[Bracket::Sekitori, Bracket::Makushita, Bracket::Sandanme]
    }
}

// ============================================================================
// RankSlot
// ============================================================================

/// Full rank designation: tier, position and side. Orders from highest rank
/// (Yokozuna 1 East) to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankSlot {
    pub tier: Tier,
    pub position: u16,
    pub side: Side,
}

impl RankSlot {
    pub fn new(tier: Tier, position: u16, side: Side) -> Self {
        Self { tier, position, side }
    }

    /// Slot for the `slot`-th (zero-based) entry of a tier.
    pub fn from_slot(tier: Tier, slot: usize) -> Self {
        Self::new(tier, position_for_slot(slot), Side::for_slot(slot))
    }

    /// Display label such as `M4w`.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.tier.short_name(), self.position, self.side.letter())
    }
}

impl Ord for RankSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then(self.position.cmp(&other.position))
            .then(self.side.cmp(&other.side))
    }
}

impl PartialOrd for RankSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_is_highest_first() {
        assert!(Tier::Yokozuna.is_above(Tier::Ozeki));
        assert!(Tier::Juryo.is_above(Tier::Makushita));
        assert!(!Tier::Sandanme.is_above(Tier::Sandanme));
        assert_eq!(Tier::all().len(), 8);
    }

    #[test]
    fn test_promoted_and_demoted() {
        assert_eq!(Tier::Yokozuna.promoted(), None);
        assert_eq!(Tier::Ozeki.promoted(), Some(Tier::Yokozuna));
        assert_eq!(Tier::Ozeki.demoted(), Some(Tier::Sekiwake));
        assert_eq!(Tier::Sandanme.demoted(), None);
    }

    #[test]
    fn test_brackets() {
        assert_eq!(Tier::Yokozuna.bracket(), Bracket::Sekitori);
        assert_eq!(Tier::Juryo.bracket(), Bracket::Sekitori);
        assert_eq!(Tier::Makushita.bracket(), Bracket::Makushita);
        assert_eq!(Tier::Sandanme.bracket(), Bracket::Sandanme);
        assert!(Tier::Juryo.is_sekitori());
        assert!(!Tier::Makushita.is_sekitori());
    }

    #[test]
    fn test_slot_alternation() {
        let slots: Vec<String> = (0..5).map(|s| RankSlot::from_slot(Tier::Maegashira, s).label()).collect();
        assert_eq!(slots, vec!["M1e", "M1w", "M2e", "M2w", "M3e"]);
    }

    #[test]
    fn test_rank_slot_ordering() {
        let a = RankSlot::new(Tier::Ozeki, 1, Side::West);
        let b = RankSlot::new(Tier::Ozeki, 2, Side::East);
        let c = RankSlot::new(Tier::Sekiwake, 1, Side::East);
        assert!(a < b);
        assert!(b < c);
    }
}
