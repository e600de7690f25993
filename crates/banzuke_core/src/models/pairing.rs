use serde::{Deserialize, Serialize};

use crate::models::competitor::CompetitorId;
use crate::rank::Division;

/// Marquee markers attached after pairing. They never block a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoutTag {
    /// A Maegashira challenger faces a Yokozuna.
    UpsetOpportunity,
    /// Last salaried bout of the final day.
    ClosingBout,
    /// Both sides are still in the title race.
    TitleContention,
}

/// One scheduled bout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub east: CompetitorId,
    pub west: CompetitorId,
    /// Division of the higher-ranked side.
    pub division: Division,
    pub day: u8,
    #[serde(default)]
    pub winner: Option<CompetitorId>,
    #[serde(default)]
    pub tags: Vec<BoutTag>,
}

impl Pairing {
    pub fn new(east: impl Into<String>, west: impl Into<String>, division: Division, day: u8) -> Self {
        Self {
            east: east.into(),
            west: west.into(),
            division,
            day,
            winner: None,
            tags: Vec::new(),
        }
    }

    pub fn involves(&self, id: &str) -> bool {
        self.east == id || self.west == id
    }

    pub fn opponent_of(&self, id: &str) -> Option<&str> {
        if self.east == id {
            Some(&self.west)
        } else if self.west == id {
            Some(&self.east)
        } else {
            None
        }
    }

    pub fn has_tag(&self, tag: BoutTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn add_tag(&mut self, tag: BoutTag) {
        if !self.has_tag(tag) {
            self.tags.push(tag);
        }
    }

    pub fn loser(&self) -> Option<&str> {
        self.winner.as_deref().and_then(|w| self.opponent_of(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_lookup() {
        let p = Pairing::new("a", "b", Division::Makuuchi, 3);
        assert_eq!(p.opponent_of("a"), Some("b"));
        assert_eq!(p.opponent_of("b"), Some("a"));
        assert_eq!(p.opponent_of("c"), None);
        assert!(p.involves("b"));
    }

    #[test]
    fn test_tags_are_not_duplicated() {
        let mut p = Pairing::new("a", "b", Division::Makuuchi, 15);
        p.add_tag(BoutTag::ClosingBout);
        p.add_tag(BoutTag::ClosingBout);
        assert_eq!(p.tags.len(), 1);
    }

    #[test]
    fn test_loser_follows_winner() {
        let mut p = Pairing::new("a", "b", Division::Juryo, 1);
        assert_eq!(p.loser(), None);
        p.winner = Some("b".to_string());
        assert_eq!(p.loser(), Some("a"));
    }
}
