//! Pairing strategy abstraction and the registry that maps scheduling
//! brackets to strategies.

use fxhash::FxHashMap;

use crate::models::{Competitor, Pairing};
use crate::rank::{Bracket, RuleSet};
use crate::scheduler::sekitori::SekitoriStrategy;
use crate::scheduler::swiss::SwissStrategy;

/// One way of pairing a bracket for a day.
pub trait PairingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `competitor` should be offered a bout on `day`. Injury and
    /// debut status are filtered before this is called.
    fn is_eligible(&self, competitor: &Competitor, day: u8, rules: &RuleSet) -> bool;

    /// Pair an eligible pool. Competitors left out of every pairing have a
    /// bye for the day.
    fn generate(&self, pool: &[&Competitor], day: u8, rules: &RuleSet) -> Vec<Pairing>;
}

/// Strategy per bracket.
pub struct StrategyRegistry {
    strategies: FxHashMap<Bracket, Box<dyn PairingStrategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self { strategies: FxHashMap::default() }
    }

    /// Combined salaried pool plus swiss pairing for each lower division.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Bracket::Sekitori, Box::new(SekitoriStrategy));
        registry.register(Bracket::Makushita, Box::new(SwissStrategy));
        registry.register(Bracket::Sandanme, Box::new(SwissStrategy));
        registry
    }

    /// Install `strategy` for `bracket`, replacing any previous one.
    pub fn register(&mut self, bracket: Bracket, strategy: Box<dyn PairingStrategy>) {
        self.strategies.insert(bracket, strategy);
    }

    pub fn get(&self, bracket: Bracket) -> Option<&dyn PairingStrategy> {
        self.strategies.get(&bracket).map(|s| s.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_every_bracket() {
        let registry = StrategyRegistry::standard();
        for &bracket in Bracket::all() {
            assert!(registry.get(bracket).is_some(), "{:?}", bracket);
        }
        assert_eq!(registry.get(Bracket::Sekitori).map(|s| s.name()), Some("sekitori"));
        assert_eq!(registry.get(Bracket::Sandanme).map(|s| s.name()), Some("swiss"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = StrategyRegistry::empty();
        assert!(registry.get(Bracket::Makushita).is_none());
        registry.register(Bracket::Makushita, Box::new(SekitoriStrategy));
        assert_eq!(registry.get(Bracket::Makushita).map(|s| s.name()), Some("sekitori"));
    }
}
