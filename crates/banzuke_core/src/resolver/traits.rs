//! Bout traits: named force modifiers a competitor may carry.
//!
//! Deterministic traits fire whenever their condition holds. Probabilistic
//! traits additionally roll against the injected RNG, so they only fire in
//! [`resolve`](super::resolve), never in the pure probability preview.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Attribute, Attributes, Competitor, CompetitorId};
use crate::rank::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoutTrait {
    /// Out-muscles a weaker opponent.
    Heavyweight,
    /// Turns a power-first opponent's momentum against them.
    Technician,
    /// Rises to the occasion against Yokozuna and Ozeki.
    BigStage,
    /// Fights harder against higher-ranked opponents.
    Underdog,
    /// Occasionally pulls off something unexpected.
    Unpredictable,
    /// Digs in when the period is going badly.
    IronWill,
}

impl BoutTrait {
    pub fn all() -> &'static [BoutTrait] {
        &[
            BoutTrait::Heavyweight,
            BoutTrait::Technician,
            BoutTrait::BigStage,
            BoutTrait::Underdog,
            BoutTrait::Unpredictable,
            BoutTrait::IronWill,
        ]
    }

    /// Multiplier applied to the holder's force when the trait fires.
    pub fn factor(self) -> f64 {
        match self {
            BoutTrait::Heavyweight => 1.10,
            BoutTrait::Technician => 1.08,
            BoutTrait::BigStage => 1.12,
            BoutTrait::Underdog => 1.06,
            BoutTrait::Unpredictable => 1.20,
            BoutTrait::IronWill => 1.15,
        }
    }

    /// Firing chance once the condition holds; `None` means always.
    pub fn chance(self) -> Option<f64> {
        match self {
            BoutTrait::Unpredictable => Some(0.25),
            BoutTrait::IronWill => Some(0.30),
            _ => None,
        }
    }

    fn condition_met(self, ctx: &TraitContext<'_>) -> bool {
        match self {
            BoutTrait::Heavyweight => ctx.holder_attrs.power > ctx.opponent_attrs.power,
            BoutTrait::Technician => ctx.opponent_attrs.dominant() == Attribute::Power,
            BoutTrait::BigStage => ctx.opponent.tier.is_top_two(),
            BoutTrait::Underdog => {
                ctx.rules.rank_value(ctx.opponent.tier) > ctx.rules.rank_value(ctx.holder.tier)
            }
            BoutTrait::Unpredictable => true,
            BoutTrait::IronWill => ctx.holder.record.is_losing(),
        }
    }
}

/// A trait that fired during one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredTrait {
    pub competitor: CompetitorId,
    pub bout_trait: BoutTrait,
    pub factor: f64,
}

struct TraitContext<'a> {
    holder: &'a Competitor,
    opponent: &'a Competitor,
    holder_attrs: Attributes,
    opponent_attrs: Attributes,
    rules: &'a RuleSet,
}

/// Apply the holder's traits to `force`.
///
/// With `rng == None` probabilistic traits are skipped. Each distinct trait is
/// applied at most once, in list order.
pub(crate) fn apply_traits(
    holder: &Competitor,
    opponent: &Competitor,
    rules: &RuleSet,
    mut force: f64,
    mut rng: Option<&mut dyn rand::RngCore>,
    triggered: &mut Vec<TriggeredTrait>,
) -> f64 {
    let ctx = TraitContext {
        holder,
        opponent,
        holder_attrs: holder.effective_attributes(),
        opponent_attrs: opponent.effective_attributes(),
        rules,
    };

    for (i, &bout_trait) in holder.traits.iter().enumerate() {
        if holder.traits[..i].contains(&bout_trait) {
            continue;
        }
        if !bout_trait.condition_met(&ctx) {
            continue;
        }
        let fires = match (bout_trait.chance(), rng.as_deref_mut()) {
            (None, _) => true,
            (Some(chance), Some(rng)) => rng.gen::<f64>() < chance,
            (Some(_), None) => false,
        };
        if fires {
            force *= bout_trait.factor();
            triggered.push(TriggeredTrait {
                competitor: holder.id.clone(),
                bout_trait,
                factor: bout_trait.factor(),
            });
        }
    }
    force
}
