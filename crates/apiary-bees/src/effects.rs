//! Hive effects.
//!
//! A genome's active effect allele always runs. The inactive one runs as
//! well only when both effects are combinable. What an effect does to the
//! world is up to the host's [`EffectHandler`]; this module only decides
//! which effects run and keeps their per-housing state.

use std::collections::BTreeMap;
use std::sync::Arc;

use apiary_genetics::{Allele, Genome};
use apiary_types::ChromosomeType;
use rand::RngCore;

use crate::pollination::TerritoryBox;

/// Scratch state an effect keeps between runs in one housing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectData {
    values: BTreeMap<String, i64>,
}

impl EffectData {
    /// A stored value, zero when unset.
    pub fn get(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    /// Add to a stored value and return the new total.
    pub fn increment(&mut self, key: &str) -> i64 {
        let entry = self.values.entry(key.to_owned()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}

/// Effect state of a housing: one slot for each effect allele.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiveEffects {
    /// State of the active effect.
    pub primary: EffectData,
    /// State of the inactive effect.
    pub secondary: EffectData,
}

/// Host side of an effect.
pub trait EffectHandler {
    /// Run `effect` over `area` for a bee with `genome`.
    fn apply(
        &mut self,
        effect: &Allele,
        genome: &Genome,
        data: &mut EffectData,
        area: &TerritoryBox,
        rng: &mut dyn RngCore,
    );
}

/// Run the genome's effects and return the effects that ran, active first.
pub fn do_effect<E>(
    genome: &Genome,
    area: &TerritoryBox,
    handler: &mut E,
    state: &mut HiveEffects,
    rng: &mut dyn RngCore,
) -> Vec<Arc<Allele>>
where
    E: EffectHandler + ?Sized,
{
    let Some(primary) = genome.effect() else {
        return Vec::new();
    };
    handler.apply(primary, genome, &mut state.primary, area, rng);
    let mut ran = vec![Arc::clone(primary)];

    if !is_combinable(primary) {
        return ran;
    }
    let Some(secondary) = genome.inactive_allele(ChromosomeType::Effect) else {
        return ran;
    };
    if is_combinable(secondary) {
        handler.apply(secondary, genome, &mut state.secondary, area, rng);
        ran.push(Arc::clone(secondary));
    }
    ran
}

fn is_combinable(effect: &Allele) -> bool {
    effect.as_effect().is_some_and(|e| e.combinable)
}
