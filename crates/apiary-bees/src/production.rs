//! Production: what a working queen yields in one cycle.
//!
//! Every product entry is rolled independently against `chance × speed`,
//! where speed folds the genome speed with the housing and mode production
//! multipliers. The secondary species contributes at half weight, and
//! specialties roll only while both species are jubilant.

use apiary_genetics::ProductChance;
use apiary_types::ItemStack;
use rand::Rng;

use crate::bee::Bee;
use crate::config::BreedingConfig;
use crate::housing::{BeeHousing, BeeModifier, ModifierStack};
use crate::mode::BeekeepingMode;

/// Roll one production cycle for `queen`.
///
/// An overworked queen loses her natural flag before anything is rolled.
/// The manifest may contain the same item more than once and is passed
/// through the housing's [`BeeHousing::affect_products`] hook when the
/// genome carries a flower provider.
pub fn produce<H>(
    queen: &mut Bee,
    housing: &H,
    mode: &dyn BeekeepingMode,
    config: &BreedingConfig,
    rng: &mut impl Rng,
) -> Vec<ItemStack>
where
    H: BeeHousing + ?Sized,
{
    let stack = ModifierStack::of_housing(housing);

    if mode.is_overworked(queen, &stack, rng) {
        tracing::debug!(species = %queen.genome().primary().uid(), "queen overworked, no longer natural");
        queen.set_is_natural(false);
    }

    let speed = production_speed(queen, &stack, mode);
    let genome = queen.genome();
    let primary = genome.primary_species();
    let secondary = genome.secondary_species();

    let mut products = Vec::new();
    roll_table(&primary.products, rng, &mut products, |chance| chance * speed);
    roll_table(&secondary.products, rng, &mut products, |chance| {
        config.secondary_product_chance.threshold(chance, speed)
    });

    let (temperature, humidity) = (housing.temperature(), housing.humidity());
    if primary.is_jubilant(temperature, humidity) && secondary.is_jubilant(temperature, humidity) {
        roll_table(&primary.specialties, rng, &mut products, |chance| chance * speed);
    }

    match genome.flower_provider() {
        Some(provider) => housing.affect_products(provider, products),
        None => products,
    }
}

/// Genome speed scaled by the housing and mode production multipliers.
pub fn production_speed(queen: &Bee, housing_modifier: &dyn BeeModifier, mode: &dyn BeekeepingMode) -> f32 {
    let genome = queen.genome();
    genome.speed()
        * housing_modifier.production_modifier(genome, 1.0)
        * mode.bee_modifier().production_modifier(genome, 1.0)
}

fn roll_table(
    table: &[ProductChance],
    rng: &mut impl Rng,
    out: &mut Vec<ItemStack>,
    threshold: impl Fn(f32) -> f32,
) {
    for entry in table {
        if rng.random::<f32>() < threshold(entry.chance) {
            out.push(entry.stack());
        }
    }
}
