//! Capabilities the breeding resolvers need from the host.
//!
//! Each resolver asks for the narrowest view it can work with: eligibility
//! reads [`ClimateView`] and [`WorldConditions`], production and breeding
//! read a [`BeeHousing`], and every multiplier comes through
//! [`BeeModifier`]. Hosts implement these traits on whatever holds their
//! world state.

use apiary_genetics::{FlowerProvider, Genome};
use apiary_types::{Humidity, ItemStack, PlayerId, Position, Temperature};

/// Climate classes at a housing.
pub trait ClimateView {
    /// Temperature class at the housing.
    fn temperature(&self) -> Temperature;

    /// Humidity class at the housing.
    fn humidity(&self) -> Humidity;
}

/// World state around a housing.
pub trait WorldConditions {
    /// Whether it is currently day.
    fn is_daytime(&self) -> bool;

    /// Whether it is currently raining in the world.
    fn is_raining(&self) -> bool;

    /// Whether the housing's biome receives rain or snow.
    fn biome_has_precipitation(&self) -> bool;

    /// Block light level at the housing.
    fn light_level(&self) -> u8;

    /// Whether the housing has an unobstructed view of the sky.
    fn can_see_sky(&self) -> bool;

    /// Whether the dimension has a sky at all.
    fn dimension_has_sky(&self) -> bool;
}

/// Multipliers and flags a housing, frame, or mode applies to its bees.
///
/// Every method defaults to the neutral value. `current` is the product of
/// the modifiers already applied, for modifiers that scale relative to it.
pub trait BeeModifier {
    /// Production speed multiplier.
    fn production_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        1.0
    }

    /// Territory multiplier.
    fn territory_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        1.0
    }

    /// Lifespan multiplier; above `1.0` bees live longer.
    fn lifespan_modifier(&self, _genome: &Genome, _mate: Option<&Genome>, _current: f32) -> f32 {
        1.0
    }

    /// Pollination chance multiplier.
    fn flowering_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        1.0
    }

    /// Mutation chance multiplier.
    fn mutation_modifier(&self, _genome: &Genome, _mate: &Genome, _current: f32) -> f32 {
        1.0
    }

    /// Whether the housing lights itself, letting bees work at night.
    fn is_self_lighted(&self) -> bool {
        false
    }

    /// Whether the housing simulates sunlight, letting bees work underground.
    fn is_sunlight_simulated(&self) -> bool {
        false
    }

    /// Whether the housing is sealed against rain.
    fn is_sealed(&self) -> bool {
        false
    }
}

/// A housing holding a queen: climate, world state, position, owner, and
/// the modifiers installed in it.
pub trait BeeHousing: ClimateView + WorldConditions {
    /// Anchor position for territory sampling.
    fn position(&self) -> Position;

    /// Player whose breeding tracker records discoveries; `None` uses the
    /// common tracker.
    fn owner(&self) -> Option<&PlayerId>;

    /// Modifiers installed in the housing (the housing itself, frames).
    fn modifiers(&self) -> Vec<&dyn BeeModifier>;

    /// Beekeeping mode name; `None` uses the configured default.
    fn beekeeping_mode(&self) -> Option<&str> {
        None
    }

    /// Let the flower provider transform the production manifest.
    fn affect_products(&self, _provider: &FlowerProvider, products: Vec<ItemStack>) -> Vec<ItemStack> {
        products
    }
}

// ---------------------------------------------------------------------------
// Plain modifiers
// ---------------------------------------------------------------------------

/// A modifier with fixed multipliers and flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifierSet {
    /// Production speed multiplier.
    pub production: f32,
    /// Territory multiplier.
    pub territory: f32,
    /// Lifespan multiplier.
    pub lifespan: f32,
    /// Pollination chance multiplier.
    pub flowering: f32,
    /// Mutation chance multiplier.
    pub mutation: f32,
    /// Self-lit flag.
    pub self_lighted: bool,
    /// Simulated sunlight flag.
    pub sunlight_simulated: bool,
    /// Sealed flag.
    pub sealed: bool,
}

impl ModifierSet {
    /// All multipliers `1.0`, all flags off.
    pub const NEUTRAL: Self = Self {
        production: 1.0,
        territory: 1.0,
        lifespan: 1.0,
        flowering: 1.0,
        mutation: 1.0,
        self_lighted: false,
        sunlight_simulated: false,
        sealed: false,
    };
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl BeeModifier for ModifierSet {
    fn production_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        self.production
    }

    fn territory_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        self.territory
    }

    fn lifespan_modifier(&self, _genome: &Genome, _mate: Option<&Genome>, _current: f32) -> f32 {
        self.lifespan
    }

    fn flowering_modifier(&self, _genome: &Genome, _current: f32) -> f32 {
        self.flowering
    }

    fn mutation_modifier(&self, _genome: &Genome, _mate: &Genome, _current: f32) -> f32 {
        self.mutation
    }

    fn is_self_lighted(&self) -> bool {
        self.self_lighted
    }

    fn is_sunlight_simulated(&self) -> bool {
        self.sunlight_simulated
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }
}

/// Several modifiers combined: multipliers fold multiplicatively, flags
/// are set when any member sets them.
pub struct ModifierStack<'a> {
    modifiers: Vec<&'a dyn BeeModifier>,
}

impl<'a> ModifierStack<'a> {
    /// Combine the given modifiers.
    pub const fn new(modifiers: Vec<&'a dyn BeeModifier>) -> Self {
        Self { modifiers }
    }

    /// Combine the modifiers installed in a housing.
    pub fn of_housing<H: BeeHousing + ?Sized>(housing: &'a H) -> Self {
        Self::new(housing.modifiers())
    }

    /// Number of combined modifiers.
    pub const fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Whether no modifiers are combined.
    pub const fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    fn fold(&self, current: f32, apply: impl Fn(&dyn BeeModifier, f32) -> f32) -> f32 {
        self.modifiers
            .iter()
            .fold(current, |acc, modifier| acc * apply(*modifier, acc))
    }
}

impl core::fmt::Debug for ModifierStack<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModifierStack")
            .field("modifiers", &self.modifiers.len())
            .finish()
    }
}

impl BeeModifier for ModifierStack<'_> {
    fn production_modifier(&self, genome: &Genome, current: f32) -> f32 {
        self.fold(current, |m, acc| m.production_modifier(genome, acc))
    }

    fn territory_modifier(&self, genome: &Genome, current: f32) -> f32 {
        self.fold(current, |m, acc| m.territory_modifier(genome, acc))
    }

    fn lifespan_modifier(&self, genome: &Genome, mate: Option<&Genome>, current: f32) -> f32 {
        self.fold(current, |m, acc| m.lifespan_modifier(genome, mate, acc))
    }

    fn flowering_modifier(&self, genome: &Genome, current: f32) -> f32 {
        self.fold(current, |m, acc| m.flowering_modifier(genome, acc))
    }

    fn mutation_modifier(&self, genome: &Genome, mate: &Genome, current: f32) -> f32 {
        self.fold(current, |m, acc| m.mutation_modifier(genome, mate, acc))
    }

    fn is_self_lighted(&self) -> bool {
        self.modifiers.iter().any(|m| m.is_self_lighted())
    }

    fn is_sunlight_simulated(&self) -> bool {
        self.modifiers.iter().any(|m| m.is_sunlight_simulated())
    }

    fn is_sealed(&self) -> bool {
        self.modifiers.iter().any(|m| m.is_sealed())
    }
}
