//! Alleles: named, immutable trait values.
//!
//! An [`Allele`] pairs a stable [`AlleleUid`] and a dominance flag with an
//! [`AlleleValue`]. The value is a sum type with one variant per category,
//! so consumers match on the variant they need instead of downcasting.
//! Alleles live in the [`AlleleRegistry`](crate::registry::AlleleRegistry)
//! and are shared between genomes through `Arc`.

use apiary_types::{AlleleUid, ChromosomeType, Humidity, ItemStack, Temperature, Tolerance};

// ---------------------------------------------------------------------------
// Allele kinds
// ---------------------------------------------------------------------------

/// Category of an allele value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlleleKind {
    /// A bee species.
    Species,
    /// A floating point multiplier (speed).
    Float,
    /// A whole number (lifespan, fertility, flowering).
    Integer,
    /// A yes/no trait (nocturnal, tolerant flyer, cave dwelling).
    Boolean,
    /// A climate tolerance width.
    Tolerance,
    /// Territory dimensions.
    Area,
    /// Flower requirements and pollination behaviour.
    FlowerProvider,
    /// Hive effect.
    Effect,
}

impl AlleleKind {
    /// The kind of allele a genome slot must hold.
    pub const fn for_chromosome(ty: ChromosomeType) -> Self {
        match ty {
            ChromosomeType::Species => Self::Species,
            ChromosomeType::Speed => Self::Float,
            ChromosomeType::Lifespan | ChromosomeType::Fertility | ChromosomeType::Flowering => {
                Self::Integer
            }
            ChromosomeType::TemperatureTolerance | ChromosomeType::HumidityTolerance => {
                Self::Tolerance
            }
            ChromosomeType::Nocturnal
            | ChromosomeType::TolerantFlyer
            | ChromosomeType::CaveDwelling => Self::Boolean,
            ChromosomeType::FlowerProvider => Self::FlowerProvider,
            ChromosomeType::Territory => Self::Area,
            ChromosomeType::Effect => Self::Effect,
        }
    }
}

impl core::fmt::Display for AlleleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// One entry of a species product table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChance {
    /// Item key of the product.
    pub item: String,
    /// Stack size produced on a successful roll.
    pub count: u32,
    /// Base chance per production cycle, in `[0, 1]` for typical products.
    pub chance: f32,
}

impl ProductChance {
    /// Create a product table entry.
    pub fn new(item: impl Into<String>, count: u32, chance: f32) -> Self {
        Self {
            item: item.into(),
            count,
            chance,
        }
    }

    /// A fresh stack of this product.
    pub fn stack(&self) -> ItemStack {
        ItemStack::new(self.item.clone(), self.count)
    }
}

/// When a species is content enough to produce specialties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jubilance {
    /// Always jubilant.
    #[default]
    Always,
    /// Jubilant only when the housing climate equals the species preference.
    PreferredClimate,
    /// Never jubilant; the species has no reachable specialties.
    Never,
}

/// Traits carried by a species allele.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTraits {
    /// Latin display name.
    pub binomial: String,
    /// Preferred temperature class.
    pub temperature: Temperature,
    /// Preferred humidity class.
    pub humidity: Humidity,
    /// Whether the species naturally works at night instead of by day.
    pub nocturnal: bool,
    /// Regular products, rolled in table order.
    pub products: Vec<ProductChance>,
    /// Specialty products, rolled only while jubilant.
    pub specialties: Vec<ProductChance>,
    /// Jubilance rule.
    pub jubilance: Jubilance,
}

/// Species traits reported for a genome whose species slot is unreadable.
pub static UNKNOWN_SPECIES: SpeciesTraits = SpeciesTraits {
    binomial: String::new(),
    temperature: Temperature::Normal,
    humidity: Humidity::Normal,
    nocturnal: false,
    products: Vec::new(),
    specialties: Vec::new(),
    jubilance: Jubilance::Never,
};

impl SpeciesTraits {
    /// Create a diurnal, always-jubilant species with empty product tables.
    pub fn new(binomial: impl Into<String>, temperature: Temperature, humidity: Humidity) -> Self {
        Self {
            binomial: binomial.into(),
            temperature,
            humidity,
            nocturnal: false,
            products: Vec::new(),
            specialties: Vec::new(),
            jubilance: Jubilance::Always,
        }
    }

    /// Add a regular product.
    #[must_use]
    pub fn with_product(mut self, item: impl Into<String>, count: u32, chance: f32) -> Self {
        self.products.push(ProductChance::new(item, count, chance));
        self
    }

    /// Add a specialty product.
    #[must_use]
    pub fn with_specialty(mut self, item: impl Into<String>, count: u32, chance: f32) -> Self {
        self.specialties.push(ProductChance::new(item, count, chance));
        self
    }

    /// Mark the species as nocturnal.
    #[must_use]
    pub const fn nocturnal(mut self) -> Self {
        self.nocturnal = true;
        self
    }

    /// Replace the jubilance rule.
    #[must_use]
    pub const fn with_jubilance(mut self, jubilance: Jubilance) -> Self {
        self.jubilance = jubilance;
        self
    }

    /// Whether the species is jubilant in the given housing climate.
    pub fn is_jubilant(&self, temperature: Temperature, humidity: Humidity) -> bool {
        match self.jubilance {
            Jubilance::Always => true,
            Jubilance::PreferredClimate => {
                temperature == self.temperature && humidity == self.humidity
            }
            Jubilance::Never => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Other categories
// ---------------------------------------------------------------------------

/// Territory dimensions in blocks, before housing and scale multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Territory {
    /// Width.
    pub x: u32,
    /// Height.
    pub y: u32,
    /// Depth.
    pub z: u32,
}

impl Territory {
    /// Create territory dimensions.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Flower requirements of a bee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowerProvider {
    /// Flower type planted and required by the bee.
    pub flower_type: String,
    /// Plant types the bee will pollinate.
    pub accepted_plants: Vec<String>,
}

impl FlowerProvider {
    /// Create a flower provider accepting the given plant types.
    pub fn new(flower_type: impl Into<String>, accepted_plants: &[&str]) -> Self {
        Self {
            flower_type: flower_type.into(),
            accepted_plants: accepted_plants.iter().map(|p| String::from(*p)).collect(),
        }
    }

    /// Whether a plant of the given type can be pollinated by this provider.
    pub fn accepts(&self, plant_type: &str) -> bool {
        self.accepted_plants.iter().any(|p| p == plant_type)
    }
}

/// Traits of a hive effect allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTraits {
    /// Whether the effect can run together with the inactive effect.
    pub combinable: bool,
}

/// The value carried by an allele.
#[derive(Debug, Clone, PartialEq)]
pub enum AlleleValue {
    /// A species.
    Species(SpeciesTraits),
    /// A multiplier.
    Float(f32),
    /// A whole number.
    Integer(u32),
    /// A flag.
    Boolean(bool),
    /// A climate tolerance.
    Tolerance(Tolerance),
    /// Territory dimensions.
    Area(Territory),
    /// Flower requirements.
    FlowerProvider(FlowerProvider),
    /// A hive effect.
    Effect(EffectTraits),
}

impl AlleleValue {
    /// Category of this value.
    pub const fn kind(&self) -> AlleleKind {
        match self {
            Self::Species(_) => AlleleKind::Species,
            Self::Float(_) => AlleleKind::Float,
            Self::Integer(_) => AlleleKind::Integer,
            Self::Boolean(_) => AlleleKind::Boolean,
            Self::Tolerance(_) => AlleleKind::Tolerance,
            Self::Area(_) => AlleleKind::Area,
            Self::FlowerProvider(_) => AlleleKind::FlowerProvider,
            Self::Effect(_) => AlleleKind::Effect,
        }
    }
}

// ---------------------------------------------------------------------------
// Allele
// ---------------------------------------------------------------------------

/// An immutable, named trait value.
///
/// Two alleles are equal when their uids are equal.
#[derive(Debug, Clone)]
pub struct Allele {
    uid: AlleleUid,
    name: String,
    dominant: bool,
    value: AlleleValue,
}

impl PartialEq for Allele {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for Allele {}

impl Allele {
    /// Create an allele.
    pub fn new(
        uid: impl Into<AlleleUid>,
        name: impl Into<String>,
        dominant: bool,
        value: AlleleValue,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            dominant,
            value,
        }
    }

    /// Create a species allele.
    pub fn species(
        uid: impl Into<AlleleUid>,
        name: impl Into<String>,
        dominant: bool,
        traits: SpeciesTraits,
    ) -> Self {
        Self::new(uid, name, dominant, AlleleValue::Species(traits))
    }

    /// Stable identifier.
    pub const fn uid(&self) -> &AlleleUid {
        &self.uid
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this allele wins the active position over a recessive one.
    pub const fn is_dominant(&self) -> bool {
        self.dominant
    }

    /// The carried value.
    pub const fn value(&self) -> &AlleleValue {
        &self.value
    }

    /// Category of the carried value.
    pub const fn kind(&self) -> AlleleKind {
        self.value.kind()
    }

    /// Species traits, if this is a species allele.
    pub const fn as_species(&self) -> Option<&SpeciesTraits> {
        match &self.value {
            AlleleValue::Species(traits) => Some(traits),
            _ => None,
        }
    }

    /// Multiplier, if this is a float allele.
    pub const fn as_float(&self) -> Option<f32> {
        match self.value {
            AlleleValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Whole number, if this is an integer allele.
    pub const fn as_integer(&self) -> Option<u32> {
        match self.value {
            AlleleValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Flag, if this is a boolean allele.
    pub const fn as_boolean(&self) -> Option<bool> {
        match self.value {
            AlleleValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Tolerance, if this is a tolerance allele.
    pub const fn as_tolerance(&self) -> Option<Tolerance> {
        match self.value {
            AlleleValue::Tolerance(v) => Some(v),
            _ => None,
        }
    }

    /// Territory, if this is an area allele.
    pub const fn as_area(&self) -> Option<Territory> {
        match self.value {
            AlleleValue::Area(v) => Some(v),
            _ => None,
        }
    }

    /// Flower provider, if this is a flower provider allele.
    pub const fn as_flower_provider(&self) -> Option<&FlowerProvider> {
        match &self.value {
            AlleleValue::FlowerProvider(provider) => Some(provider),
            _ => None,
        }
    }

    /// Effect traits, if this is an effect allele.
    pub const fn as_effect(&self) -> Option<EffectTraits> {
        match self.value {
            AlleleValue::Effect(traits) => Some(traits),
            _ => None,
        }
    }
}
