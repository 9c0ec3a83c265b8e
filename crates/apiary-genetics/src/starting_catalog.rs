//! Default allele catalog, species templates, and mutation table.
//!
//! Registers the stock trait alleles (speed, lifespan, fertility,
//! flowering, tolerances, flags, territories, flowers, effects), fifteen
//! species in three branches, one template per species, and the mutation
//! tree that connects them.

use std::sync::Arc;

use apiary_types::{AlleleUid, ChromosomeType, Humidity, Temperature, Tolerance};

use crate::allele::{
    Allele, AlleleValue, EffectTraits, FlowerProvider, Jubilance, SpeciesTraits, Territory,
};
use crate::error::GeneticsError;
use crate::mutation::{MutationBuilder, MutationRegistry};
use crate::registry::{AlleleRegistry, Template};

// ---------------------------------------------------------------------------
// Species uids
// ---------------------------------------------------------------------------

/// Forest species.
pub const FOREST: &str = "apiary.speciesForest";
/// Meadows species.
pub const MEADOWS: &str = "apiary.speciesMeadows";
/// Modest species.
pub const MODEST: &str = "apiary.speciesModest";
/// Tropical species.
pub const TROPICAL: &str = "apiary.speciesTropical";
/// Wintry species.
pub const WINTRY: &str = "apiary.speciesWintry";
/// Marshy species.
pub const MARSHY: &str = "apiary.speciesMarshy";
/// Common species.
pub const COMMON: &str = "apiary.speciesCommon";
/// Cultivated species.
pub const CULTIVATED: &str = "apiary.speciesCultivated";
/// Noble species.
pub const NOBLE: &str = "apiary.speciesNoble";
/// Majestic species.
pub const MAJESTIC: &str = "apiary.speciesMajestic";
/// Imperial species.
pub const IMPERIAL: &str = "apiary.speciesImperial";
/// Diligent species.
pub const DILIGENT: &str = "apiary.speciesDiligent";
/// Unweary species.
pub const UNWEARY: &str = "apiary.speciesUnweary";
/// Industrious species.
pub const INDUSTRIOUS: &str = "apiary.speciesIndustrious";
/// Icy species.
pub const ICY: &str = "apiary.speciesIcy";

/// Every stock species uid, in registration order.
pub const ALL_SPECIES: [&str; 15] = [
    FOREST,
    MEADOWS,
    MODEST,
    TROPICAL,
    WINTRY,
    MARSHY,
    COMMON,
    CULTIVATED,
    NOBLE,
    MAJESTIC,
    IMPERIAL,
    DILIGENT,
    UNWEARY,
    INDUSTRIOUS,
    ICY,
];

/// The populated registries.
#[derive(Debug, Clone)]
pub struct StartingCatalog {
    /// Stock alleles and species templates.
    pub alleles: AlleleRegistry,
    /// Stock mutation table.
    pub mutations: MutationRegistry,
}

/// Build the stock catalog.
///
/// # Errors
///
/// Returns [`GeneticsError`] if the hard-coded data is inconsistent
/// (a duplicate uid or a template naming an unregistered allele).
pub fn create_starting_catalog() -> Result<StartingCatalog, GeneticsError> {
    let mut alleles = AlleleRegistry::new();
    register_trait_alleles(&mut alleles)?;
    register_species(&mut alleles)?;
    register_templates(&mut alleles)?;
    let mutations = create_mutations(&alleles)?;
    Ok(StartingCatalog { alleles, mutations })
}

// ---------------------------------------------------------------------------
// Trait alleles
// ---------------------------------------------------------------------------

fn register_trait_alleles(registry: &mut AlleleRegistry) -> Result<(), GeneticsError> {
    let speeds = [
        ("apiary.speedSlowest", "Slowest", true, 0.3),
        ("apiary.speedSlower", "Slower", true, 0.6),
        ("apiary.speedSlow", "Slow", true, 0.8),
        ("apiary.speedNorm", "Normal", false, 1.0),
        ("apiary.speedFast", "Fast", true, 1.2),
        ("apiary.speedFaster", "Faster", false, 1.4),
        ("apiary.speedFastest", "Fastest", false, 1.7),
    ];
    for (uid, name, dominant, value) in speeds {
        registry.register(Allele::new(uid, name, dominant, AlleleValue::Float(value)))?;
    }

    let integers = [
        ("apiary.lifespanShortest", "Shortest", true, 10),
        ("apiary.lifespanShorter", "Shorter", true, 20),
        ("apiary.lifespanShort", "Short", true, 30),
        ("apiary.lifespanNormal", "Normal", true, 40),
        ("apiary.lifespanLong", "Long", false, 50),
        ("apiary.lifespanLonger", "Longer", false, 60),
        ("apiary.lifespanLongest", "Longest", false, 70),
        ("apiary.fertilityLow", "Low", true, 1),
        ("apiary.fertilityNormal", "Normal", true, 2),
        ("apiary.fertilityHigh", "High", false, 3),
        ("apiary.fertilityMaximum", "Maximum", false, 4),
        ("apiary.floweringSlowest", "Slowest", true, 5),
        ("apiary.floweringSlower", "Slower", true, 10),
        ("apiary.floweringSlow", "Slow", true, 15),
        ("apiary.floweringAverage", "Average", true, 20),
        ("apiary.floweringFast", "Fast", true, 25),
        ("apiary.floweringFaster", "Faster", true, 30),
        ("apiary.floweringFastest", "Fastest", true, 35),
        ("apiary.floweringMaximum", "Maximum", false, 99),
    ];
    for (uid, name, dominant, value) in integers {
        registry.register(Allele::new(uid, name, dominant, AlleleValue::Integer(value)))?;
    }

    let tolerances = [
        ("apiary.toleranceNone", "None", false, Tolerance::None),
        ("apiary.toleranceBoth1", "Both 1", true, Tolerance::Both(1)),
        ("apiary.toleranceBoth2", "Both 2", true, Tolerance::Both(2)),
        ("apiary.toleranceUp1", "Up 1", true, Tolerance::Up(1)),
        ("apiary.toleranceUp2", "Up 2", true, Tolerance::Up(2)),
        ("apiary.toleranceDown1", "Down 1", true, Tolerance::Down(1)),
        ("apiary.toleranceDown2", "Down 2", true, Tolerance::Down(2)),
    ];
    for (uid, name, dominant, value) in tolerances {
        registry.register(Allele::new(uid, name, dominant, AlleleValue::Tolerance(value)))?;
    }

    registry.register(Allele::new("apiary.boolTrue", "Yes", false, AlleleValue::Boolean(true)))?;
    registry.register(Allele::new("apiary.boolFalse", "No", false, AlleleValue::Boolean(false)))?;

    let territories = [
        ("apiary.territoryAverage", "Average", false, Territory::new(9, 6, 9)),
        ("apiary.territoryLarge", "Large", false, Territory::new(11, 8, 11)),
        ("apiary.territoryLarger", "Larger", false, Territory::new(13, 12, 13)),
        ("apiary.territoryLargest", "Largest", false, Territory::new(15, 13, 15)),
    ];
    for (uid, name, dominant, value) in territories {
        registry.register(Allele::new(uid, name, dominant, AlleleValue::Area(value)))?;
    }

    let flowers = [
        ("apiary.flowersVanilla", "Flowers", true, "flowers", &["plains", "forest", "meadow"][..]),
        ("apiary.flowersSnow", "Snow Flowers", true, "snow_flowers", &["taiga", "tundra"][..]),
        ("apiary.flowersJungle", "Jungle", false, "jungle", &["jungle", "forest"][..]),
        ("apiary.flowersCacti", "Cacti", false, "cacti", &["desert"][..]),
    ];
    for (uid, name, dominant, flower_type, plants) in flowers {
        registry.register(Allele::new(
            uid,
            name,
            dominant,
            AlleleValue::FlowerProvider(FlowerProvider::new(flower_type, plants)),
        ))?;
    }

    let effects = [
        ("apiary.effectNone", "None", true, false),
        ("apiary.effectAggressive", "Aggressive", true, true),
        ("apiary.effectHeroic", "Heroic", true, true),
        ("apiary.effectBeatific", "Beatific", false, true),
        ("apiary.effectGlacial", "Glacial", false, false),
    ];
    for (uid, name, dominant, combinable) in effects {
        registry.register(Allele::new(
            uid,
            name,
            dominant,
            AlleleValue::Effect(EffectTraits { combinable }),
        ))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_lines)]
fn register_species(registry: &mut AlleleRegistry) -> Result<(), GeneticsError> {
    use Humidity as H;
    use Temperature as T;

    let species = [
        // --- Common branch ---
        (FOREST, "Forest", true,
            SpeciesTraits::new("Apis silvestris", T::Normal, H::Normal)
                .with_product("comb.honey", 1, 0.30)),
        (MEADOWS, "Meadows", true,
            SpeciesTraits::new("Apis pratorum", T::Normal, H::Normal)
                .with_product("comb.honey", 1, 0.30)),
        (MODEST, "Modest", false,
            SpeciesTraits::new("Apis modesta", T::Hot, H::Arid)
                .with_product("comb.parched", 1, 0.20)),
        (TROPICAL, "Tropical", false,
            SpeciesTraits::new("Apis fimbriata", T::Warm, H::Damp)
                .with_product("comb.silky", 1, 0.20)),
        (WINTRY, "Wintry", false,
            SpeciesTraits::new("Apis superborea", T::Icy, H::Normal)
                .with_product("comb.frozen", 1, 0.30)),
        (MARSHY, "Marshy", true,
            SpeciesTraits::new("Apis paludis", T::Normal, H::Damp)
                .with_product("comb.mossy", 1, 0.30)),
        (COMMON, "Common", true,
            SpeciesTraits::new("Apis communis", T::Normal, H::Normal)
                .with_product("comb.honey", 1, 0.35)),
        (CULTIVATED, "Cultivated", true,
            SpeciesTraits::new("Apis culta", T::Normal, H::Normal)
                .with_product("comb.honey", 1, 0.40)),
        // --- Noble branch ---
        (NOBLE, "Noble", false,
            SpeciesTraits::new("Apis nobilis", T::Normal, H::Normal)
                .with_product("comb.dripping", 1, 0.20)),
        (MAJESTIC, "Majestic", true,
            SpeciesTraits::new("Apis admirabilis", T::Normal, H::Normal)
                .with_product("comb.dripping", 1, 0.30)),
        (IMPERIAL, "Imperial", false,
            SpeciesTraits::new("Apis imperialis", T::Normal, H::Normal)
                .with_product("comb.dripping", 1, 0.20)
                .with_specialty("royal_jelly", 1, 0.15)
                .with_jubilance(Jubilance::PreferredClimate)),
        // --- Industrious branch ---
        (DILIGENT, "Diligent", false,
            SpeciesTraits::new("Apis sedula", T::Normal, H::Normal)
                .with_product("comb.stringy", 1, 0.20)),
        (UNWEARY, "Unweary", true,
            SpeciesTraits::new("Apis assidua", T::Normal, H::Normal)
                .with_product("comb.stringy", 1, 0.30)),
        (INDUSTRIOUS, "Industrious", false,
            SpeciesTraits::new("Apis industria", T::Normal, H::Normal)
                .with_product("comb.stringy", 1, 0.20)
                .with_specialty("pollen.normal", 1, 0.15)),
        (ICY, "Icy", true,
            SpeciesTraits::new("Apis glacialis", T::Icy, H::Normal)
                .with_product("comb.frozen", 1, 0.20)
                .with_specialty("pollen.crystalline", 1, 0.20)
                .with_jubilance(Jubilance::PreferredClimate)),
    ];

    for (uid, name, dominant, traits) in species {
        registry.register(Allele::species(uid, name, dominant, traits))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Alleles every template starts from before per-species overrides.
const DEFAULT_TEMPLATE: [(ChromosomeType, &str); 12] = [
    (ChromosomeType::Speed, "apiary.speedSlowest"),
    (ChromosomeType::Lifespan, "apiary.lifespanShorter"),
    (ChromosomeType::Fertility, "apiary.fertilityNormal"),
    (ChromosomeType::TemperatureTolerance, "apiary.toleranceNone"),
    (ChromosomeType::Nocturnal, "apiary.boolFalse"),
    (ChromosomeType::HumidityTolerance, "apiary.toleranceNone"),
    (ChromosomeType::TolerantFlyer, "apiary.boolFalse"),
    (ChromosomeType::CaveDwelling, "apiary.boolFalse"),
    (ChromosomeType::FlowerProvider, "apiary.flowersVanilla"),
    (ChromosomeType::Flowering, "apiary.floweringSlowest"),
    (ChromosomeType::Territory, "apiary.territoryAverage"),
    (ChromosomeType::Effect, "apiary.effectNone"),
];

fn allele(registry: &AlleleRegistry, uid: &str) -> Result<Arc<Allele>, GeneticsError> {
    registry.get(&AlleleUid::new(uid))
}

fn template(
    registry: &AlleleRegistry,
    species: &str,
    overrides: &[(ChromosomeType, &str)],
) -> Result<Template, GeneticsError> {
    let mut builder = Template::builder(allele(registry, species)?);
    for (ty, uid) in DEFAULT_TEMPLATE.iter().chain(overrides) {
        builder = builder.with(*ty, allele(registry, uid)?);
    }
    builder.build()
}

fn register_templates(registry: &mut AlleleRegistry) -> Result<(), GeneticsError> {
    use ChromosomeType as C;

    let overrides: [(&str, &[(ChromosomeType, &str)]); 15] = [
        (FOREST, &[(C::Fertility, "apiary.fertilityHigh")]),
        (MEADOWS, &[]),
        (MODEST, &[(C::FlowerProvider, "apiary.flowersCacti")]),
        (TROPICAL, &[
            (C::FlowerProvider, "apiary.flowersJungle"),
            (C::Effect, "apiary.effectAggressive"),
        ]),
        (WINTRY, &[
            (C::TemperatureTolerance, "apiary.toleranceUp1"),
            (C::FlowerProvider, "apiary.flowersSnow"),
            (C::Flowering, "apiary.floweringAverage"),
        ]),
        (MARSHY, &[(C::HumidityTolerance, "apiary.toleranceBoth1")]),
        (COMMON, &[(C::Speed, "apiary.speedSlower")]),
        (CULTIVATED, &[
            (C::Speed, "apiary.speedFast"),
            (C::Lifespan, "apiary.lifespanShortest"),
        ]),
        (NOBLE, &[
            (C::Speed, "apiary.speedSlower"),
            (C::Lifespan, "apiary.lifespanShort"),
        ]),
        (MAJESTIC, &[
            (C::Speed, "apiary.speedNorm"),
            (C::Fertility, "apiary.fertilityMaximum"),
            (C::Flowering, "apiary.floweringFast"),
        ]),
        (IMPERIAL, &[
            (C::Lifespan, "apiary.lifespanNormal"),
            (C::Flowering, "apiary.floweringSlower"),
            (C::Effect, "apiary.effectBeatific"),
        ]),
        (DILIGENT, &[
            (C::Speed, "apiary.speedSlower"),
            (C::Lifespan, "apiary.lifespanShort"),
        ]),
        (UNWEARY, &[(C::Speed, "apiary.speedNorm")]),
        (INDUSTRIOUS, &[
            (C::Lifespan, "apiary.lifespanNormal"),
            (C::Flowering, "apiary.floweringFast"),
        ]),
        (ICY, &[
            (C::TemperatureTolerance, "apiary.toleranceUp1"),
            (C::CaveDwelling, "apiary.boolTrue"),
            (C::FlowerProvider, "apiary.flowersSnow"),
            (C::Effect, "apiary.effectGlacial"),
        ]),
    ];

    for (species, extra) in overrides {
        let built = template(registry, species, extra)?;
        registry.register_template(built)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

fn mutation(
    registry: &AlleleRegistry,
    parent0: &str,
    parent1: &str,
    result: &str,
    chance: f32,
) -> Result<MutationBuilder, GeneticsError> {
    let result_template = registry.template(&AlleleUid::new(result))?.clone();
    MutationBuilder::new(
        &allele(registry, parent0)?,
        &allele(registry, parent1)?,
        result_template,
        chance,
    )
}

fn create_mutations(registry: &AlleleRegistry) -> Result<MutationRegistry, GeneticsError> {
    let mut table = MutationRegistry::new();

    // Every wild species crossed with another wild species gives Common.
    let wild = [FOREST, MEADOWS, MODEST, TROPICAL, WINTRY, MARSHY];
    for (i, first) in wild.iter().enumerate() {
        for second in wild.iter().skip(i.saturating_add(1)) {
            table.register(mutation(registry, first, second, COMMON, 15.0)?.build())?;
        }
    }

    for parent in wild {
        table.register(mutation(registry, COMMON, parent, CULTIVATED, 12.0)?.build())?;
    }

    // Common + Cultivated has two outcomes; Noble is tried first.
    table.register(mutation(registry, COMMON, CULTIVATED, NOBLE, 10.0)?.build())?;
    table.register(mutation(registry, COMMON, CULTIVATED, DILIGENT, 10.0)?.build())?;

    table.register(mutation(registry, NOBLE, CULTIVATED, MAJESTIC, 8.0)?.build())?;
    table.register(mutation(registry, NOBLE, MAJESTIC, IMPERIAL, 8.0)?.secret().build())?;
    table.register(mutation(registry, DILIGENT, CULTIVATED, UNWEARY, 8.0)?.build())?;
    table.register(mutation(registry, DILIGENT, UNWEARY, INDUSTRIOUS, 8.0)?.build())?;
    table.register(
        mutation(registry, INDUSTRIOUS, WINTRY, ICY, 10.0)?
            .restrict_temperature(Temperature::Icy, Temperature::Cold)
            .build(),
    )?;

    Ok(table)
}
