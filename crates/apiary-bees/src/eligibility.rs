//! Whether a genome can work in a housing.
//!
//! [`can_work`] is a pure function of the genome, the housing conditions,
//! the combined housing modifier, and the light threshold. Every check runs
//! on every call, so all blocking conditions are reported together.

use std::collections::BTreeSet;

use apiary_genetics::Genome;
use apiary_genetics::climate::{is_climate_within_limits, is_humidity_within_limits, is_temperature_within_limits};
use apiary_types::{Biome, ErrorState, Humidity, Temperature};

use crate::housing::{BeeModifier, ClimateView, WorldConditions};

/// Blocking conditions for `genome` in the given housing; empty means the
/// bee can work.
pub fn can_work<H>(
    genome: &Genome,
    housing: &H,
    modifier: &dyn BeeModifier,
    light_threshold: u8,
) -> BTreeSet<ErrorState>
where
    H: ClimateView + WorldConditions + ?Sized,
{
    let mut errors = BTreeSet::new();

    // Rain needs tolerant flyers.
    if housing.is_raining() && housing.biome_has_precipitation() && !can_fly_in_rain(genome, modifier)
    {
        errors.insert(ErrorState::IsRaining);
    }

    if housing.is_daytime() {
        if !can_work_during_day(genome) {
            errors.insert(ErrorState::NotNight);
        }
    } else if !can_work_at_night(genome, modifier) {
        errors.insert(ErrorState::NotDay);
    }

    if housing.light_level() > light_threshold {
        if !can_work_during_day(genome) {
            errors.insert(ErrorState::NotGloomy);
        }
    } else if !can_work_at_night(genome, modifier) {
        errors.insert(ErrorState::NotBright);
    }

    // Skyless dimensions never block on sky access.
    if housing.dimension_has_sky()
        && !housing.can_see_sky()
        && !can_work_underground(genome, modifier)
    {
        errors.insert(ErrorState::NoSky);
    }

    let species = genome.primary_species();

    let actual_temperature = housing.temperature();
    if !is_temperature_within_limits(
        actual_temperature,
        species.temperature,
        genome.tolerance_temperature(),
    ) {
        if species.temperature > actual_temperature {
            errors.insert(ErrorState::TooCold);
        } else {
            errors.insert(ErrorState::TooHot);
        }
    }

    let actual_humidity = housing.humidity();
    if !is_humidity_within_limits(actual_humidity, species.humidity, genome.tolerance_humidity()) {
        if species.humidity > actual_humidity {
            errors.insert(ErrorState::TooArid);
        } else {
            errors.insert(ErrorState::TooHumid);
        }
    }

    errors
}

/// Diurnal species always work by day; nocturnal ones only with the
/// nocturnal trait.
pub fn can_work_during_day(genome: &Genome) -> bool {
    !genome.primary_species().nocturnal || genome.nocturnal()
}

/// Nocturnal species, bees with the nocturnal trait, and bees in self-lit
/// housings work at night.
pub fn can_work_at_night(genome: &Genome, modifier: &dyn BeeModifier) -> bool {
    genome.primary_species().nocturnal || genome.nocturnal() || modifier.is_self_lighted()
}

/// Cave dwellers and bees under simulated sunlight work without sky.
pub fn can_work_underground(genome: &Genome, modifier: &dyn BeeModifier) -> bool {
    genome.cave_dwelling() || modifier.is_sunlight_simulated()
}

/// Tolerant flyers and bees in sealed housings work in rain.
pub fn can_fly_in_rain(genome: &Genome, modifier: &dyn BeeModifier) -> bool {
    genome.tolerant_flyer() || modifier.is_sealed()
}

/// Whether the climate suits the primary species given the genome's
/// tolerances.
pub fn is_suitable_climate(genome: &Genome, temperature: Temperature, humidity: Humidity) -> bool {
    let species = genome.primary_species();
    is_climate_within_limits(
        temperature,
        humidity,
        species.temperature,
        genome.tolerance_temperature(),
        species.humidity,
        genome.tolerance_humidity(),
    )
}

/// The biomes whose climate suits the genome, in input order.
pub fn suitable_biomes<'a>(genome: &Genome, biomes: &'a [Biome]) -> Vec<&'a Biome> {
    biomes
        .iter()
        .filter(|b| is_suitable_climate(genome, b.temperature, b.humidity))
        .collect()
}
