//! Bee genomes: a fixed array of trait pairs indexed by [`ChromosomeType`].
//!
//! A genome is immutable once built. Offspring get a new genome; nothing
//! edits an existing one, so the typed accessors read their slot directly
//! without caching.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use apiary_types::{AlleleUid, ChromosomeType, Tolerance};

use crate::allele::{Allele, AlleleKind, FlowerProvider, SpeciesTraits, Territory, UNKNOWN_SPECIES};
use crate::chromosome::Chromosome;
use crate::error::GeneticsError;
use crate::registry::AlleleRegistry;

/// Number of chromosome slots in a genome.
pub const CHROMOSOME_COUNT: usize = ChromosomeType::COUNT;

/// Slot array of a genome; `None` marks an absent pair.
pub type Chromosomes = [Option<Chromosome>; CHROMOSOME_COUNT];

/// Speed reported when the speed slot is absent.
pub const DEFAULT_SPEED: f32 = 1.0;

/// Lifespan reported when the lifespan slot is absent.
pub const DEFAULT_LIFESPAN: u32 = 40;

/// Fertility reported when the fertility slot is absent.
pub const DEFAULT_FERTILITY: u32 = 2;

/// Flowering reported when the flowering slot is absent.
pub const DEFAULT_FLOWERING: u32 = 20;

/// Territory reported when the territory slot is absent.
pub const DEFAULT_TERRITORY: Territory = Territory::new(9, 6, 9);

/// The complete set of trait pairs of one bee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    chromosomes: Chromosomes,
    /// Copy of slot 0, which construction guarantees is present.
    species: Chromosome,
}

impl Genome {
    /// Build a genome from its slot array.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::MissingSpecies`] when the species slot is
    /// empty, and [`GeneticsError::WrongKindForSlot`] when a slot holds an
    /// allele of the wrong category.
    pub fn new(chromosomes: Chromosomes) -> Result<Self, GeneticsError> {
        for ty in ChromosomeType::ALL {
            let Some(chromosome) = chromosomes.get(ty.index()).and_then(Option::as_ref) else {
                continue;
            };
            let expected = AlleleKind::for_chromosome(ty);
            for allele in [chromosome.active(), chromosome.inactive()] {
                if allele.kind() != expected {
                    return Err(GeneticsError::WrongKindForSlot {
                        slot: ty,
                        expected,
                        found: allele.kind(),
                    });
                }
            }
        }

        let species = chromosomes
            .get(ChromosomeType::Species.index())
            .cloned()
            .flatten()
            .ok_or(GeneticsError::MissingSpecies)?;

        Ok(Self {
            chromosomes,
            species,
        })
    }

    /// The raw slot array.
    pub const fn chromosomes(&self) -> &Chromosomes {
        &self.chromosomes
    }

    /// The pair at a slot, if present.
    pub fn chromosome(&self, ty: ChromosomeType) -> Option<&Chromosome> {
        self.chromosomes.get(ty.index()).and_then(Option::as_ref)
    }

    /// Active allele at a slot, if the slot is present.
    pub fn active_allele(&self, ty: ChromosomeType) -> Option<&Arc<Allele>> {
        self.chromosome(ty).map(Chromosome::active)
    }

    /// Inactive allele at a slot, if the slot is present.
    pub fn inactive_allele(&self, ty: ChromosomeType) -> Option<&Arc<Allele>> {
        self.chromosome(ty).map(Chromosome::inactive)
    }

    /// Whether the slot is present and carries the same allele twice.
    pub fn is_pure_bred(&self, ty: ChromosomeType) -> bool {
        self.chromosome(ty).is_some_and(Chromosome::is_pure_bred)
    }

    // -----------------------------------------------------------------------
    // Species
    // -----------------------------------------------------------------------

    /// Active species allele.
    pub const fn primary(&self) -> &Arc<Allele> {
        self.species.active()
    }

    /// Inactive species allele.
    pub const fn secondary(&self) -> &Arc<Allele> {
        self.species.inactive()
    }

    /// Traits of the active species.
    pub fn primary_species(&self) -> &SpeciesTraits {
        self.primary().as_species().unwrap_or(&UNKNOWN_SPECIES)
    }

    /// Traits of the inactive species.
    pub fn secondary_species(&self) -> &SpeciesTraits {
        self.secondary().as_species().unwrap_or(&UNKNOWN_SPECIES)
    }

    // -----------------------------------------------------------------------
    // Typed accessors
    // -----------------------------------------------------------------------

    /// Production speed multiplier.
    pub fn speed(&self) -> f32 {
        self.active_allele(ChromosomeType::Speed)
            .and_then(|a| a.as_float())
            .unwrap_or(DEFAULT_SPEED)
    }

    /// Lifespan in aging cycles.
    pub fn lifespan(&self) -> u32 {
        self.integer(ChromosomeType::Lifespan).unwrap_or(DEFAULT_LIFESPAN)
    }

    /// Base number of drones per brood.
    pub fn fertility(&self) -> u32 {
        self.integer(ChromosomeType::Fertility).unwrap_or(DEFAULT_FERTILITY)
    }

    /// Pollination chance in percent, before modifiers.
    pub fn flowering(&self) -> u32 {
        self.integer(ChromosomeType::Flowering).unwrap_or(DEFAULT_FLOWERING)
    }

    /// Temperature tolerance.
    pub fn tolerance_temperature(&self) -> Tolerance {
        self.tolerance(ChromosomeType::TemperatureTolerance)
    }

    /// Humidity tolerance.
    pub fn tolerance_humidity(&self) -> Tolerance {
        self.tolerance(ChromosomeType::HumidityTolerance)
    }

    /// Whether the bee can work both day and night.
    pub fn nocturnal(&self) -> bool {
        self.boolean(ChromosomeType::Nocturnal)
    }

    /// Whether the bee can fly in rain.
    pub fn tolerant_flyer(&self) -> bool {
        self.boolean(ChromosomeType::TolerantFlyer)
    }

    /// Whether the bee can work without sky access.
    pub fn cave_dwelling(&self) -> bool {
        self.boolean(ChromosomeType::CaveDwelling)
    }

    /// Territory dimensions before modifiers.
    pub fn territory(&self) -> Territory {
        self.active_allele(ChromosomeType::Territory)
            .and_then(|a| a.as_area())
            .unwrap_or(DEFAULT_TERRITORY)
    }

    /// Flower requirements, if the slot is present.
    pub fn flower_provider(&self) -> Option<&FlowerProvider> {
        self.active_allele(ChromosomeType::FlowerProvider)
            .and_then(|a| a.as_flower_provider())
    }

    /// Active effect allele, if the slot is present.
    pub fn effect(&self) -> Option<&Arc<Allele>> {
        self.active_allele(ChromosomeType::Effect)
    }

    fn integer(&self, ty: ChromosomeType) -> Option<u32> {
        self.active_allele(ty).and_then(|a| a.as_integer())
    }

    fn boolean(&self, ty: ChromosomeType) -> bool {
        self.active_allele(ty)
            .and_then(|a| a.as_boolean())
            .unwrap_or(false)
    }

    fn tolerance(&self, ty: ChromosomeType) -> Tolerance {
        self.active_allele(ty)
            .and_then(|a| a.as_tolerance())
            .unwrap_or(Tolerance::None)
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    /// Project the genome onto allele uids for persistence.
    pub fn to_record(&self) -> GenomeRecord {
        let slots = self
            .chromosomes
            .iter()
            .map(|slot| {
                slot.as_ref().map(|c| SlotRecord {
                    active: c.active().uid().clone(),
                    inactive: c.inactive().uid().clone(),
                })
            })
            .collect();
        GenomeRecord { slots }
    }

    /// Rebuild a genome from its record, resolving uids in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::SlotCountMismatch`] for records of the wrong
    /// length, [`GeneticsError::UnknownAllele`] for unregistered uids, and
    /// any error [`Genome::new`] raises.
    pub fn from_record(record: &GenomeRecord, registry: &AlleleRegistry) -> Result<Self, GeneticsError> {
        if record.slots.len() != CHROMOSOME_COUNT {
            return Err(GeneticsError::SlotCountMismatch {
                expected: CHROMOSOME_COUNT,
                found: record.slots.len(),
            });
        }

        let mut chromosomes: Chromosomes = Default::default();
        for (slot, entry) in chromosomes.iter_mut().zip(&record.slots) {
            if let Some(pair) = entry {
                let active = registry.get(&pair.active)?;
                let inactive = registry.get(&pair.inactive)?;
                *slot = Some(Chromosome::new(active, inactive)?);
            }
        }
        Self::new(chromosomes)
    }
}

/// Persistable uid projection of a [`Genome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeRecord {
    /// One entry per slot, in [`ChromosomeType`] order.
    pub slots: Vec<Option<SlotRecord>>,
}

/// Persistable uid projection of one [`Chromosome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Uid of the active allele.
    pub active: AlleleUid,
    /// Uid of the inactive allele.
    pub inactive: AlleleUid,
}
