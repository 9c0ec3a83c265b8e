//! The bee organism: a genome plus lineage, mating, and health state.
//!
//! Genomes never change. Breeding creates new [`Bee`] values, and the only
//! in-place changes are mating, analysis, the natural flag, and health.

use apiary_genetics::{AlleleRegistry, GeneticsError, Genome, GenomeRecord, ProductChance};
use apiary_types::{ChromosomeType, ItemStack};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Below this lifespan modifier a bee dies on its next aging step.
const MIN_LIFESPAN_MODIFIER: f32 = 0.001;

/// A bee: queen, princess, or drone.
#[derive(Debug, Clone, PartialEq)]
pub struct Bee {
    genome: Genome,
    mate: Option<Genome>,
    generation: u32,
    is_natural: bool,
    is_analyzed: bool,
    health: u32,
    max_health: u32,
}

impl Bee {
    /// A natural, unmated, generation-zero bee with full health.
    pub fn new(genome: Genome) -> Self {
        Self::with_lineage(genome, true, 0)
    }

    /// A bee with explicit lineage state.
    pub fn with_lineage(genome: Genome, is_natural: bool, generation: u32) -> Self {
        let max_health = genome.lifespan();
        Self {
            genome,
            mate: None,
            generation,
            is_natural,
            is_analyzed: false,
            health: max_health,
            max_health,
        }
    }

    /// Store a snapshot of the drone's genome as this bee's mate.
    pub fn mate_with(&mut self, drone: &Self) {
        self.mate = Some(drone.genome.clone());
    }

    /// Store a mate genome directly.
    pub fn set_mate(&mut self, mate: Genome) {
        self.mate = Some(mate);
    }

    /// The bee's genome.
    pub const fn genome(&self) -> &Genome {
        &self.genome
    }

    /// The mate genome captured at mating, if mated.
    pub const fn mate(&self) -> Option<&Genome> {
        self.mate.as_ref()
    }

    /// Whether the bee is mated and can produce offspring.
    pub const fn can_spawn(&self) -> bool {
        self.mate.is_some()
    }

    /// Generations since the line was last bred from natural stock.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the bee descends from natural, non-overworked stock.
    pub const fn is_natural(&self) -> bool {
        self.is_natural
    }

    /// Set the natural-origin flag.
    pub const fn set_is_natural(&mut self, is_natural: bool) {
        self.is_natural = is_natural;
    }

    /// Whether the genome has been revealed to the player.
    pub const fn is_analyzed(&self) -> bool {
        self.is_analyzed
    }

    /// Reveal the genome. Returns `false` if it was already analyzed.
    pub const fn analyze(&mut self) -> bool {
        if self.is_analyzed {
            return false;
        }
        self.is_analyzed = true;
        true
    }

    /// Remaining health.
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health at birth.
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Whether the bee still has health left.
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the bee carries the same allele twice at a slot.
    pub fn is_pure_bred(&self, ty: ChromosomeType) -> bool {
        self.genome.is_pure_bred(ty)
    }

    /// Age the bee by one step.
    ///
    /// `lifespan_modifier` is the combined housing and mode modifier. The
    /// bee loses `1 / modifier` health: the whole part always, plus one more
    /// point with the fractional part as probability. A modifier below
    /// `0.001` kills the bee outright.
    pub fn age(&mut self, rng: &mut impl Rng, lifespan_modifier: f32) {
        if lifespan_modifier < MIN_LIFESPAN_MODIFIER {
            self.health = 0;
            return;
        }

        let mut age_modifier = 1.0 / lifespan_modifier;
        while age_modifier > 1.0 {
            self.decrease_health();
            age_modifier -= 1.0;
        }
        if rng.random::<f32>() < age_modifier {
            self.decrease_health();
        }
    }

    const fn decrease_health(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Product listings
    // -----------------------------------------------------------------------

    /// Every product either species can make, primary first, without
    /// duplicate items.
    pub fn produce_list(&self) -> Vec<ItemStack> {
        let mut products: Vec<ItemStack> = self
            .genome
            .primary_species()
            .products
            .iter()
            .map(ProductChance::stack)
            .collect();

        for candidate in &self.genome.secondary_species().products {
            let stack = candidate.stack();
            if !products.iter().any(|p| p.is_item_equal(&stack)) {
                products.push(stack);
            }
        }
        products
    }

    /// Specialty products of the primary species.
    pub fn specialty_list(&self) -> Vec<ItemStack> {
        self.genome
            .primary_species()
            .specialties
            .iter()
            .map(ProductChance::stack)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    /// Project the bee onto a persistable record.
    pub fn to_record(&self) -> BeeRecord {
        BeeRecord {
            genome: self.genome.to_record(),
            mate: self.mate.as_ref().map(Genome::to_record),
            generation: self.generation,
            is_natural: self.is_natural,
            is_analyzed: self.is_analyzed,
            health: self.health,
            max_health: self.max_health,
        }
    }

    /// Rebuild a bee from its record.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError`] if either genome record does not resolve
    /// against `registry`.
    pub fn from_record(record: &BeeRecord, registry: &AlleleRegistry) -> Result<Self, GeneticsError> {
        let genome = Genome::from_record(&record.genome, registry)?;
        let mate = record
            .mate
            .as_ref()
            .map(|m| Genome::from_record(m, registry))
            .transpose()?;
        Ok(Self {
            genome,
            mate,
            generation: record.generation,
            is_natural: record.is_natural,
            is_analyzed: record.is_analyzed,
            health: record.health.min(record.max_health),
            max_health: record.max_health,
        })
    }
}

/// Persistable projection of a [`Bee`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeeRecord {
    /// The bee's genome.
    pub genome: GenomeRecord,
    /// The captured mate genome, if mated.
    #[serde(default)]
    pub mate: Option<GenomeRecord>,
    /// Generation counter.
    pub generation: u32,
    /// Natural-origin flag.
    pub is_natural: bool,
    /// Analyzed flag.
    #[serde(default)]
    pub is_analyzed: bool,
    /// Remaining health.
    pub health: u32,
    /// Health at birth.
    pub max_health: u32,
}
