//! Per-player record of discovered mutations.
//!
//! A researched mutation gets a chance boost the next time the same pair
//! is bred. Records are keyed by owner; bees in unowned housings share the
//! common record under `None`.

use std::collections::{BTreeMap, BTreeSet};

use apiary_genetics::BeeMutation;
use apiary_types::{AlleleUid, MutationId, PlayerId};

/// Query and update access to mutation research.
pub trait BreedingTracker {
    /// Whether the owner has already seen this mutation fire.
    fn is_researched(&self, owner: Option<&PlayerId>, mutation: &BeeMutation) -> bool;

    /// Record that this mutation fired for the owner.
    fn register_mutation(&mut self, owner: Option<&PlayerId>, mutation: &BeeMutation);
}

/// What one owner has discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchRecord {
    /// Times each mutation fired.
    pub mutations: BTreeMap<MutationId, u32>,
    /// Species obtained through mutation.
    pub species: BTreeSet<AlleleUid>,
}

/// In-memory [`BreedingTracker`].
#[derive(Debug, Clone, Default)]
pub struct ApiaristTracker {
    records: BTreeMap<Option<PlayerId>, ResearchRecord>,
}

impl ApiaristTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The owner's record, if anything was discovered.
    pub fn record(&self, owner: Option<&PlayerId>) -> Option<&ResearchRecord> {
        self.records.get(&owner.copied())
    }

    /// How often a mutation fired for the owner.
    pub fn mutation_count(&self, owner: Option<&PlayerId>, id: &MutationId) -> u32 {
        self.record(owner)
            .and_then(|r| r.mutations.get(id))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the owner has obtained the species through mutation.
    pub fn is_discovered(&self, owner: Option<&PlayerId>, species: &AlleleUid) -> bool {
        self.record(owner)
            .is_some_and(|r| r.species.contains(species))
    }
}

impl BreedingTracker for ApiaristTracker {
    fn is_researched(&self, owner: Option<&PlayerId>, mutation: &BeeMutation) -> bool {
        self.record(owner)
            .is_some_and(|r| r.mutations.contains_key(mutation.id()))
    }

    fn register_mutation(&mut self, owner: Option<&PlayerId>, mutation: &BeeMutation) {
        let record = self.records.entry(owner.copied()).or_default();
        let count = record.mutations.entry(mutation.id().clone()).or_insert(0);
        *count = count.saturating_add(1);
        record.species.insert(mutation.result_species().clone());
    }
}
