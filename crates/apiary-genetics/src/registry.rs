//! The allele registry and species templates.
//!
//! [`AlleleRegistry`] is an explicitly constructed lookup table: callers
//! build one at startup (see [`crate::starting_catalog`]) and hand it to
//! whatever needs to resolve uids. Nothing in the workspace reaches for a
//! process-wide singleton.

use std::collections::BTreeMap;
use std::sync::Arc;

use apiary_types::{AlleleUid, ChromosomeType};

use crate::allele::{Allele, AlleleKind};
use crate::chromosome::Chromosome;
use crate::error::GeneticsError;
use crate::genome::{CHROMOSOME_COUNT, Chromosomes, Genome};

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A full allele array describing a pure-bred bee of one species.
///
/// Mutations carry a template for their result species; when a mutation
/// fires, the mutated parent's whole chromosome array is replaced by the
/// template's pure-bred pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    alleles: [Option<Arc<Allele>>; CHROMOSOME_COUNT],
    species: Arc<Allele>,
}

impl Template {
    /// Validate and build a template from a slot array.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::MissingSpecies`] without a species allele
    /// and [`GeneticsError::WrongKindForSlot`] for misplaced alleles.
    pub fn new(alleles: [Option<Arc<Allele>>; CHROMOSOME_COUNT]) -> Result<Self, GeneticsError> {
        for ty in ChromosomeType::ALL {
            if let Some(allele) = alleles.get(ty.index()).and_then(Option::as_ref) {
                let expected = AlleleKind::for_chromosome(ty);
                if allele.kind() != expected {
                    return Err(GeneticsError::WrongKindForSlot {
                        slot: ty,
                        expected,
                        found: allele.kind(),
                    });
                }
            }
        }
        let species = alleles
            .get(ChromosomeType::Species.index())
            .cloned()
            .flatten()
            .ok_or(GeneticsError::MissingSpecies)?;
        Ok(Self { alleles, species })
    }

    /// Start a template for the given species allele.
    pub fn builder(species: Arc<Allele>) -> TemplateBuilder {
        let mut alleles: [Option<Arc<Allele>>; CHROMOSOME_COUNT] = Default::default();
        if let Some(slot) = alleles.get_mut(ChromosomeType::Species.index()) {
            *slot = Some(species);
        }
        TemplateBuilder { alleles }
    }

    /// Species allele of the template.
    pub const fn species(&self) -> &Arc<Allele> {
        &self.species
    }

    /// Allele at a slot, if set.
    pub fn allele(&self, ty: ChromosomeType) -> Option<&Arc<Allele>> {
        self.alleles.get(ty.index()).and_then(Option::as_ref)
    }

    /// Expand into pure-bred chromosomes; unset slots stay absent.
    pub fn to_chromosomes(&self) -> Chromosomes {
        let mut chromosomes: Chromosomes = Default::default();
        for (slot, allele) in chromosomes.iter_mut().zip(&self.alleles) {
            *slot = allele.as_ref().map(|a| Chromosome::pure(Arc::clone(a)));
        }
        chromosomes
    }

    /// Build a pure-bred genome from the template.
    ///
    /// # Errors
    ///
    /// Propagates [`Genome::new`] errors; a validated template never
    /// triggers them.
    pub fn to_genome(&self) -> Result<Genome, GeneticsError> {
        Genome::new(self.to_chromosomes())
    }
}

/// Incremental builder for a [`Template`].
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    alleles: [Option<Arc<Allele>>; CHROMOSOME_COUNT],
}

impl TemplateBuilder {
    /// Set the allele of a slot.
    #[must_use]
    pub fn with(mut self, ty: ChromosomeType, allele: Arc<Allele>) -> Self {
        if let Some(slot) = self.alleles.get_mut(ty.index()) {
            *slot = Some(allele);
        }
        self
    }

    /// Validate and finish the template.
    ///
    /// # Errors
    ///
    /// See [`Template::new`].
    pub fn build(self) -> Result<Template, GeneticsError> {
        Template::new(self.alleles)
    }
}

// ---------------------------------------------------------------------------
// AlleleRegistry
// ---------------------------------------------------------------------------

/// Lookup table for alleles by uid and templates by species uid.
#[derive(Debug, Clone, Default)]
pub struct AlleleRegistry {
    alleles: BTreeMap<AlleleUid, Arc<Allele>>,
    templates: BTreeMap<AlleleUid, Template>,
}

impl AlleleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an allele and return the shared handle.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::DuplicateAllele`] if the uid is taken.
    pub fn register(&mut self, allele: Allele) -> Result<Arc<Allele>, GeneticsError> {
        let uid = allele.uid().clone();
        if self.alleles.contains_key(&uid) {
            return Err(GeneticsError::DuplicateAllele(uid));
        }
        let shared = Arc::new(allele);
        self.alleles.insert(uid, Arc::clone(&shared));
        Ok(shared)
    }

    /// Look up an allele by uid.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::UnknownAllele`] if the uid is not registered.
    pub fn get(&self, uid: &AlleleUid) -> Result<Arc<Allele>, GeneticsError> {
        self.alleles
            .get(uid)
            .cloned()
            .ok_or_else(|| GeneticsError::UnknownAllele(uid.clone()))
    }

    /// Whether an allele with this uid is registered.
    pub fn contains(&self, uid: &AlleleUid) -> bool {
        self.alleles.contains_key(uid)
    }

    /// Number of registered alleles.
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Whether no alleles are registered.
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// All registered alleles of a category, in uid order.
    pub fn alleles_of_kind(&self, kind: AlleleKind) -> impl Iterator<Item = &Arc<Allele>> {
        self.alleles.values().filter(move |a| a.kind() == kind)
    }

    /// Register the default template of a species.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::DuplicateTemplate`] if the species already
    /// has a template.
    pub fn register_template(&mut self, template: Template) -> Result<(), GeneticsError> {
        let uid = template.species().uid().clone();
        if self.templates.contains_key(&uid) {
            return Err(GeneticsError::DuplicateTemplate(uid));
        }
        self.templates.insert(uid, template);
        Ok(())
    }

    /// Template registered for a species.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::UnknownTemplate`] if none is registered.
    pub fn template(&self, species: &AlleleUid) -> Result<&Template, GeneticsError> {
        self.templates
            .get(species)
            .ok_or_else(|| GeneticsError::UnknownTemplate(species.clone()))
    }

    /// Expand a species template into pure-bred chromosomes.
    ///
    /// # Errors
    ///
    /// See [`AlleleRegistry::template`].
    pub fn template_as_chromosomes(&self, species: &AlleleUid) -> Result<Chromosomes, GeneticsError> {
        Ok(self.template(species)?.to_chromosomes())
    }

    /// Build a pure-bred genome from a species template.
    ///
    /// # Errors
    ///
    /// See [`AlleleRegistry::template`].
    pub fn template_as_genome(&self, species: &AlleleUid) -> Result<Genome, GeneticsError> {
        self.template(species)?.to_genome()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use apiary_types::{Humidity, Temperature};

    use super::*;
    use crate::allele::{AlleleValue, SpeciesTraits};

    fn forest() -> Allele {
        Allele::species(
            "forest",
            "Forest",
            true,
            SpeciesTraits::new("Apis silvestris", Temperature::Normal, Humidity::Normal),
        )
    }

    #[test]
    fn duplicate_uids_are_rejected() {
        let mut registry = AlleleRegistry::new();
        registry.register(forest()).unwrap();
        assert!(matches!(
            registry.register(forest()),
            Err(GeneticsError::DuplicateAllele(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_returns_shared_handle() {
        let mut registry = AlleleRegistry::new();
        let registered = registry.register(forest()).unwrap();
        let found = registry.get(&AlleleUid::new("forest")).unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
        assert!(registry.get(&AlleleUid::new("meadows")).is_err());
    }

    #[test]
    fn template_expands_to_pure_bred_genome() {
        let mut registry = AlleleRegistry::new();
        let species = registry.register(forest()).unwrap();
        let speed = registry
            .register(Allele::new("slow", "Slow", false, AlleleValue::Float(0.8)))
            .unwrap();
        let template = Template::builder(species)
            .with(ChromosomeType::Speed, speed)
            .build()
            .unwrap();
        registry.register_template(template).unwrap();

        let genome = registry.template_as_genome(&AlleleUid::new("forest")).unwrap();
        assert!(genome.is_pure_bred(ChromosomeType::Species));
        assert!(genome.is_pure_bred(ChromosomeType::Speed));
        assert!(genome.chromosome(ChromosomeType::Lifespan).is_none());
    }

    #[test]
    fn template_rejects_misplaced_allele() {
        let mut registry = AlleleRegistry::new();
        let species = registry.register(forest()).unwrap();
        let flag = registry
            .register(Allele::new("yes", "Yes", false, AlleleValue::Boolean(true)))
            .unwrap();
        let result = Template::builder(species)
            .with(ChromosomeType::Territory, flag)
            .build();
        assert!(matches!(result, Err(GeneticsError::WrongKindForSlot { .. })));
    }

    #[test]
    fn alleles_filter_by_kind() {
        let mut registry = AlleleRegistry::new();
        registry.register(forest()).unwrap();
        registry
            .register(Allele::new("slow", "Slow", false, AlleleValue::Float(0.8)))
            .unwrap();
        assert_eq!(registry.alleles_of_kind(AlleleKind::Species).count(), 1);
        assert_eq!(registry.alleles_of_kind(AlleleKind::Float).count(), 1);
        assert_eq!(registry.alleles_of_kind(AlleleKind::Effect).count(), 0);
    }
}
