//! The species mutation table.
//!
//! Each [`BeeMutation`] names an unordered pair of parent species, the
//! [`Template`] of the species it produces, and a base chance in percent.
//! Mutations are kept in registration order: breeding walks the matching
//! entries in that order and takes the first one whose roll succeeds, so
//! the table order is the priority order.

use std::sync::Arc;

use apiary_types::{AlleleUid, Humidity, MutationId, Temperature};

use crate::allele::{Allele, AlleleKind};
use crate::error::GeneticsError;
use crate::registry::Template;

/// World facts a mutation restriction can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationEnvironment {
    /// Temperature class at the housing.
    pub temperature: Temperature,
    /// Humidity class at the housing.
    pub humidity: Humidity,
    /// Whether it is currently day.
    pub is_daytime: bool,
}

/// An extra condition a mutation needs before it can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRestriction {
    /// Housing temperature must lie in `min..=max`.
    Temperature {
        /// Coldest allowed class.
        min: Temperature,
        /// Hottest allowed class.
        max: Temperature,
    },
    /// Housing humidity must lie in `min..=max`.
    Humidity {
        /// Driest allowed class.
        min: Humidity,
        /// Wettest allowed class.
        max: Humidity,
    },
    /// Only during the day.
    Daytime,
    /// Only at night.
    Nighttime,
}

impl MutationRestriction {
    /// Whether the environment satisfies this restriction.
    pub fn allows(self, env: MutationEnvironment) -> bool {
        match self {
            Self::Temperature { min, max } => env.temperature >= min && env.temperature <= max,
            Self::Humidity { min, max } => env.humidity >= min && env.humidity <= max,
            Self::Daytime => env.is_daytime,
            Self::Nighttime => !env.is_daytime,
        }
    }
}

/// One entry of the mutation table.
#[derive(Debug, Clone, PartialEq)]
pub struct BeeMutation {
    id: MutationId,
    parent0: AlleleUid,
    parent1: AlleleUid,
    template: Template,
    chance: f32,
    restrictions: Vec<MutationRestriction>,
    secret: bool,
}

impl BeeMutation {
    /// Table identifier.
    pub const fn id(&self) -> &MutationId {
        &self.id
    }

    /// Template of the resulting species.
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Uid of the resulting species.
    pub fn result_species(&self) -> &AlleleUid {
        self.template.species().uid()
    }

    /// Whether the mutation is hidden from discovery listings.
    pub const fn is_secret(&self) -> bool {
        self.secret
    }

    /// Whether the unordered pair `(a, b)` matches the parents.
    pub fn matches(&self, a: &AlleleUid, b: &AlleleUid) -> bool {
        (self.parent0 == *a && self.parent1 == *b) || (self.parent0 == *b && self.parent1 == *a)
    }

    /// Chance in percent for this pair in this environment, before housing,
    /// mode, and research adjustments.
    ///
    /// Returns `0.0` when the pair does not match or a restriction fails.
    pub fn chance(&self, env: MutationEnvironment, allele0: &AlleleUid, allele1: &AlleleUid) -> f32 {
        if !self.matches(allele0, allele1) {
            return 0.0;
        }
        if self.restrictions.iter().any(|r| !r.allows(env)) {
            return 0.0;
        }
        self.chance
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds [`BeeMutation`] entries.
#[derive(Debug, Clone)]
pub struct MutationBuilder {
    id: Option<MutationId>,
    parent0: AlleleUid,
    parent1: AlleleUid,
    template: Template,
    chance: f32,
    restrictions: Vec<MutationRestriction>,
    secret: bool,
}

impl MutationBuilder {
    /// Start a mutation of `parent0` and `parent1` into `template` with a
    /// base chance in percent.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::NotASpecies`] when a parent is not a
    /// species allele.
    pub fn new(
        parent0: &Arc<Allele>,
        parent1: &Arc<Allele>,
        template: Template,
        chance: f32,
    ) -> Result<Self, GeneticsError> {
        for parent in [parent0, parent1] {
            if parent.kind() != AlleleKind::Species {
                return Err(GeneticsError::NotASpecies(parent.uid().clone()));
            }
        }
        Ok(Self {
            id: None,
            parent0: parent0.uid().clone(),
            parent1: parent1.uid().clone(),
            template,
            chance,
            restrictions: Vec::new(),
            secret: false,
        })
    }

    /// Override the generated table identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MutationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Restrict to housing temperatures in `min..=max`.
    #[must_use]
    pub fn restrict_temperature(mut self, min: Temperature, max: Temperature) -> Self {
        self.restrictions
            .push(MutationRestriction::Temperature { min, max });
        self
    }

    /// Restrict to housing humidities in `min..=max`.
    #[must_use]
    pub fn restrict_humidity(mut self, min: Humidity, max: Humidity) -> Self {
        self.restrictions.push(MutationRestriction::Humidity { min, max });
        self
    }

    /// Only fire during the day.
    #[must_use]
    pub fn require_day(mut self) -> Self {
        self.restrictions.push(MutationRestriction::Daytime);
        self
    }

    /// Only fire at night.
    #[must_use]
    pub fn require_night(mut self) -> Self {
        self.restrictions.push(MutationRestriction::Nighttime);
        self
    }

    /// Hide the mutation from discovery listings.
    #[must_use]
    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Finish the mutation. Without an explicit id the id is
    /// `parent0+parent1=result`.
    pub fn build(self) -> BeeMutation {
        let id = self.id.unwrap_or_else(|| {
            MutationId::new(format!(
                "{}+{}={}",
                self.parent0,
                self.parent1,
                self.template.species().uid()
            ))
        });
        BeeMutation {
            id,
            parent0: self.parent0,
            parent1: self.parent1,
            template: self.template,
            chance: self.chance,
            restrictions: self.restrictions,
            secret: self.secret,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered mutation table.
#[derive(Debug, Clone, Default)]
pub struct MutationRegistry {
    mutations: Vec<BeeMutation>,
}

impl MutationRegistry {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutation to the table.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticsError::DuplicateMutation`] if the id is taken.
    pub fn register(&mut self, mutation: BeeMutation) -> Result<(), GeneticsError> {
        if self.get(mutation.id()).is_some() {
            return Err(GeneticsError::DuplicateMutation(mutation.id().clone()));
        }
        self.mutations.push(mutation);
        Ok(())
    }

    /// Look up a mutation by id.
    pub fn get(&self, id: &MutationId) -> Option<&BeeMutation> {
        self.mutations.iter().find(|m| m.id() == id)
    }

    /// Mutations of the unordered species pair, in table order.
    ///
    /// The iterator owns copies of the keys, so it may outlive them.
    pub fn combinations<'a>(
        &'a self,
        a: &AlleleUid,
        b: &AlleleUid,
    ) -> impl Iterator<Item = &'a BeeMutation> + use<'a> {
        let (a, b) = (a.clone(), b.clone());
        self.mutations.iter().filter(move |m| m.matches(&a, &b))
    }

    /// Mutations producing the given species, in table order.
    pub fn paths_to<'a>(
        &'a self,
        result: &AlleleUid,
    ) -> impl Iterator<Item = &'a BeeMutation> + use<'a> {
        let result = result.clone();
        self.mutations.iter().filter(move |m| *m.result_species() == result)
    }

    /// Mutations shown in discovery listings: every entry except the
    /// secret ones, in table order.
    pub fn listed(&self) -> impl Iterator<Item = &BeeMutation> {
        self.mutations.iter().filter(|m| !m.is_secret())
    }

    /// All mutations in table order.
    pub fn iter(&self) -> impl Iterator<Item = &BeeMutation> {
        self.mutations.iter()
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.mutations.len()
    }

    /// Whether the table is empty.
    pub const fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}
