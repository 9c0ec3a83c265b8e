//! The breeding façade.
//!
//! [`BreedingEngine`] owns the mutation table, the beekeeping modes, and
//! the configuration, and routes every housing operation through the mode
//! the housing runs under. Hosts construct it once and pass their housing,
//! tracker, world, and RNG into each call.

use std::collections::BTreeSet;

use apiary_genetics::{Genome, MutationEnvironment, MutationRegistry};
use apiary_types::{ErrorState, ItemStack, Position};
use rand::Rng;

use crate::bee::Bee;
use crate::config::BreedingConfig;
use crate::effects::{self, EffectHandler, HiveEffects};
use crate::eligibility;
use crate::error::BreedingError;
use crate::housing::{BeeHousing, BeeModifier, ModifierStack};
use crate::mode::{BeekeepingMode, ModeRegistry};
use crate::pollination::{self, FlowerWorld, Pollen, TerritoryBox};
use crate::production;
use crate::reproduction::{self, BreedingContext, Offspring};
use crate::tracker::BreedingTracker;

/// Registries and configuration shared by every housing.
#[derive(Debug)]
pub struct BreedingEngine {
    mutations: MutationRegistry,
    modes: ModeRegistry,
    config: BreedingConfig,
}

impl BreedingEngine {
    /// Assemble an engine from its parts.
    pub const fn new(mutations: MutationRegistry, modes: ModeRegistry, config: BreedingConfig) -> Self {
        Self {
            mutations,
            modes,
            config,
        }
    }

    /// Validate the configuration and build the mode registry from it.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::InvalidConfig`] or
    /// [`BreedingError::UnknownMode`] for a bad configuration.
    pub fn from_config(mutations: MutationRegistry, config: BreedingConfig) -> Result<Self, BreedingError> {
        config.validate()?;
        let modes = ModeRegistry::from_config(&config)?;
        Ok(Self::new(mutations, modes, config))
    }

    /// The mutation table.
    pub const fn mutations(&self) -> &MutationRegistry {
        &self.mutations
    }

    /// The beekeeping modes.
    pub const fn modes(&self) -> &ModeRegistry {
        &self.modes
    }

    /// The configuration.
    pub const fn config(&self) -> &BreedingConfig {
        &self.config
    }

    /// The mode a housing runs under.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] when the housing names an
    /// unregistered mode.
    pub fn mode_for<H: BeeHousing + ?Sized>(&self, housing: &H) -> Result<&dyn BeekeepingMode, BreedingError> {
        self.modes.resolve(housing.beekeeping_mode())
    }

    // -----------------------------------------------------------------------
    // Eligibility and production
    // -----------------------------------------------------------------------

    /// Blocking conditions for `genome` in `housing`.
    pub fn can_work<H: BeeHousing + ?Sized>(&self, genome: &Genome, housing: &H) -> BTreeSet<ErrorState> {
        let stack = ModifierStack::of_housing(housing);
        eligibility::can_work(genome, housing, &stack, self.config.light_threshold)
    }

    /// One production cycle. Returns `None`, after logging, when the
    /// housing names an unknown mode.
    pub fn produce<H: BeeHousing + ?Sized>(
        &self,
        queen: &mut Bee,
        housing: &H,
        rng: &mut impl Rng,
    ) -> Option<Vec<ItemStack>> {
        let mode = match self.mode_for(housing) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, "skipping production");
                return None;
            }
        };
        Some(production::produce(queen, housing, mode, &self.config, rng))
    }

    // -----------------------------------------------------------------------
    // Breeding
    // -----------------------------------------------------------------------

    /// Raise the queen's successor; see [`reproduction::spawn_princess`].
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode
    /// and propagates genetics errors.
    pub fn spawn_princess<H, T>(
        &self,
        queen: &Bee,
        housing: &H,
        tracker: &mut T,
        rng: &mut impl Rng,
    ) -> Result<Option<Offspring>, BreedingError>
    where
        H: BeeHousing + ?Sized,
        T: BreedingTracker + ?Sized,
    {
        let mode = self.mode_for(housing)?;
        let stack = ModifierStack::of_housing(housing);
        let ctx = self.context(housing, mode, &stack);
        reproduction::spawn_princess(&ctx, tracker, queen, rng)
    }

    /// Release the queen's drones; see [`reproduction::spawn_drones`].
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode
    /// and propagates genetics errors.
    pub fn spawn_drones<H, T>(
        &self,
        queen: &Bee,
        housing: &H,
        tracker: &mut T,
        rng: &mut impl Rng,
    ) -> Result<Vec<Offspring>, BreedingError>
    where
        H: BeeHousing + ?Sized,
        T: BreedingTracker + ?Sized,
    {
        let mode = self.mode_for(housing)?;
        let stack = ModifierStack::of_housing(housing);
        let ctx = self.context(housing, mode, &stack);
        reproduction::spawn_drones(&ctx, tracker, queen, rng)
    }

    fn context<'a, H: BeeHousing + ?Sized>(
        &'a self,
        housing: &'a H,
        mode: &'a dyn BeekeepingMode,
        stack: &'a ModifierStack<'a>,
    ) -> BreedingContext<'a> {
        BreedingContext {
            mutations: &self.mutations,
            mode,
            housing_modifier: stack,
            environment: MutationEnvironment {
                temperature: housing.temperature(),
                humidity: housing.humidity(),
                is_daytime: housing.is_daytime(),
            },
            owner: housing.owner(),
            config: &self.config,
        }
    }

    // -----------------------------------------------------------------------
    // Aging
    // -----------------------------------------------------------------------

    /// Combined lifespan modifier of the housing and its mode.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode.
    pub fn lifespan_modifier<H: BeeHousing + ?Sized>(&self, queen: &Bee, housing: &H) -> Result<f32, BreedingError> {
        let mode = self.mode_for(housing)?;
        let stack = ModifierStack::of_housing(housing);
        let genome = queen.genome();
        Ok(stack.lifespan_modifier(genome, queen.mate(), 1.0)
            * mode.bee_modifier().lifespan_modifier(genome, queen.mate(), 1.0))
    }

    /// Age the queen by one step.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode.
    pub fn age_queen<H: BeeHousing + ?Sized>(
        &self,
        queen: &mut Bee,
        housing: &H,
        rng: &mut impl Rng,
    ) -> Result<(), BreedingError> {
        let modifier = self.lifespan_modifier(queen, housing)?;
        queen.age(rng, modifier);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pollination and effects
    // -----------------------------------------------------------------------

    /// Fetch pollen; see [`pollination::retrieve_pollen`].
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode.
    pub fn retrieve_pollen<H, W>(
        &self,
        genome: &Genome,
        housing: &H,
        world: &W,
        rng: &mut impl Rng,
    ) -> Result<Option<Pollen>, BreedingError>
    where
        H: BeeHousing + ?Sized,
        W: FlowerWorld + ?Sized,
    {
        self.mode_for(housing)?;
        Ok(pollination::retrieve_pollen(genome, housing, &self.config, world, rng))
    }

    /// Deposit pollen; see [`pollination::pollinate_random`].
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode.
    pub fn pollinate<H, W>(
        &self,
        genome: &Genome,
        housing: &H,
        world: &mut W,
        pollen: &Pollen,
        rng: &mut impl Rng,
    ) -> Result<Option<Position>, BreedingError>
    where
        H: BeeHousing + ?Sized,
        W: FlowerWorld + ?Sized,
    {
        self.mode_for(housing)?;
        Ok(pollination::pollinate_random(genome, housing, &self.config, world, pollen, rng))
    }

    /// Plant a flower; see [`pollination::plant_flower_random`].
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] for an unknown housing mode.
    pub fn plant_flower<H, W>(
        &self,
        genome: &Genome,
        housing: &H,
        world: &mut W,
        rng: &mut impl Rng,
    ) -> Result<Option<Position>, BreedingError>
    where
        H: BeeHousing + ?Sized,
        W: FlowerWorld + ?Sized,
    {
        self.mode_for(housing)?;
        Ok(pollination::plant_flower_random(genome, housing, &self.config, world, rng))
    }

    /// Run the genome's effects over its unscaled territory around the
    /// housing; returns how many effects ran.
    pub fn do_effects<H, E>(
        &self,
        genome: &Genome,
        housing: &H,
        handler: &mut E,
        state: &mut HiveEffects,
        rng: &mut impl Rng,
    ) -> usize
    where
        H: BeeHousing + ?Sized,
        E: EffectHandler + ?Sized,
    {
        let stack = ModifierStack::of_housing(housing);
        let area = TerritoryBox::around(housing.position(), genome, &stack, 1.0);
        effects::do_effect(genome, &area, handler, state, rng).len()
    }
}
