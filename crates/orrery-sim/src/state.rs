//! Live per-body simulation state and the global pause flag.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::command::SimCommand;
use crate::error::SimError;
use crate::registry::{BodyDescriptor, BodyId, BodyRegistry};

/// Mutable state of one body. Created once at startup, never destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    /// Orbital phase in radians. Not normalized; trig functions wrap it.
    pub angle: f64,
    /// Spin about the body's own axis in radians.
    pub axial_phase: f64,
    speed_multiplier: f64,
    base_angular_speed: f64,
}

impl BodyState {
    fn new(descriptor: &BodyDescriptor, angle: f64) -> Self {
        Self {
            angle,
            axial_phase: 0.0,
            speed_multiplier: 1.0,
            base_angular_speed: descriptor.base_angular_speed,
        }
    }

    /// User-controlled scalar on the base angular speed.
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Angular speed before the multiplier is applied.
    pub fn original_speed(&self) -> f64 {
        self.base_angular_speed
    }

    /// Effective orbital angular speed: base speed times multiplier.
    pub fn current_speed(&self) -> f64 {
        self.base_angular_speed * self.speed_multiplier
    }

    /// Ratio of current to original speed, as shown in the hover tooltip.
    ///
    /// Bodies with no orbital speed report their multiplier directly.
    pub fn speed_ratio(&self) -> f64 {
        if self.base_angular_speed > 0.0 {
            self.current_speed() / self.base_angular_speed
        } else {
            self.speed_multiplier
        }
    }
}

/// Exclusive owner of every [`BodyState`], the registry they derive from,
/// and the pause flag.
///
/// All mutation from the control surface goes through [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct SimulationState {
    registry: BodyRegistry,
    bodies: Vec<BodyState>,
    paused: bool,
    seed: u64,
    rng: ChaCha8Rng,
}

impl SimulationState {
    /// Build state for every body with random initial phases drawn from `seed`.
    ///
    /// Identical seeds produce identical phases, including after resets.
    pub fn new(registry: BodyRegistry, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bodies = registry
            .list()
            .iter()
            .map(|d| BodyState::new(d, random_angle(&mut rng)))
            .collect();
        debug!(seed, bodies = registry.len(), "Simulation state initialized");
        Self {
            registry,
            bodies,
            paused: false,
            seed,
            rng,
        }
    }

    /// Build state with a seed taken from the thread RNG. The seed is logged
    /// so the run can be reproduced.
    pub fn from_entropy(registry: BodyRegistry) -> Self {
        let seed: u64 = rand::rng().random();
        info!(seed, "Seeded simulation from entropy");
        Self::new(registry, seed)
    }

    /// Seed used to create this state.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The registry the state was built from.
    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Per-body state in registry order.
    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    /// State of a single body.
    pub fn body(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(id.index())
    }

    /// Descriptor and state side by side, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyDescriptor, &BodyState)> {
        self.registry
            .list()
            .iter()
            .zip(&self.bodies)
            .enumerate()
            .map(|(i, (d, s))| (BodyId(i), d, s))
    }

    pub(crate) fn parts_mut(&mut self) -> (&BodyRegistry, &mut [BodyState]) {
        (&self.registry, &mut self.bodies)
    }

    /// Whether orbital and axial motion is frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume all motion.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(paused, "Simulation pause toggled");
        }
        self.paused = paused;
    }

    /// Set the speed multiplier of one body.
    ///
    /// Negative and non-finite values are clamped to 0. There is no finite
    /// upper bound here; the control surface owns the slider range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownBody`] if `id` is outside the registry.
    pub fn set_speed_multiplier(&mut self, id: BodyId, value: f64) -> Result<(), SimError> {
        let state = self
            .bodies
            .get_mut(id.index())
            .ok_or(SimError::UnknownBody(id.index()))?;
        state.speed_multiplier = if value.is_finite() { value.max(0.0) } else { 0.0 };
        debug!(body = id.index(), multiplier = state.speed_multiplier, "Speed changed");
        Ok(())
    }

    /// Give one orbiting body a fresh random phase and multiplier 1.0.
    ///
    /// The central body is left untouched. The pause flag is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownBody`] if `id` is outside the registry.
    pub fn reset(&mut self, id: BodyId) -> Result<(), SimError> {
        if id.index() >= self.bodies.len() {
            return Err(SimError::UnknownBody(id.index()));
        }
        if id.is_central() {
            return Ok(());
        }
        let state = &mut self.bodies[id.index()];
        state.angle = random_angle(&mut self.rng);
        state.speed_multiplier = 1.0;
        Ok(())
    }

    /// Reset every orbiting body. See [`reset`](Self::reset).
    pub fn reset_all(&mut self) {
        for state in self.bodies.iter_mut().skip(1) {
            state.angle = random_angle(&mut self.rng);
            state.speed_multiplier = 1.0;
        }
        info!("Simulation reset");
    }

    /// Single mutation entry point for control-surface commands.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownBody`] for commands that name a body
    /// outside the registry.
    pub fn apply(&mut self, command: SimCommand) -> Result<(), SimError> {
        match command {
            SimCommand::SetSpeed { body, value } => self.set_speed_multiplier(body, value),
            SimCommand::SetPaused(paused) => {
                self.set_paused(paused);
                Ok(())
            }
            SimCommand::TogglePause => {
                self.set_paused(!self.paused);
                Ok(())
            }
            SimCommand::Reset => {
                self.reset_all();
                Ok(())
            }
            SimCommand::ResetBody(body) => self.reset(body),
        }
    }
}

fn random_angle(rng: &mut impl Rng) -> f64 {
    rng.random_range(0.0..TAU)
}
