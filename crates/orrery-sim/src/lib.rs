//! Kinematic orbital simulation for the orrery.
//!
//! A validated [`BodyRegistry`] seeds a [`SimulationState`]; each frame the
//! host drains queued [`SimCommand`]s, calls [`advance`] with the wall-clock
//! delta, and reads a [`BodySnapshot`] list for drawing. Nothing here depends
//! on a renderer or window system.

mod command;
mod error;
mod registry;
mod snapshot;
mod state;
mod update;

pub use command::{CommandQueue, CommandSender, SimCommand};
pub use error::{RegistryError, SimError};
pub use registry::{BodyDescriptor, BodyId, BodyRegistry, hex_to_rgb, solar_system_bodies};
pub use snapshot::{BodySnapshot, orbit_position};
pub use state::{BodyState, SimulationState};
pub use update::advance;
