//! Error types for registry validation and state mutation.

/// A body registry that cannot be simulated.
///
/// These are configuration defects: they are reported once at startup and
/// abort initialization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// The registry contains no bodies at all.
    #[error("body registry is empty")]
    Empty,

    /// No body has an orbital distance of zero.
    #[error("body registry has no central body (orbital distance 0)")]
    NoCentralBody,

    /// More than one body claims the center of the system.
    #[error("body registry has multiple central bodies: {}", names.join(", "))]
    MultipleCentralBodies {
        /// Names of every body with orbital distance 0.
        names: Vec<String>,
    },

    /// The central body exists but is not the first entry.
    #[error("central body '{name}' must be the first entry, found at index {index}")]
    CentralBodyNotFirst {
        /// Name of the central body.
        name: String,
        /// Position in the registry where it was found.
        index: usize,
    },

    /// Radius is zero, negative, or not finite.
    #[error("body '{name}' has invalid radius {radius}")]
    InvalidRadius {
        /// Offending body.
        name: String,
        /// The rejected radius.
        radius: f64,
    },

    /// A distance or speed field is negative or not finite.
    #[error("body '{name}' has invalid {field} {value}")]
    InvalidValue {
        /// Offending body.
        name: String,
        /// Which field failed (`orbital_distance`, `base_angular_speed`, ...).
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Two bodies share a name (compared case-insensitively).
    #[error("duplicate body name '{0}'")]
    DuplicateName(String),
}

/// Errors returned by [`SimulationState::apply`](crate::SimulationState::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The command referenced a body id outside the registry.
    #[error("unknown body id {0}")]
    UnknownBody(usize),
}
