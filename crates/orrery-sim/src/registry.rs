//! Body registry: static descriptions of every body in the system.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Index of a body within its [`BodyRegistry`].
///
/// Index 0 is always the central body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    /// The non-orbiting central body.
    pub const CENTRAL: Self = Self(0);

    /// Raw registry index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this id refers to the central body.
    pub fn is_central(self) -> bool {
        self.0 == 0
    }
}

/// Immutable description of a single body, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Display name, unique within a registry.
    pub name: String,
    /// Visual radius in scene units.
    pub radius: f64,
    /// Radius of the circular orbit. Zero only for the central body.
    pub orbital_distance: f64,
    /// Orbital angular speed in radians per second at multiplier 1.0.
    pub base_angular_speed: f64,
    /// Spin about the body's own axis in radians per second.
    pub axial_rotation_speed: f64,
    /// Surface color as `0xRRGGBB`.
    pub color: u32,
    /// Draw a flat ring around the body.
    #[serde(default)]
    pub has_ring: bool,
}

impl BodyDescriptor {
    /// Whether this body sits at the center of the system.
    pub fn is_central(&self) -> bool {
        self.orbital_distance == 0.0
    }

    /// Color as sRGB floats in `[0, 1]`.
    pub fn color_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(RegistryError::InvalidRadius {
                name: self.name.clone(),
                radius: self.radius,
            });
        }
        let fields = [
            ("orbital_distance", self.orbital_distance),
            ("base_angular_speed", self.base_angular_speed),
            ("axial_rotation_speed", self.axial_rotation_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RegistryError::InvalidValue {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Convert a packed `0xRRGGBB` color to RGB floats.
pub fn hex_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    ]
}

/// Ordered, validated, read-only list of bodies.
///
/// The central body is guaranteed to be at [`BodyId::CENTRAL`].
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRegistry {
    bodies: Vec<BodyDescriptor>,
}

impl BodyRegistry {
    /// Validate and wrap a list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the list is empty, has zero or several
    /// central bodies, does not list the central body first, contains an
    /// out-of-range value, or repeats a name. Names compare ignoring ASCII
    /// case, the same way [`find`](Self::find) matches them.
    pub fn new(bodies: Vec<BodyDescriptor>) -> Result<Self, RegistryError> {
        if bodies.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for body in &bodies {
            body.validate()?;
            if !seen.insert(body.name.to_ascii_lowercase()) {
                return Err(RegistryError::DuplicateName(body.name.clone()));
            }
        }

        let central: Vec<(usize, &BodyDescriptor)> = bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_central())
            .collect();
        match central.as_slice() {
            [] => return Err(RegistryError::NoCentralBody),
            [(0, _)] => {}
            [(index, body)] => {
                return Err(RegistryError::CentralBodyNotFirst {
                    name: body.name.clone(),
                    index: *index,
                });
            }
            many => {
                return Err(RegistryError::MultipleCentralBodies {
                    names: many.iter().map(|(_, b)| b.name.clone()).collect(),
                });
            }
        }

        Ok(Self { bodies })
    }

    /// The reference nine-body system: the Sun and the eight planets.
    pub fn solar_system() -> Self {
        Self {
            bodies: solar_system_bodies(),
        }
    }

    /// All descriptors in iteration order (central body first).
    pub fn list(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    /// Look up a body by id.
    pub fn get(&self, id: BodyId) -> Option<&BodyDescriptor> {
        self.bodies.get(id.0)
    }

    /// Find a body id by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
            .map(BodyId)
    }

    /// The central body descriptor.
    pub fn central(&self) -> &BodyDescriptor {
        &self.bodies[0]
    }

    /// Ids of every body except the central one.
    pub fn orbiting_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (1..self.bodies.len()).map(BodyId)
    }

    /// Number of bodies, central included.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a validated registry; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::solar_system()
    }
}

fn body(
    name: &str,
    radius: f64,
    orbital_distance: f64,
    color: u32,
    base_angular_speed: f64,
    axial_rotation_speed: f64,
) -> BodyDescriptor {
    BodyDescriptor {
        name: name.to_string(),
        radius,
        orbital_distance,
        base_angular_speed,
        axial_rotation_speed,
        color,
        has_ring: false,
    }
}

/// Descriptor list behind [`BodyRegistry::solar_system`].
pub fn solar_system_bodies() -> Vec<BodyDescriptor> {
    vec![
        body("Sun", 5.0, 0.0, 0xffff00, 0.0, 0.01),
        body("Mercury", 0.4, 7.0, 0xb5b5b5, 0.04, 0.004),
        body("Venus", 0.9, 9.5, 0xe6c229, 0.015, 0.002),
        body("Earth", 1.0, 13.0, 0x3498db, 0.01, 0.02),
        body("Mars", 0.5, 16.0, 0xe67e22, 0.008, 0.018),
        body("Jupiter", 2.0, 22.0, 0xf1c40f, 0.003, 0.04),
        BodyDescriptor {
            has_ring: true,
            ..body("Saturn", 1.7, 28.0, 0xf39c12, 0.001, 0.038)
        },
        body("Uranus", 1.3, 34.0, 0x1abc9c, 0.0007, 0.03),
        body("Neptune", 1.2, 40.0, 0x3498db, 0.0005, 0.032),
    ]
}
