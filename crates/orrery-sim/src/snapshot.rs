//! Read-only per-frame view of the simulation for the presentation layer.

use glam::DVec3;

use crate::registry::BodyId;
use crate::state::SimulationState;

/// Where a body is and how it is oriented this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    /// Registry id.
    pub id: BodyId,
    /// Display name.
    pub name: String,
    /// World position. `y` is always zero: orbits lie in the XZ plane.
    pub position: DVec3,
    /// Spin about the local Y axis in radians.
    pub axial_phase: f64,
    /// Current speed multiplier.
    pub speed_multiplier: f64,
    /// Ratio of current to original orbital speed.
    pub speed_ratio: f64,
    /// Radius of the orbit.
    pub orbital_distance: f64,
    /// Visual radius.
    pub radius: f64,
}

/// Position on a circular orbit of radius `distance` at phase `angle`.
pub fn orbit_position(distance: f64, angle: f64) -> DVec3 {
    DVec3::new(distance * angle.cos(), 0.0, distance * angle.sin())
}

impl SimulationState {
    /// Snapshot every body in registry order. The central body is at the origin.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.iter()
            .map(|(id, descriptor, state)| BodySnapshot {
                id,
                name: descriptor.name.clone(),
                position: if id.is_central() {
                    DVec3::ZERO
                } else {
                    orbit_position(descriptor.orbital_distance, state.angle)
                },
                axial_phase: state.axial_phase,
                speed_multiplier: state.speed_multiplier(),
                speed_ratio: state.speed_ratio(),
                orbital_distance: descriptor.orbital_distance,
                radius: descriptor.radius,
            })
            .collect()
    }
}
