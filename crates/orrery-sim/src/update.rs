//! Orbital update step: kinematic, circular, coplanar orbits.

use crate::state::SimulationState;

/// Advance every body by `elapsed_seconds` of wall-clock time.
///
/// Orbiting bodies gain `base_angular_speed * speed_multiplier * dt` of
/// orbital phase; every body, the central one included, gains
/// `axial_rotation_speed * dt` of spin. Nothing moves while paused.
/// Negative or non-finite deltas are treated as zero.
pub fn advance(state: &mut SimulationState, elapsed_seconds: f64) {
    if state.is_paused() || !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
        return;
    }

    let (registry, bodies) = state.parts_mut();
    for (index, (descriptor, body)) in registry.list().iter().zip(bodies).enumerate() {
        if index > 0 {
            body.angle += body.current_speed() * elapsed_seconds;
        }
        body.axial_phase += descriptor.axial_rotation_speed * elapsed_seconds;
    }
}
