//! Circular orbit paths in the XZ plane.

use std::f32::consts::TAU;

use glam::Vec3;

/// `segments + 1` points on the circle `(d cos θ, 0, d sin θ)`, starting and
/// ending at θ = 0 so the strip closes.
pub fn orbit_path(distance: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(distance * theta.cos(), 0.0, distance * theta.sin())
        })
        .collect()
}

/// Expand a strip of points into independent line segments (a line list).
pub fn orbit_line_list(points: &[Vec3]) -> Vec<Vec3> {
    points.windows(2).flat_map(|w| [w[0], w[1]]).collect()
}
