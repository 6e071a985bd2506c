//! Presentation adapter: turns registry data and per-frame snapshots into
//! GPU-ready geometry and instances.
//!
//! Authored colors are sRGB hex values. Body colors go to the GPU as sRGB and
//! are linearized in the body shader; line, star, and clear colors are
//! linearized here.

use glam::{Mat4, Quat, Vec3};
use orrery_config::StarfieldConfig;
use orrery_render::{BodyInstance, SceneGeometry, StarInstance, VertexPositionColor, VertexPositionNormal};
use orrery_sim::{BodyRegistry, BodySnapshot, hex_to_rgb};
use orrery_space::{StarfieldGenerator, orbit_line_list, orbit_path, ring, uv_sphere};

use crate::controls::Theme;

pub const ORBIT_LINE_COLOR: u32 = 0x555555;
pub const ORBIT_SEGMENTS: u32 = 64;
pub const RING_COLOR: u32 = 0xcccccc;
/// Ring radii as multiples of the planet radius.
pub const RING_INNER: f32 = 1.5;
pub const RING_OUTER: f32 = 2.0;
pub const RING_SEGMENTS: u32 = 32;
const SPHERE_SEGMENTS: u32 = 32;

/// Dimmest star alpha; brightness scales up from here.
const STAR_MIN_ALPHA: f32 = 0.35;

/// sRGB transfer function, one channel.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_rgb(color: u32) -> [f32; 3] {
    hex_to_rgb(color).map(srgb_to_linear)
}

/// Clear color for a theme, in linear space for an sRGB surface.
pub fn clear_color(theme: Theme) -> wgpu::Color {
    let [r, g, b] = linear_rgb(theme.background());
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

/// Static geometry: starfield, one orbit circle per planet, and the unit
/// sphere and ring meshes.
pub fn build_geometry(registry: &BodyRegistry, starfield: &StarfieldConfig) -> SceneGeometry {
    let stars = StarfieldGenerator::new(starfield.seed, starfield.count, starfield.extent)
        .generate()
        .into_iter()
        .map(|star| {
            let [r, g, b] = star.color.map(srgb_to_linear);
            let alpha = STAR_MIN_ALPHA + (1.0 - STAR_MIN_ALPHA) * star.brightness;
            StarInstance {
                position: star.position.to_array(),
                color: [r, g, b, alpha],
            }
        })
        .collect();

    let [r, g, b] = linear_rgb(ORBIT_LINE_COLOR);
    let orbit_lines = registry
        .list()
        .iter()
        .filter(|body| !body.is_central())
        .flat_map(|body| orbit_line_list(&orbit_path(body.orbital_distance as f32, ORBIT_SEGMENTS)))
        .map(|p| VertexPositionColor {
            position: p.to_array(),
            color: [r, g, b, 1.0],
        })
        .collect();

    let sphere = uv_sphere(1.0, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
    let ring_mesh = ring(RING_INNER, RING_OUTER, RING_SEGMENTS);

    SceneGeometry {
        stars,
        orbit_lines,
        sphere_vertices: VertexPositionNormal::interleave(&sphere.positions, &sphere.normals),
        sphere_indices: sphere.indices,
        ring_vertices: VertexPositionNormal::interleave(&ring_mesh.positions, &ring_mesh.normals),
        ring_indices: ring_mesh.indices,
    }
}

/// Model matrix: translate to the body, spin about Y, scale the unit mesh.
pub fn body_transform(body: &BodySnapshot) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(body.radius as f32),
        Quat::from_rotation_y(body.axial_phase as f32),
        body.position.as_vec3(),
    )
}

/// Per-frame body and ring instances in snapshot order.
///
/// Rings share their planet's transform, so they spin with it.
pub fn body_instances(
    registry: &BodyRegistry,
    bodies: &[BodySnapshot],
) -> (Vec<BodyInstance>, Vec<BodyInstance>) {
    let ring_color = hex_to_rgb(RING_COLOR);
    let mut spheres = Vec::with_capacity(bodies.len());
    let mut rings = Vec::new();

    for body in bodies {
        let Some(descriptor) = registry.get(body.id) else {
            continue;
        };
        let model = body_transform(body);
        spheres.push(BodyInstance::new(model, descriptor.color_rgb(), false));
        if descriptor.has_ring {
            rings.push(BodyInstance::new(model, ring_color, true));
        }
    }
    (spheres, rings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_sim::SimulationState;

    fn small_starfield() -> StarfieldConfig {
        StarfieldConfig {
            count: 100,
            ..StarfieldConfig::default()
        }
    }

    #[test]
    fn test_srgb_to_linear() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        let grey = srgb_to_linear(0x55 as f32 / 255.0);
        assert!((grey - 0.0908).abs() < 1e-3);
    }

    #[test]
    fn test_clear_colors() {
        assert_eq!(clear_color(Theme::Dark), wgpu::Color::BLACK);
        let light = clear_color(Theme::Light);
        assert!((light.r - 0.871).abs() < 1e-3);
        assert_eq!(light.r, light.g);
        assert_eq!(light.a, 1.0);
    }

    #[test]
    fn test_geometry_counts() {
        let registry = BodyRegistry::solar_system();
        let geometry = build_geometry(&registry, &small_starfield());
        assert_eq!(geometry.stars.len(), 100);
        // Eight planets, 64 segments each, two vertices per segment.
        assert_eq!(geometry.orbit_lines.len(), 8 * 64 * 2);
        assert!(!geometry.sphere_indices.is_empty());
        assert_eq!(geometry.ring_indices.len() % 3, 0);
        assert!(geometry.stars.iter().all(|s| s.color[3] >= STAR_MIN_ALPHA));
    }

    #[test]
    fn test_orbit_lines_lie_on_orbits() {
        let registry = BodyRegistry::solar_system();
        let geometry = build_geometry(&registry, &small_starfield());
        let first = Vec3::from_array(geometry.orbit_lines[0].position);
        assert!((first.length() - 7.0).abs() < 1e-4);
        assert_eq!(first.y, 0.0);
    }

    #[test]
    fn test_body_instances_follow_snapshot() {
        let registry = BodyRegistry::solar_system();
        let state = SimulationState::new(registry.clone(), 3);
        let snapshot = state.snapshot();
        let (spheres, rings) = body_instances(&registry, &snapshot);
        assert_eq!(spheres.len(), 9);
        assert_eq!(rings.len(), 1);

        let saturn = snapshot.iter().find(|b| b.name == "Saturn").unwrap();
        let model = Mat4::from_cols_array_2d(&rings[0].model);
        let center = model.transform_point3(Vec3::ZERO);
        assert!((center - saturn.position.as_vec3()).length() < 1e-4);
        // Inner ring edge of a unit ring scaled by Saturn's radius.
        let edge = model.transform_point3(Vec3::new(RING_INNER, 0.0, 0.0)) - center;
        assert!((edge.length() - 1.5 * 1.7).abs() < 1e-4);
        assert_eq!(rings[0].params[0], 1.0);
        assert_eq!(spheres[0].params[0], 0.0);
    }

    #[test]
    fn test_sun_sits_at_origin() {
        let registry = BodyRegistry::solar_system();
        let snapshot = SimulationState::new(registry.clone(), 3).snapshot();
        let (spheres, _) = body_instances(&registry, &snapshot);
        let model = Mat4::from_cols_array_2d(&spheres[0].model);
        assert!(model.transform_point3(Vec3::ZERO).length() < 1e-6);
        assert_eq!(spheres[0].color[..3], hex_to_rgb(0xffff00));
    }
}
