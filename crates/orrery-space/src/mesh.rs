//! Body geometry: UV spheres for planets and flat annuli for rings.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Indexed triangle mesh with per-vertex normals.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    /// Unit normals, one per position.
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Latitude/longitude sphere centred on the origin.
///
/// Produces `(width + 1) * (height + 1)` vertices; the seam and pole rows are
/// duplicated. Degenerate pole triangles are skipped. Counter-clockwise
/// winding seen from outside.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push((normal * radius).to_array());
            mesh.normals.push(normal.normalize_or(Vec3::Y).to_array());
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Flat annulus in the XZ plane with every normal pointing +Y.
pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            mesh.positions
                .push([radius * theta.cos(), 0.0, radius * theta.sin()]);
            mesh.normals.push([0.0, 1.0, 0.0]);
        }
    }

    let outer = segments + 1;
    for i in 0..segments {
        let (a, b) = (i, i + 1);
        let (c, d) = (outer + i + 1, outer + i);
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    mesh
}
