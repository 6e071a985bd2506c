//! Procedural scene geometry: the background starfield, orbit paths, and
//! the sphere and ring meshes bodies are drawn with.
//!
//! Everything here is CPU-side data. Uploading and drawing is the renderer's job.

pub mod mesh;
pub mod orbit;
pub mod starfield;

pub use mesh::{MeshData, ring, uv_sphere};
pub use orbit::{orbit_line_list, orbit_path};
pub use starfield::{StarPoint, StarfieldGenerator, blackbody_to_rgb};
