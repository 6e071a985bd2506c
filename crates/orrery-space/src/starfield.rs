//! Procedural starfield: deterministic points scattered through a cube
//! around the scene.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Blend factor from white toward the blackbody color. Stars read as white
/// with a faint warm or cool cast.
const TINT_STRENGTH: f32 = 0.3;

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPoint {
    /// World-space position.
    pub position: Vec3,
    /// Brightness in [0.0, 1.0]. Most stars are dim.
    pub brightness: f32,
    /// Near-white RGB tint derived from a color temperature.
    pub color: [f32; 3],
}

/// Generates a deterministic set of stars from a seed.
#[derive(Clone, Debug)]
pub struct StarfieldGenerator {
    seed: u64,
    count: u32,
    extent: f32,
}

impl StarfieldGenerator {
    /// `count` stars uniformly distributed in the cube `[-extent/2, extent/2]^3`.
    pub fn new(seed: u64, count: u32, extent: f32) -> Self {
        Self {
            seed,
            count,
            extent: extent.abs(),
        }
    }

    /// Generate the stars. Identical parameters give identical output.
    pub fn generate(&self) -> Vec<StarPoint> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let half = self.extent * 0.5;
        let mut stars = Vec::with_capacity(self.count as usize);

        for _ in 0..self.count {
            let position = Vec3::new(
                (rng.random::<f32>() * 2.0 - 1.0) * half,
                (rng.random::<f32>() * 2.0 - 1.0) * half,
                (rng.random::<f32>() * 2.0 - 1.0) * half,
            );

            // Power-law: many dim, few bright.
            let raw: f32 = rng.random();
            let brightness = raw.powf(4.0).clamp(0.0, 1.0);

            let temperature = 3000.0 + rng.random::<f32>() * 9000.0;
            let body = blackbody_to_rgb(temperature);
            let color = [0, 1, 2].map(|i| 1.0 + (body[i] - 1.0) * TINT_STRENGTH);

            stars.push(StarPoint {
                position,
                brightness,
                color,
            });
        }

        log::debug!(
            "Generated {} stars (seed {}, extent {})",
            stars.len(),
            self.seed,
            self.extent
        );
        stars
    }
}

/// Convert a blackbody temperature in Kelvin to an approximate sRGB color.
///
/// Uses the Tanner Helland fit of the Planckian locus.
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    let r = if t <= 66.0 {
        1.0
    } else {
        (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };
    let g = if t <= 66.0 {
        (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0
    } else {
        (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };
    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
    };
    [r, g, b]
}
