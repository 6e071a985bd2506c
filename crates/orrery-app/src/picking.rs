//! Hover picking: which body is under the cursor.

use std::fmt;

use orrery_render::Ray;
use orrery_sim::BodySnapshot;

/// Index into `bodies` of the nearest body the ray hits.
pub fn pick(ray: &Ray, bodies: &[BodySnapshot]) -> Option<usize> {
    bodies
        .iter()
        .enumerate()
        .filter_map(|(i, body)| {
            let center = body.position.as_vec3();
            ray.intersect_sphere(center, body.radius as f32).map(|t| (i, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Details shown while the cursor rests on a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: String,
    pub speed_ratio: f64,
    pub distance: f64,
}

impl Tooltip {
    pub fn from_snapshot(body: &BodySnapshot) -> Self {
        Self {
            name: body.name.clone(),
            speed_ratio: body.speed_ratio,
            distance: body.orbital_distance,
        }
    }

    /// Pick under `ray` and describe the hit, if any.
    pub fn under_ray(ray: &Ray, bodies: &[BodySnapshot]) -> Option<Self> {
        pick(ray, bodies).map(|i| Self::from_snapshot(&bodies[i]))
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | speed {:.1}x | distance {}",
            self.name, self.speed_ratio, self.distance
        )
    }
}
