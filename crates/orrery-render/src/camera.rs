//! Perspective camera with reverse-Z projection and cursor ray casting.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

use crate::pipeline::CameraUniform;

/// Perspective camera. Looks down its local -Z axis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Place the camera at `eye` facing `target`, keeping +Y up.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye;
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        // look_at_rh is the inverse of the camera's world rotation.
        self.rotation = Quat::from_mat4(&view.inverse()).normalize();
    }

    pub fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation)).inverse()
    }

    /// Reverse-Z: near maps to depth 1, far to depth 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Ignores degenerate sizes such as a minimized window.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// `viewport` is the surface size in physical pixels.
    pub fn to_uniform(&self, viewport: Vec2, point_size: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
            viewport: [viewport.x, viewport.y, point_size, 0.0],
        }
    }

    /// World-space ray through a cursor position given in physical pixels
    /// with the origin at the top-left corner.
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            2.0 * cursor.x / viewport.x - 1.0,
            1.0 - 2.0 * cursor.y / viewport.y,
        );
        let inverse = self.view_projection_matrix().inverse();
        let unproject = |depth: f32| {
            let p = inverse * ndc.extend(depth).extend(1.0);
            p.xyz() / p.w
        };
        let near = unproject(1.0);
        let far = unproject(0.0);
        let direction = (far - near).try_normalize()?;
        Some(Ray {
            origin: near,
            direction,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: 75f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 4000.0,
        }
    }
}

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first intersection with a sphere, or
    /// `None` on a miss. A ray starting inside the sphere reports the exit.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    fn overview_camera() -> Camera {
        let mut camera = Camera {
            aspect_ratio: 1280.0 / 720.0,
            ..Camera::default()
        };
        camera.look_at(Vec3::new(0.0, 30.0, 50.0), Vec3::ZERO);
        camera
    }

    #[test]
    fn test_default_looks_down_neg_z() {
        let camera = Camera::default();
        assert!(approx(camera.forward(), Vec3::NEG_Z));
        assert!((camera.fov_y.to_degrees() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_look_at_faces_target() {
        let camera = overview_camera();
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!(approx(camera.forward(), expected));
        assert!(camera.up().y > 0.0);
        assert!(camera.right().y.abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let camera = overview_camera();
        let reconstructed = camera.view_matrix().inverse().col(3).truncate();
        assert!(approx(reconstructed, camera.position));
    }

    #[test]
    fn test_reverse_z_depth_range() {
        let camera = overview_camera();
        let vp = camera.view_projection_matrix();
        let depth = |p: Vec3| {
            let clip = vp * p.extend(1.0);
            clip.z / clip.w
        };
        let near_point = camera.position + camera.forward() * camera.near;
        let far_point = camera.position + camera.forward() * camera.far;
        assert!((depth(near_point) - 1.0).abs() < 1e-3);
        assert!(depth(far_point).abs() < 1e-3);
        // Closer geometry gets the larger depth value.
        assert!(depth(Vec3::ZERO) > depth(Vec3::new(0.0, 0.0, -40.0)));
    }

    #[test]
    fn test_set_aspect_ratio_ignores_zero() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect_ratio(1920.0, 0.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_carries_viewport_and_eye() {
        let camera = overview_camera();
        let uniform = camera.to_uniform(Vec2::new(1280.0, 720.0), 2.0);
        assert_eq!(uniform.viewport, [1280.0, 720.0, 2.0, 0.0]);
        assert_eq!(uniform.eye, [0.0, 30.0, 50.0, 1.0]);
    }

    #[test]
    fn test_center_ray_hits_sun() {
        let camera = overview_camera();
        let viewport = Vec2::new(1280.0, 720.0);
        let ray = camera.screen_ray(viewport * 0.5, viewport).unwrap();
        assert!(approx(ray.direction, camera.forward()));

        let t = ray.intersect_sphere(Vec3::ZERO, 5.0).unwrap();
        let hit = ray.at(t);
        assert!((hit.length() - 5.0).abs() < 1e-2);
        // The visible hemisphere faces the camera.
        assert!(hit.dot(camera.position) > 0.0);
    }

    #[test]
    fn test_corner_ray_misses_sun() {
        let camera = overview_camera();
        let viewport = Vec2::new(1280.0, 720.0);
        let ray = camera.screen_ray(Vec2::ZERO, viewport).unwrap();
        assert_eq!(ray.intersect_sphere(Vec3::ZERO, 5.0), None);
    }

    #[test]
    fn test_screen_ray_rejects_empty_viewport() {
        let camera = overview_camera();
        assert!(camera.screen_ray(Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_ray_sphere_cases() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        assert!((ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap() - 8.0).abs() < 1e-5);
        // Behind the origin.
        assert_eq!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 2.0), None);
        // Off to the side.
        assert_eq!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0), None);
        // Starting inside reports the exit point.
        let inside = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert!((inside.intersect_sphere(Vec3::ZERO, 3.0).unwrap() - 3.0).abs() < 1e-5);
    }
}
