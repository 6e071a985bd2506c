//! Orbit camera controls: left-drag orbits, right-drag pans, wheel zooms.
//!
//! Drag input accumulates into pending rotation and pan deltas that bleed
//! out over the following frames, giving the camera inertia. The damping
//! factor is defined per 60 Hz frame and rescaled for the actual frame time.

use glam::Vec3;
use orrery_config::CameraConfig;
use orrery_input::{DragButton, MouseState};
use orrery_render::Camera;

/// Keeps the camera off the poles, where yaw becomes degenerate.
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Pending motion smaller than this is dropped.
const REST_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct OrbitPose {
    target: Vec3,
    /// Azimuth around +Y; 0 looks from +Z.
    yaw: f32,
    /// Elevation above the XZ plane.
    pitch: f32,
    distance: f32,
}

impl OrbitPose {
    fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        }
    }

    fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pose: OrbitPose,
    home: OrbitPose,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    /// Start at `config.start_position` looking at the origin.
    pub fn new(config: &CameraConfig) -> Self {
        let min_distance = config.min_distance.max(f32::EPSILON);
        let max_distance = config.max_distance.max(min_distance);
        let mut home = OrbitPose::from_eye(Vec3::from_array(config.start_position), Vec3::ZERO);
        home.distance = home.distance.clamp(min_distance, max_distance);

        Self {
            pose: home,
            home,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
            damping: config.damping.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed.clamp(0.0, 0.95),
            pan_speed: config.pan_speed,
            min_distance,
            max_distance,
        }
    }

    /// Orbit by a drag of `dx, dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * self.rotate_speed;
        self.pending_pitch += dy * self.rotate_speed;
    }

    /// Pan by a drag of `dx, dy` pixels along the camera's screen axes.
    pub fn pan(&mut self, dx: f32, dy: f32, right: Vec3, up: Vec3) {
        let scale = self.pan_speed * self.pose.distance;
        self.pending_pan += (-right * dx + up * dy) * scale;
    }

    /// Zoom by wheel lines. Positive moves toward the target.
    pub fn zoom(&mut self, lines: f32) {
        if lines == 0.0 || !lines.is_finite() {
            return;
        }
        let factor = (1.0 - self.zoom_speed).powf(lines);
        self.pose.distance = (self.pose.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Feed this frame's mouse drags and wheel.
    pub fn handle_mouse(&mut self, mouse: &MouseState, camera: &Camera) {
        let orbit = mouse.drag_delta(DragButton::Primary);
        if orbit != glam::Vec2::ZERO {
            self.rotate(orbit.x, orbit.y);
        }
        let pan = mouse.drag_delta(DragButton::Secondary);
        if pan != glam::Vec2::ZERO {
            self.pan(pan.x, pan.y, camera.right(), camera.up());
        }
        self.zoom(mouse.scroll());
    }

    /// Apply the damped share of pending motion for a frame of `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let share = self.frame_share(dt);
        if share <= 0.0 {
            return;
        }
        let yaw = self.pending_yaw * share;
        let pitch = self.pending_pitch * share;
        let pan = self.pending_pan * share;

        self.pose.yaw = wrap_angle(self.pose.yaw + yaw);
        self.pose.pitch = (self.pose.pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.pose.target += pan;

        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_pan -= pan;
        if self.pending_yaw.abs() < REST_EPSILON {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < REST_EPSILON {
            self.pending_pitch = 0.0;
        }
        if self.pending_pan.length_squared() < REST_EPSILON * REST_EPSILON {
            self.pending_pan = Vec3::ZERO;
        }
    }

    /// Fraction of pending motion consumed in a frame of `dt` seconds.
    fn frame_share(&self, dt: f64) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        if self.damping <= 0.0 || self.damping >= 1.0 {
            // Damping disabled: motion lands immediately.
            return 1.0;
        }
        let frames = (dt * 60.0) as f32;
        1.0 - (1.0 - self.damping).powf(frames)
    }

    /// Back to the starting pose with no residual motion.
    pub fn reset(&mut self) {
        self.pose = self.home;
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_pan = Vec3::ZERO;
    }

    pub fn eye(&self) -> Vec3 {
        self.pose.eye()
    }

    pub fn target(&self) -> Vec3 {
        self.pose.target
    }

    pub fn distance(&self) -> f32 {
        self.pose.distance
    }

    pub fn is_moving(&self) -> bool {
        self.pending_yaw != 0.0 || self.pending_pitch != 0.0 || self.pending_pan != Vec3::ZERO
    }

    /// Point `camera` at the current pose.
    pub fn apply(&self, camera: &mut Camera) {
        camera.look_at(self.eye(), self.pose.target);
    }
}

fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseButton};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    fn settle(orbit: &mut OrbitCamera) {
        for _ in 0..2000 {
            orbit.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_starts_at_configured_eye() {
        let orbit = OrbitCamera::new(&CameraConfig::default());
        assert!(approx(orbit.eye(), Vec3::new(0.0, 30.0, 50.0)));
        assert!((orbit.distance() - 3400f32.sqrt()).abs() < 1e-3);
        assert_eq!(orbit.target(), Vec3::ZERO);
    }

    #[test]
    fn test_rotation_is_damped_but_complete() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        orbit.rotate(-100.0, 0.0);
        orbit.update(1.0 / 60.0);
        // First frame applies only the damping share.
        let after_one = orbit.pose.yaw;
        assert!((after_one - 0.5 * 0.05).abs() < 1e-4);
        assert!(orbit.is_moving());

        settle(&mut orbit);
        assert!((orbit.pose.yaw - 0.5).abs() < 1e-3);
        assert!(!orbit.is_moving());
        // Distance is preserved while orbiting.
        assert!((orbit.eye().length() - orbit.distance()).abs() < 1e-3);
    }

    #[test]
    fn test_damping_is_frame_rate_independent() {
        let mut fast = OrbitCamera::new(&CameraConfig::default());
        let mut slow = fast.clone();
        fast.rotate(50.0, 20.0);
        slow.rotate(50.0, 20.0);
        for _ in 0..4 {
            fast.update(1.0 / 120.0);
        }
        for _ in 0..2 {
            slow.update(1.0 / 60.0);
        }
        assert!((fast.pose.yaw - slow.pose.yaw).abs() < 1e-4);
        assert!((fast.pose.pitch - slow.pose.pitch).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        orbit.rotate(0.0, 1.0e5);
        settle(&mut orbit);
        assert!(orbit.pose.pitch <= MAX_PITCH);
        assert!(orbit.eye().y > 0.0);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let config = CameraConfig::default();
        let mut orbit = OrbitCamera::new(&config);
        let start = orbit.distance();
        orbit.zoom(1.0);
        assert!(orbit.distance() < start);
        orbit.zoom(1000.0);
        assert_eq!(orbit.distance(), config.min_distance);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance(), config.max_distance);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        orbit.pan(10.0, 0.0, Vec3::X, Vec3::Y);
        settle(&mut orbit);
        assert!(orbit.target().x < 0.0);
        assert_eq!(orbit.target().y, 0.0);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        let home = orbit.eye();
        orbit.rotate(300.0, -40.0);
        orbit.pan(5.0, 5.0, Vec3::X, Vec3::Y);
        orbit.zoom(3.0);
        orbit.update(0.1);
        orbit.reset();
        assert!(approx(orbit.eye(), home));
        assert!(!orbit.is_moving());
    }

    #[test]
    fn test_mouse_drag_drives_orbit() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        let mut camera = Camera::default();
        orbit.apply(&mut camera);

        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(100.0, 100.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(140.0, 100.0);
        orbit.handle_mouse(&mouse, &camera);
        settle(&mut orbit);

        assert!((orbit.pose.yaw + 40.0 * CameraConfig::default().rotate_speed).abs() < 1e-3);
    }

    #[test]
    fn test_apply_points_camera_at_target() {
        let orbit = OrbitCamera::new(&CameraConfig::default());
        let mut camera = Camera::default();
        orbit.apply(&mut camera);
        let expected = (orbit.target() - orbit.eye()).normalize();
        assert!(approx(camera.forward(), expected));
    }

    #[test]
    fn test_wrap_angle() {
        use std::f32::consts::PI;
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-4 || (wrap_angle(3.0 * PI) + PI).abs() < 1e-4);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
    }
}
