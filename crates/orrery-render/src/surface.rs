//! Window surface sizing.
//!
//! Tracks the physical size the swapchain should use and the display scale
//! factor. A zero-size window (minimized, or a Wayland surface before the
//! compositor assigns a size) keeps the last usable size and is reported as
//! minimized so the frame can be skipped.

use glam::Vec2;

/// Physical pixel dimensions, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceWrapper {
    size: PhysicalSize,
    scale_factor: f64,
    minimized: bool,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            size: PhysicalSize {
                width: physical_width.max(1),
                height: physical_height.max(1),
            },
            scale_factor: sanitize_scale(scale_factor),
            minimized: physical_width == 0 || physical_height == 0,
        }
    }

    /// Record a `Resized` event. Returns the new size when the swapchain
    /// must be reconfigured.
    pub fn handle_resize(&mut self, physical_width: u32, physical_height: u32) -> Option<PhysicalSize> {
        if physical_width == 0 || physical_height == 0 {
            self.minimized = true;
            return None;
        }
        let was_minimized = std::mem::replace(&mut self.minimized, false);
        let size = PhysicalSize {
            width: physical_width,
            height: physical_height,
        };
        if size == self.size && !was_minimized {
            return None;
        }
        self.size = size;
        Some(size)
    }

    /// Record a `ScaleFactorChanged` event; the physical size follows.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        self.scale_factor = sanitize_scale(scale_factor);
        self.handle_resize(physical_width, physical_height)
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Convert a length in logical pixels to physical pixels.
    pub fn to_physical(&self, logical: f32) -> f32 {
        logical * self.scale_factor as f32
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_zero_size() {
        let s = SurfaceWrapper::new(0, 0, 1.0);
        assert_eq!(s.size(), PhysicalSize { width: 1, height: 1 });
        assert!(s.is_minimized());

        let s = SurfaceWrapper::new(1280, 720, 2.0);
        assert!(!s.is_minimized());
        assert!((s.size().aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_reports_changes_only() {
        let mut s = SurfaceWrapper::new(800, 600, 1.0);
        assert_eq!(s.handle_resize(800, 600), None);
        assert_eq!(
            s.handle_resize(1024, 768),
            Some(PhysicalSize {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(s.size().as_vec2(), Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn test_minimize_keeps_last_size() {
        let mut s = SurfaceWrapper::new(800, 600, 1.0);
        assert_eq!(s.handle_resize(0, 0), None);
        assert!(s.is_minimized());
        assert_eq!(s.size().width, 800);

        // Restoring at the same size still reconfigures.
        assert!(s.handle_resize(800, 600).is_some());
        assert!(!s.is_minimized());
    }

    #[test]
    fn test_scale_factor_change() {
        let mut s = SurfaceWrapper::new(800, 600, 1.0);
        let resized = s.handle_scale_factor_changed(2.0, 1600, 1200);
        assert_eq!(resized.map(|r| r.width), Some(1600));
        assert_eq!(s.scale_factor(), 2.0);
        assert_eq!(s.to_physical(1.5), 3.0);
    }

    #[test]
    fn test_invalid_scale_factor_falls_back() {
        let s = SurfaceWrapper::new(800, 600, 0.0);
        assert_eq!(s.scale_factor(), 1.0);
        let s = SurfaceWrapper::new(800, 600, f64::NAN);
        assert_eq!(s.scale_factor(), 1.0);
    }
}
