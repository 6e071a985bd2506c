//! egui overlay drawn on top of the scene.

use egui::epaint::{ClippedPrimitive, ImageDelta, TextureId};

use crate::pass::{FrameEncoder, RenderPassBuilder};

/// Tessellated UI for one frame.
#[derive(Default)]
pub struct OverlayFrame {
    pub primitives: Vec<ClippedPrimitive>,
    /// Physical pixels per egui point.
    pub pixels_per_point: f32,
}

/// Owns the egui wgpu renderer and its textures.
pub struct OverlayRenderer {
    renderer: egui_wgpu::Renderer,
}

impl OverlayRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(
                device,
                surface_format,
                egui_wgpu::RendererOptions::default(),
            ),
        }
    }

    /// Upload new or changed textures. Call every frame, drawn or not, so
    /// the font atlas is never missed.
    pub fn update_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        set: &[(TextureId, ImageDelta)],
    ) {
        for (id, delta) in set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }

    /// Release textures egui no longer needs. Call after the frame is submitted.
    pub fn free_textures(&mut self, free: &[TextureId]) {
        for id in free {
            self.renderer.free_texture(id);
        }
    }

    /// Record the overlay into `frame` on top of whatever it already holds.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &mut FrameEncoder<'_>,
        overlay: &OverlayFrame,
    ) {
        if overlay.primitives.is_empty() {
            return;
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: frame.size(),
            pixels_per_point: overlay.pixels_per_point,
        };
        let uploads = self.renderer.update_buffers(
            device,
            queue,
            frame.encoder(),
            &overlay.primitives,
            &screen,
        );
        frame.push_prelude(uploads);

        let builder = RenderPassBuilder::new().keep_contents().label("overlay-pass");
        let mut pass = frame.begin_render_pass(&builder).forget_lifetime();
        self.renderer.render(&mut pass, &overlay.primitives, &screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::test_device;

    #[test]
    fn test_overlay_accepts_font_atlas() {
        let Some((device, queue)) = test_device() else {
            return;
        };
        let mut overlay = OverlayRenderer::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb);

        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::Window::new("Controls").show(ctx, |ui| {
                ui.label("Mercury:");
            });
        });
        assert!(!output.textures_delta.set.is_empty());
        overlay.update_textures(&device, &queue, &output.textures_delta.set);
        overlay.free_textures(&output.textures_delta.free);
    }
}
