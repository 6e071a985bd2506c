//! Render pass configuration and per-frame command encoding.

/// Color and depth setup for the scene pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderPassBuilder<'a> {
    clear_color: wgpu::Color,
    clear: bool,
    depth: Option<&'a wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPassBuilder<'a> {
    /// Clears to black with no depth attachment.
    pub fn new() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            clear: true,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self.clear = true;
        self
    }

    /// Draw over what the frame already holds instead of clearing.
    pub fn keep_contents(mut self) -> Self {
        self.clear = false;
        self
    }

    /// Attach a reverse-Z depth target, cleared to the far plane.
    pub fn depth(mut self, view: &'a wgpu::TextureView) -> Self {
        self.depth = Some(view);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        color_view: &'e wgpu::TextureView,
    ) -> wgpu::RenderPass<'e>
    where
        'a: 'e,
    {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: if self.clear {
                    wgpu::LoadOp::Clear(self.clear_color)
                } else {
                    wgpu::LoadOp::Load
                },
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}

/// One frame's encoder plus the surface texture it will present.
///
/// [`submit`](Self::submit) consumes the encoder, so a frame cannot be
/// presented twice. Dropping without submitting discards the frame.
pub struct FrameEncoder<'q> {
    encoder: wgpu::CommandEncoder,
    prelude: Vec<wgpu::CommandBuffer>,
    queue: &'q wgpu::Queue,
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl<'q> FrameEncoder<'q> {
    pub fn new(
        device: &wgpu::Device,
        queue: &'q wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            prelude: Vec::new(),
            queue,
            surface_texture,
            view,
        }
    }

    pub fn begin_render_pass<'e>(
        &'e mut self,
        builder: &RenderPassBuilder<'e>,
    ) -> wgpu::RenderPass<'e> {
        builder.begin(&mut self.encoder, &self.view)
    }

    pub fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
        &mut self.encoder
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> [u32; 2] {
        let texture = &self.surface_texture.texture;
        [texture.width(), texture.height()]
    }

    /// Queue command buffers that must run before this frame's own commands.
    pub fn push_prelude(&mut self, buffers: impl IntoIterator<Item = wgpu::CommandBuffer>) {
        self.prelude.extend(buffers);
    }

    /// Submit the recorded commands and present.
    pub fn submit(self) {
        let Self {
            encoder,
            prelude,
            queue,
            surface_texture,
            view,
        } = self;
        drop(view);
        queue.submit(prelude.into_iter().chain([encoder.finish()]));
        surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_clear_black_without_depth() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color, wgpu::Color::BLACK);
        assert!(builder.clear);
        assert!(builder.depth.is_none());
        assert!(builder.label.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let light = wgpu::Color {
            r: 0.87,
            g: 0.87,
            b: 0.87,
            a: 1.0,
        };
        let builder = RenderPassBuilder::new().clear_color(light).label("scene");
        assert_eq!(builder.clear_color, light);
        assert_eq!(builder.label, Some("scene"));
    }

    #[test]
    fn test_keep_contents_skips_clear() {
        let builder = RenderPassBuilder::new().keep_contents().label("overlay");
        assert!(!builder.clear);
        // A later clear color turns clearing back on.
        assert!(builder.clear_color(wgpu::Color::WHITE).clear);
    }
}
