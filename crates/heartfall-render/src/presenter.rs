//! Window presentation: host page colour with the overlay canvas on top

use crate::canvas::PixelCanvas;
use crate::context::{RenderContext, RenderError};
use heartfall_core::Color;

/// Overlay texture sized to the last uploaded canvas
struct OverlayTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

/// Clears the frame to the page colour and composites the overlay canvas
/// with premultiplied-alpha blending
pub struct FramePresenter {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    page_color: wgpu::Color,
    overlay: Option<OverlayTexture>,
}

impl FramePresenter {
    pub fn new(context: &RenderContext, page_color: Color) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Overlay Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("overlay_shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Overlay BGL"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Overlay Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Overlay Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_overlay"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_overlay"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Canvas and surface share a pixel grid, so sample texels as-is
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Overlay Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            page_color: to_wgpu_color(page_color),
            overlay: None,
        }
    }

    /// Present one frame. With no canvas only the page colour is shown and
    /// the overlay texture is released.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn present(
        &mut self,
        context: &RenderContext,
        canvas: Option<&PixelCanvas>,
    ) -> Result<(), RenderError> {
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(RenderError::SurfaceError(e.to_string())),
        };

        match canvas {
            Some(canvas) => self.upload(context, canvas),
            None => self.overlay = None,
        }

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Overlay Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.page_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(overlay) = &self.overlay {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &overlay.bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Copy the canvas into the overlay texture, recreating it on size change
    fn upload(&mut self, context: &RenderContext, canvas: &PixelCanvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let stale = self
            .overlay
            .as_ref()
            .map_or(true, |o| o.width != width || o.height != height);
        if stale {
            self.overlay = Some(self.create_overlay(&context.device, width, height));
        }
        let Some(overlay) = &self.overlay else {
            return;
        };

        context.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &overlay.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.pixels(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn create_overlay(&self, device: &wgpu::Device, width: u32, height: u32) -> OverlayTexture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Overlay Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        tracing::debug!(width, height, "overlay texture allocated");

        OverlayTexture {
            texture,
            bind_group,
            width,
            height,
        }
    }
}

fn to_wgpu_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_color_conversion() {
        let c = to_wgpu_color(Color::from_hex(0xFFF1F2));
        assert_eq!(c.r, 1.0);
        assert!((c.g - 241.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 242.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
