//! SDF-based WebGPU card pipeline
//!
//! Draws the card front, the scratch layer and confetti in one fullscreen
//! fragment pass. The canvas is transparent everywhere else, so the reward
//! markup underneath shows through scratched holes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::card::{CardVariant, ScratchSurface};
use crate::consts::*;
use crate::settings::Settings;

/// Maximum number of confetti pieces drawn
const MAX_CONFETTI: usize = 128;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2],  // offset 0
    time: f32,             // offset 8
    flip: f32,             // offset 12 - 0 = front, 1 = scratch side
    card_origin: [f32; 2], // offset 16 - top-left, physical pixels
    card_size: [f32; 2],   // offset 24 - physical pixels
    card_units: [f32; 2],  // offset 32 - card size in local units
    corner_radius: f32,    // offset 40
    variant: u32,          // offset 44 - 0 = classic, 1 = lucky
    confetti_count: u32,   // offset 48
    mask_pattern: u32,     // offset 52
    _pad: [u32; 2],        // pad to 64 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ConfettiData {
    pos: [f32; 2],
    size: [f32; 2],
    rotation: f32, // radians
    opacity: f32,
    color: u32, // 0xRRGGBBAA
    _pad: u32,
}

/// Where the card sits on the canvas, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardLayout {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    /// CSS pixel to physical pixel ratio
    pub pixel_ratio: f32,
}

// ============================================================================
// CARD RENDER STATE
// ============================================================================

pub struct CardRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    confetti_buffer: wgpu::Buffer,

    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    mask_texture: wgpu::Texture,
    mask_size: (u32, u32),

    pub size: (u32, u32),
    start_time: f64,

    /// Animated flip amount, 0 = front, 1 = scratch side
    flip: f32,
}

impl CardRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("card-device"),
                required_features: wgpu::Features::empty(),
                // Confetti lives in a storage buffer, which the WebGL2 limits forbid
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);
        log::info!("Surface alpha modes: {:?}", surface_caps.alpha_modes);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // The reward markup sits under the canvas, so we need a see-through surface
        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            log::warn!("Premultiplied alpha unavailable, scratched holes will not show the reward");
            surface_caps.alpha_modes[0]
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!(
            "Surface config: {}x{}, format: {:?}, alpha: {:?}",
            width,
            height,
            surface_format,
            config.alpha_mode
        );
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("card_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("card_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let confetti_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("confetti"),
            size: (std::mem::size_of::<ConfettiData>() * MAX_CONFETTI) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("mask_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("card_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let mask_size = (CLASSIC_WIDTH as u32, CLASSIC_HEIGHT as u32);
        let mask_texture = create_mask_texture(&device, mask_size);
        let bind_group = create_bind_group(
            &device,
            &bind_group_layout,
            &globals_buffer,
            &confetti_buffer,
            &mask_texture,
            &sampler,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("card_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("card_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
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
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            confetti_buffer,
            bind_group_layout,
            bind_group,
            sampler,
            mask_texture,
            mask_size,
            size: (width, height),
            start_time: 0.0,
            flip: 0.0,
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn set_start_time(&mut self, time: f64) {
        self.start_time = time;
    }

    /// Current animated flip amount (0 = front, 1 = scratch side)
    pub fn flip_amount(&self) -> f32 {
        self.flip
    }

    /// Snap the flip animation, e.g. when a new card is mounted
    pub fn snap_flip(&mut self, flipped: bool) {
        self.flip = if flipped { 1.0 } else { 0.0 };
    }

    /// Recreate the mask texture when the card size changes
    fn ensure_mask_size(&mut self, size: (u32, u32)) -> bool {
        if size == self.mask_size {
            return false;
        }
        log::info!("Mask texture resized to {}x{}", size.0, size.1);
        self.mask_texture = create_mask_texture(&self.device, size);
        self.bind_group = create_bind_group(
            &self.device,
            &self.bind_group_layout,
            &self.globals_buffer,
            &self.confetti_buffer,
            &self.mask_texture,
            &self.sampler,
        );
        self.mask_size = size;
        true
    }

    fn upload_mask(&self, bytes: &[u8]) {
        let (width, height) = self.mask_size;
        self.queue.write_texture(
            self.mask_texture.as_image_copy(),
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Update GPU buffers from the mounted card and render
    pub fn render(
        &mut self,
        card: Option<&mut ScratchSurface>,
        layout: CardLayout,
        settings: &Settings,
        dt: f32,
        time: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        // time is ms since page load from requestAnimationFrame, convert to seconds
        let elapsed = ((time - self.start_time) / 1000.0) as f32;

        let mut globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            time: elapsed,
            flip: self.flip,
            card_origin: layout.origin,
            card_size: [0.0, 0.0],
            card_units: [1.0, 1.0],
            corner_radius: CARD_CORNER_RADIUS * layout.pixel_ratio.max(1.0),
            variant: 0,
            confetti_count: 0,
            mask_pattern: if settings.quality.mask_pattern() { 1 } else { 0 },
            _pad: [0; 2],
        };

        if let Some(card) = card {
            // Ease the flip toward the card's side
            let target = if card.flipped() { 1.0 } else { 0.0 };
            if settings.animate_flip() {
                let step = FLIP_SPEED * dt.max(0.0);
                self.flip += (target - self.flip).clamp(-step, step);
            } else {
                self.flip = target;
            }

            let mask = card.mask();
            let mask_size = (mask.width(), mask.height());
            let resized = self.ensure_mask_size(mask_size);
            if card.mask_mut().take_dirty() || resized {
                self.upload_mask(card.mask().bytes());
            }

            let config = card.config();
            globals.flip = self.flip;
            globals.card_size = layout.size;
            globals.card_units = [config.width, config.height];
            globals.variant = match config.variant {
                CardVariant::Classic => 0,
                CardVariant::Lucky => 1,
            };

            let confetti = card.confetti();
            let t = confetti.time();
            let mut confetti_data = vec![ConfettiData::zeroed(); MAX_CONFETTI];
            let mut count = 0;
            for (slot, piece) in confetti_data.iter_mut().zip(confetti.pieces()) {
                let pos = piece.position(t) * layout.pixel_ratio;
                let size = piece.size * layout.pixel_ratio;
                *slot = ConfettiData {
                    pos: [pos.x, pos.y],
                    size: [size.x, size.y],
                    rotation: piece.rotation(t).to_radians(),
                    opacity: piece.opacity(t),
                    color: piece.color,
                    _pad: 0,
                };
                count += 1;
            }
            globals.confetti_count = count;
            if count > 0 {
                self.queue.write_buffer(
                    &self.confetti_buffer,
                    0,
                    bytemuck::cast_slice(&confetti_data[..count as usize]),
                );
            }
        } else {
            self.flip = 0.0;
        }

        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Render
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("card_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("card_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_mask_texture(device: &wgpu::Device, (width, height): (u32, u32)) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scratch_mask"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::R8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    globals_buffer: &wgpu::Buffer,
    confetti_buffer: &wgpu::Buffer,
    mask_texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let mask_view = mask_texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("card_bind_group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: confetti_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&mask_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_struct_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<Globals>(), 64);
        assert_eq!(std::mem::size_of::<ConfettiData>(), 32);
    }

    #[test]
    fn test_confetti_capacity_fits_a_burst() {
        assert!(MAX_CONFETTI >= CONFETTI_PIECES);
    }
}
