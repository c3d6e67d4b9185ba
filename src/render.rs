use std::sync::atomic::{AtomicBool, Ordering};

use scene_core::constants::PLANE_SIZE;
use scene_core::settings::texture_fits;
use scene_core::{PlaneGeometry, SceneState};
use web_sys as web;

use crate::constants::CLEAR_COLOR;

mod helpers;
mod post;
mod targets;
mod texture;
mod wave;

pub use texture::fetch_rgba;

use post::{PostBindGroups, PostResources};
use targets::RenderTargets;
use texture::MaterialTexture;
use wave::WaveResources;

static DEVICE_LOST: AtomicBool = AtomicBool::new(false);

/// Set once the browser reports the GPU device as lost; the frame loop
/// stops instead of submitting to a dead device.
pub fn device_lost() -> bool {
    DEVICE_LOST.load(Ordering::SeqCst)
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    wave: WaveResources,
    material: MaterialTexture,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    bind_groups: PostBindGroups,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, width: u32, height: u32) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        DEVICE_LOST.store(false, Ordering::SeqCst);
        device.set_device_lost_callback(|reason, message| {
            log::error!("[gpu] device lost ({:?}): {}", reason, message);
            DEVICE_LOST.store(true, Ordering::SeqCst);
        });

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let geometry = PlaneGeometry::new(
            PLANE_SIZE,
            PLANE_SIZE,
            scene_core::constants::PLANE_SEGMENTS,
            scene_core::constants::PLANE_SEGMENTS,
        )?;
        let material = MaterialTexture::placeholder(&device, &queue);
        let wave = WaveResources::new(&device, &geometry, &material.view);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = helpers::linear_sampler(&device, "linear_sampler");
        let post = post::create_post_resources(&device, format);
        let bind_groups = post::create_bind_groups(&device, &post, &linear_sampler, &targets);

        log::info!(
            "[gpu] ready: {}x{} {:?}, {} indices",
            width,
            height,
            format,
            geometry.index_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            wave,
            material,
            targets,
            linear_sampler,
            post,
            bind_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    /// Swaps the material's texture for a decoded image. Images larger than
    /// the device allows are refused and the current texture stays bound.
    pub fn set_texture(&mut self, image: &image::RgbaImage) -> anyhow::Result<()> {
        let (width, height) = image.dimensions();
        let max = self.device.limits().max_texture_dimension_2d;
        if !texture_fits(width, height, max) {
            anyhow::bail!("image is {}x{}, device limit is {}", width, height, max);
        }
        self.material = MaterialTexture::from_image(&self.device, &self.queue, image);
        self.wave.rebind_texture(&self.device, &self.material.view);
        Ok(())
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            self.bind_groups =
                post::create_bind_groups(&self.device, &self.post, &self.linear_sampler, &self.targets);
        }
    }

    /// Reapplies the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let (width, height) = scene.viewport.backing_size();
        self.resize_if_needed(width, height);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.wave.uniform_buffer,
            0,
            bytemuck::bytes_of(&scene.packed_uniforms()),
        );
        post::write_uniforms(&self.queue, &self.post, &scene.post);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.wave.draw(&mut pass);
        }

        let groups = &self.bind_groups;
        if scene.post.enabled {
            post::blit(
                &mut encoder,
                &self.targets.bloom_a_view,
                &self.post.bright_pipeline,
                &groups.from_hdr,
                None,
                "bright_pass",
            );
            post::blit(
                &mut encoder,
                &self.targets.bloom_b_view,
                &self.post.blur_pipeline,
                &groups.from_bloom_a,
                None,
                "blur_h",
            );
            post::blit(
                &mut encoder,
                &self.targets.bloom_a_view,
                &self.post.blur_pipeline,
                &groups.from_bloom_b,
                None,
                "blur_v",
            );
            post::blit(
                &mut encoder,
                &view,
                &self.post.composite_pipeline,
                &groups.from_hdr,
                Some(&groups.bloom_a_only),
                "composite",
            );
        } else {
            post::blit(
                &mut encoder,
                &view,
                &self.post.tonemap_pipeline,
                &groups.from_hdr,
                None,
                "tonemap",
            );
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
