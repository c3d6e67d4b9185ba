use bytemuck::{Pod, Zeroable};
use scene_core::constants::TONE_MAPPING_EXPOSURE;
use scene_core::PostProcessing;
use wgpu::util::DeviceExt;

use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub(crate) struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
    pub radius: f32,
    pub exposure: f32,
}

impl PostUniforms {
    fn from_settings(post: &PostProcessing, blur_dir: [f32; 2]) -> Self {
        let (bw, bh) = post.bloom_size();
        Self {
            resolution: [bw as f32, bh as f32],
            blur_dir,
            bloom_strength: post.bloom.bloom_strength,
            threshold: post.bloom.bloom_threshold,
            radius: post.bloom.bloom_radius,
            exposure: TONE_MAPPING_EXPOSURE * post.bloom.exposure,
        }
    }
}

// One uniform buffer per pass; writes to a single buffer within one
// submission would all resolve to the last value.
pub(crate) struct PostResources {
    pub bgl0: wgpu::BindGroupLayout,
    pub bgl1: wgpu::BindGroupLayout,
    pub uniforms_base: wgpu::Buffer,
    pub uniforms_blur_h: wgpu::Buffer,
    pub uniforms_blur_v: wgpu::Buffer,
    pub bright_pipeline: wgpu::RenderPipeline,
    pub blur_pipeline: wgpu::RenderPipeline,
    pub composite_pipeline: wgpu::RenderPipeline,
    pub tonemap_pipeline: wgpu::RenderPipeline,
}

pub(crate) struct PostBindGroups {
    pub from_hdr: wgpu::BindGroup,
    pub from_bloom_a: wgpu::BindGroup,
    pub from_bloom_b: wgpu::BindGroup,
    pub bloom_a_only: wgpu::BindGroup,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(scene_core::POST_WGSL.into()),
    });

    let frag = wgpu::ShaderStages::FRAGMENT;
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0, frag),
            helpers::sampler_entry(1, frag),
            helpers::uniform_entry(2, frag),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_entry(0, frag), helpers::sampler_entry(1, frag)],
    });

    let single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("post_pl_single"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let dual = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("post_pl_dual"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });

    let uniform_buffer = |label: &str| {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&PostUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    };

    PostResources {
        uniforms_base: uniform_buffer("post_uniforms"),
        uniforms_blur_h: uniform_buffer("post_uniforms_blur_h"),
        uniforms_blur_v: uniform_buffer("post_uniforms_blur_v"),
        bright_pipeline: helpers::make_post_pipeline(
            device, &single, &shader, "fs_bright", HDR_FORMAT, None,
        ),
        blur_pipeline: helpers::make_post_pipeline(
            device, &single, &shader, "fs_blur", HDR_FORMAT, None,
        ),
        composite_pipeline: helpers::make_post_pipeline(
            device, &dual, &shader, "fs_composite", surface_format, None,
        ),
        tonemap_pipeline: helpers::make_post_pipeline(
            device, &single, &shader, "fs_tonemap", surface_format, None,
        ),
        bgl0,
        bgl1,
    }
}

pub(crate) fn create_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> PostBindGroups {
    let source = |label: &str, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &post.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    };

    PostBindGroups {
        from_hdr: source("post_from_hdr", &targets.hdr_view, &post.uniforms_base),
        from_bloom_a: source("post_from_bloom_a", &targets.bloom_a_view, &post.uniforms_blur_h),
        from_bloom_b: source("post_from_bloom_b", &targets.bloom_b_view, &post.uniforms_blur_v),
        bloom_a_only: device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_bloom_a_only"),
            layout: &post.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }),
    }
}

pub(crate) fn write_uniforms(queue: &wgpu::Queue, post: &PostResources, settings: &PostProcessing) {
    let base = PostUniforms::from_settings(settings, [0.0, 0.0]);
    let blur_h = PostUniforms::from_settings(settings, [1.0, 0.0]);
    let blur_v = PostUniforms::from_settings(settings, [0.0, 1.0]);
    queue.write_buffer(&post.uniforms_base, 0, bytemuck::bytes_of(&base));
    queue.write_buffer(&post.uniforms_blur_h, 0, bytemuck::bytes_of(&blur_h));
    queue.write_buffer(&post.uniforms_blur_v, 0, bytemuck::bytes_of(&blur_v));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
    label: &str,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    pass.set_pipeline(pipeline);
    pass.set_bind_group(0, bg0, &[]);
    if let Some(bg1) = bg1 {
        pass.set_bind_group(1, bg1, &[]);
    }
    pass.draw(0..3, 0..1);
}
