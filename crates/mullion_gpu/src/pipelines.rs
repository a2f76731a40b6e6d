//! Pipeline construction and the shared render context.
//!
//! All GPU programs the decoration renderer ever uses are compiled and
//! linked once at start-up and kept read-only for the renderer's lifetime.
//! Construction is fallible: shader and pipeline validation errors are
//! captured through wgpu error scopes and surfaced as [`PipelineError`]
//! instead of aborting, so the caller can degrade to undecorated rendering.

use bytemuck::{Pod, Zeroable};
use tracing::info;

use crate::error::PipelineError;
use crate::mesh::DecorationVertex;
use crate::shaders::{
    DECORATION_SHADER, EXTERNAL_TEXTURE_SHADER, RGBA_TEXTURE_SHADER, RGB_TEXTURE_SHADER,
};

/// Uniforms of the decoration pipeline. Layout must match the WGSL
/// `DecorationUniforms` struct (mat3x3 is three padded columns).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DecorationUniforms {
    pub proj: [[f32; 4]; 3],
    pub fg_color: [f32; 4],
    pub bg_color: [f32; 4],
    pub outline: f32,
    pub blur: f32,
    pub _pad: [f32; 2],
}

/// Uniforms of the texture pipelines, matching WGSL `TextureUniforms`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TextureUniforms {
    pub proj: [[f32; 4]; 3],
    pub tint: [f32; 4],
}

/// The compiled, read-only GPU state shared by all decoration draws.
///
/// Built once when the renderer starts; any number of render calls may
/// consume it afterwards without synchronization.
pub struct RenderContext {
    pub(crate) decoration_pipeline: wgpu::RenderPipeline,
    pub(crate) external_pipeline: wgpu::RenderPipeline,
    pub(crate) rgb_pipeline: wgpu::RenderPipeline,
    pub(crate) rgba_pipeline: wgpu::RenderPipeline,
    pub(crate) decoration_layout: wgpu::BindGroupLayout,
    pub(crate) texture_layout: wgpu::BindGroupLayout,
    pub(crate) sampler: wgpu::Sampler,
}

fn create_shader_module(
    device: &wgpu::Device,
    label: &'static str,
    source: &str,
) -> Result<wgpu::ShaderModule, PipelineError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(PipelineError::Shader {
            label,
            message: error.to_string(),
        });
    }
    Ok(module)
}

fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<DecorationVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 8,
                shader_location: 1,
            },
        ],
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &'static str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, PipelineError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_buffer_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // Decoration colors and content tints are premultiplied.
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
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
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(PipelineError::Pipeline {
            label,
            message: error.to_string(),
        });
    }
    Ok(pipeline)
}

impl RenderContext {
    /// Compiles the fixed pipeline set for the given render target format.
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
    ) -> Result<Self, PipelineError> {
        let decoration_module =
            create_shader_module(device, "decoration shader", DECORATION_SHADER)?;
        let external_module =
            create_shader_module(device, "external texture shader", EXTERNAL_TEXTURE_SHADER)?;
        let rgb_module = create_shader_module(device, "rgb texture shader", RGB_TEXTURE_SHADER)?;
        let rgba_module =
            create_shader_module(device, "rgba texture shader", RGBA_TEXTURE_SHADER)?;

        let decoration_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("decoration bind group layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
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
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let decoration_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("decoration pipeline layout"),
                bind_group_layouts: &[&decoration_layout],
                push_constant_ranges: &[],
            });
        let texture_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("texture pipeline layout"),
                bind_group_layouts: &[&texture_layout],
                push_constant_ranges: &[],
            });

        let decoration_pipeline = create_pipeline(
            device,
            "decoration pipeline",
            &decoration_pipeline_layout,
            &decoration_module,
            target_format,
        )?;
        let external_pipeline = create_pipeline(
            device,
            "external texture pipeline",
            &texture_pipeline_layout,
            &external_module,
            target_format,
        )?;
        let rgb_pipeline = create_pipeline(
            device,
            "rgb texture pipeline",
            &texture_pipeline_layout,
            &rgb_module,
            target_format,
        )?;
        let rgba_pipeline = create_pipeline(
            device,
            "rgba texture pipeline",
            &texture_pipeline_layout,
            &rgba_module,
            target_format,
        )?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("content sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        info!("decoration pipelines ready for {target_format:?}");

        Ok(Self {
            decoration_pipeline,
            external_pipeline,
            rgb_pipeline,
            rgba_pipeline,
            decoration_layout,
            texture_layout,
            sampler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layouts_match_wgsl_sizes() {
        // mat3x3 (48) + 2 x vec4 (32) + two scalars padded to 16.
        assert_eq!(std::mem::size_of::<DecorationUniforms>(), 96);
        // mat3x3 (48) + vec4 (16).
        assert_eq!(std::mem::size_of::<TextureUniforms>(), 64);
    }

    #[test]
    fn vertex_layout_is_interleaved_pos_uv() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
