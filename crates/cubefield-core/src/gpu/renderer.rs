use super::pipeline::{compile_stage, link_pipeline};
use super::targets::{create_texture_view, DEPTH_FORMAT};
use crate::config::SceneConfig;
use crate::constants::{LABEL_QUAD_SIZE, LABEL_TEXTURE_SIZE};
use crate::error::SceneError;
use crate::instances::build_instances;
use crate::labels::{
    label_center, layout_labels, Label, LabelImage, LabelRasterizer, DEFAULT_LABELS,
};
use crate::mesh::{cube_template, Vertex};
use crate::scene::FrameParams;
use crate::shader::ShaderStage;
use crate::uniforms::{LabelInstance, LabelUniforms, SceneUniforms};
use crate::{CUBE_FRAG_WGSL, CUBE_VERT_WGSL, LABEL_FRAG_WGSL, LABEL_VERT_WGSL};
use wgpu::util::DeviceExt;

struct LabelLayer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
    _texture: wgpu::Texture,
}

/// Cube lattice plus optional label billboards, drawn into a caller-owned
/// color target and depth target.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    labels: Option<LabelLayer>,
    clear_color: wgpu::Color,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl SceneRenderer {
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        config: &SceneConfig,
        rasterizer: &mut dyn LabelRasterizer,
    ) -> Result<Self, SceneError> {
        let vs = compile_stage(device, ShaderStage::Vertex, "cube_vs", CUBE_VERT_WGSL).await?;
        let fs = compile_stage(device, ShaderStage::Fragment, "cube_fs", CUBE_FRAG_WGSL).await?;

        let instances = build_instances(&config.grid, cube_template())?;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: instances.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_indices"),
            contents: instances.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::info!(
            "[gpu] uploaded {} cubes ({} KiB vertex data)",
            instances.cell_count,
            instances.vertex_bytes().len() / 1024
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = link_pipeline(
            device,
            &wgpu::RenderPipelineDescriptor {
                label: Some("cube_pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &vs,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &fs,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            },
        )
        .await?;

        let labels = if config.labels {
            let placed = layout_labels(&config.grid, &DEFAULT_LABELS);
            let layer =
                LabelLayer::new(device, queue, color_format, config, &placed, rasterizer).await?;
            Some(layer)
        } else {
            None
        };

        let [r, g, b, a] = config.clear_color;
        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            labels,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Uploads this frame's uniforms; the only buffer writes after startup.
    pub fn prepare(&self, queue: &wgpu::Queue, frame: &FrameParams) {
        let u = SceneUniforms::from_frame(frame);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
        if let Some(labels) = &self.labels {
            let lu = LabelUniforms::from_frame(frame, LABEL_QUAD_SIZE * 0.5);
            queue.write_buffer(&labels.uniform_buffer, 0, bytemuck::bytes_of(&lu));
        }
    }

    /// Clears color and depth, draws every cube, then the labels on top.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        frame: &FrameParams,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..frame.index_count, 0, 0..1);

        if let Some(labels) = &self.labels {
            rpass.set_pipeline(&labels.pipeline);
            rpass.set_bind_group(0, &labels.bind_group, &[]);
            rpass.set_vertex_buffer(0, labels.instance_buffer.slice(..));
            rpass.draw(0..6, 0..labels.count);
        }
    }
}

impl LabelLayer {
    async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        config: &SceneConfig,
        labels: &[Label],
        rasterizer: &mut dyn LabelRasterizer,
    ) -> Result<Self, SceneError> {
        let vs = compile_stage(device, ShaderStage::Vertex, "label_vs", LABEL_VERT_WGSL).await?;
        let fs = compile_stage(device, ShaderStage::Fragment, "label_fs", LABEL_FRAG_WGSL).await?;

        let size = LABEL_TEXTURE_SIZE;
        let (texture, view) = create_texture_view(
            device,
            "label_tex",
            wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: labels.len().max(1) as u32,
            },
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            wgpu::TextureViewDimension::D2Array,
        );
        for label in labels {
            let image = rasterizer.rasterize(&label.text, size).map_err(|e| {
                SceneError::InvalidConfig(format!("label `{}` failed to rasterize: {e}", label.text))
            })?;
            if image.size != size || image.rgba.len() != (size as usize).pow(2) * 4 {
                return Err(SceneError::InvalidConfig(format!(
                    "label `{}` rasterized to {}px, expected {size}px",
                    label.text, image.size
                )));
            }
            write_layer(queue, &texture, label.cell_index as u32, &image);
        }

        let instances: Vec<LabelInstance> = labels
            .iter()
            .map(|l| LabelInstance {
                center: label_center(l.cell, config.origin).to_array(),
                layer: l.cell_index as u32,
            })
            .collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("label_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("label_uniforms"),
            size: std::mem::size_of::<LabelUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("label_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("label_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("label_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("label_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = link_pipeline(
            device,
            &wgpu::RenderPipelineDescriptor {
                label: Some("label_pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &vs,
                    entry_point: Some("vs_label"),
                    buffers: &[LabelInstance::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                // labels always win over cubes
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &fs,
                    entry_point: Some("fs_label"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            },
        )
        .await?;

        Ok(Self {
            pipeline,
            uniform_buffer,
            instance_buffer,
            bind_group,
            count: instances.len() as u32,
            _texture: texture,
        })
    }
}

fn write_layer(queue: &wgpu::Queue, texture: &wgpu::Texture, layer: u32, image: &LabelImage) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.size),
            rows_per_image: Some(image.size),
        },
        wgpu::Extent3d {
            width: image.size,
            height: image.size,
            depth_or_array_layers: 1,
        },
    );
}
