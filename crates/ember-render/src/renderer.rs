// Copyright 2025 Ember Engine Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The renderer lifecycle contract and the built-in forward renderer.
//!
//! [`ForwardRenderer`] draws the world in two passes. The geometry pass
//! rasterizes every entity carrying GPU resource markers into offscreen
//! color and depth targets; the composite pass stretches the result over the
//! window surface with a fullscreen triangle. GPU meshes and materials are
//! created lazily, the first frame an entity names them, and shared by asset
//! name across entities.

use std::collections::HashMap;

use bytemuck::Zeroable;

use ember_core::math::{Extent2D, Extent3D, Mat4};
use ember_core::render::{FrameContext, RendererSettings, ViewportState};
use ember_core::rhi::{
    BufferDescriptor, BufferId, BufferUsage, ClearDepthStencil, ClearValue,
    ColorAttachmentDescriptor, DepthStencilAttachmentDescriptor, Format, FramebufferDescriptor,
    FramebufferId, GraphicsPipelineDescriptor, GraphicsPipelineId, InputAssemblyDescriptor,
    LoadOp, ResourceError, SampleCount, ShaderSourceData, TextureDescriptor, TextureId,
    TextureType, TextureUploadDescriptor, UniformValue, VertexAttributeDescriptor,
    VertexInputDescriptor,
};
use ember_core::{GraphicsDevice, RenderError};

use crate::assets::{AssetProvider, CpuImage};
use crate::components::{
    GpuMaterialRef, GpuMeshRef, MaterialSource, MeshSource, NeedsGpuResources, Transform,
};
use crate::gpu::{GpuMaterial, GpuMaterialUniforms, GpuMesh, VertexAttributes, POSITION_STRIDE};
use crate::shaders;
use crate::view::ViewInfo;
use crate::world::World;

/// Uniform block binding the material data is expected at.
const MATERIAL_BLOCK_BINDING: u32 = 0;

/// Number of sampler units the material shaders read from.
const MATERIAL_TEXTURE_UNITS: u32 = 4;

/// Lifecycle contract between the host application and a renderer.
///
/// The host owns the device and drives the renderer through these four
/// entry points; the renderer owns every GPU resource it creates between
/// `load` and `unload`.
pub trait Renderer {
    /// Builds pipelines and long-lived GPU resources.
    ///
    /// Called once before the first frame. Failure here is fatal to
    /// startup; there is no degraded mode without pipelines.
    fn load(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError>;

    /// Releases everything `load` and later frames created.
    fn unload(&mut self, device: &mut dyn GraphicsDevice);

    /// Renders one frame of `world`.
    fn render(
        &mut self,
        device: &mut dyn GraphicsDevice,
        world: &mut World,
        frame: &FrameContext,
        viewport: &mut ViewportState,
    ) -> Result<(), RenderError>;

    /// Renders an interface overlay after the scene. The default does
    /// nothing.
    fn render_user_interface(
        &mut self,
        _device: &mut dyn GraphicsDevice,
        _world: &mut World,
        _frame: &FrameContext,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}

/// A two-pass forward renderer over an [`AssetProvider`].
pub struct ForwardRenderer<A> {
    assets: A,
    settings: RendererSettings,
    view_info: ViewInfo,
    meshes: HashMap<String, GpuMesh>,
    materials: HashMap<String, GpuMaterial>,
    geometry_framebuffer: Option<FramebufferId>,
    geometry_pipeline: Option<GraphicsPipelineId>,
    composite_pipeline: Option<GraphicsPipelineId>,
    fallback_texture: Option<TextureId>,
    default_material_buffer: Option<BufferId>,
    loaded: bool,
}

impl<A: AssetProvider> ForwardRenderer<A> {
    /// Creates a renderer over `assets`. No GPU work happens until
    /// [`Renderer::load`].
    pub fn new(assets: A, settings: RendererSettings) -> Self {
        Self {
            assets,
            settings,
            view_info: ViewInfo::default(),
            meshes: HashMap::new(),
            materials: HashMap::new(),
            geometry_framebuffer: None,
            geometry_pipeline: None,
            composite_pipeline: None,
            fallback_texture: None,
            default_material_buffer: None,
            loaded: false,
        }
    }

    /// Replaces the camera state used for subsequent frames.
    pub fn set_view_info(&mut self, view_info: ViewInfo) {
        self.view_info = view_info;
    }

    /// Returns the cached GPU mesh for an asset name, if one was created.
    pub fn cached_mesh(&self, name: &str) -> Option<&GpuMesh> {
        self.meshes.get(name)
    }

    /// Returns the cached GPU material for an asset name, if one was created.
    pub fn cached_material(&self, name: &str) -> Option<&GpuMaterial> {
        self.materials.get(name)
    }

    fn initialize(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), ResourceError> {
        self.geometry_pipeline =
            Some(device.create_graphics_pipeline(&geometry_pipeline_descriptor())?);
        self.composite_pipeline =
            Some(device.create_graphics_pipeline(&composite_pipeline_descriptor())?);
        self.fallback_texture = Some(create_fallback_texture(device)?);
        self.default_material_buffer = Some(create_default_material_buffer(device)?);
        Ok(())
    }

    /// Rebuilds the offscreen render targets to match the viewport.
    ///
    /// Runs on the first frame, whose targets do not exist yet, and whenever
    /// the host raises a resize flag afterwards.
    fn recreate_render_targets(
        &mut self,
        device: &mut dyn GraphicsDevice,
        frame: &FrameContext,
        viewport: &mut ViewportState,
    ) -> Result<(), ResourceError> {
        viewport.rescale(self.settings.resolution_scale);
        let mut size = viewport.active_scaled_size();

        if frame.frame_counter > 0 {
            self.destroy_render_targets(device);
        }
        if size.is_empty() {
            // Editor panels report zero sizes while docking settles.
            size = viewport.window_framebuffer_scaled_size;
        }
        if size.is_empty() {
            // Minimized window; try again once the host reports a real size.
            return Ok(());
        }

        let framebuffer = device.create_framebuffer(&geometry_framebuffer_descriptor(size))?;
        self.geometry_framebuffer = Some(framebuffer);
        device.set_viewport(0, 0, size);
        viewport.clear_resize_flags();
        log::debug!("Render targets rebuilt at {}x{}", size.width, size.height);
        Ok(())
    }

    fn destroy_render_targets(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(framebuffer) = self.geometry_framebuffer.take() {
            if let Err(e) = device.destroy_framebuffer(framebuffer) {
                log::warn!("Unable to destroy geometry render targets: {e}");
            }
        }
    }

    /// Turns tagged entities into cached GPU resources and marks them drawn.
    ///
    /// Entities tagged [`NeedsGpuResources`] get their asset names resolved
    /// against the caches; records are created on first use and shared by
    /// name afterwards. Successful entities lose the tag and gain
    /// [`GpuMeshRef`]/[`GpuMaterialRef`] markers pointing at the cache keys.
    fn sync_gpu_resources(
        &mut self,
        device: &mut dyn GraphicsDevice,
        world: &mut World,
    ) -> Result<(), RenderError> {
        for entity in world.entities_with::<NeedsGpuResources>() {
            let mesh_name = world
                .get::<MeshSource>(entity)
                .map(|source| source.0.clone());
            let material_name = world
                .get::<MaterialSource>(entity)
                .map(|source| source.0.clone());
            if mesh_name.is_none() && material_name.is_none() {
                log::warn!(
                    "Entity {} is tagged for GPU resources but names no assets",
                    entity.index()
                );
            }

            if let Some(name) = mesh_name {
                if !self.meshes.contains_key(&name) {
                    let mesh = self.create_gpu_mesh(device, &name)?;
                    self.meshes.insert(name.clone(), mesh);
                }
                world.insert(entity, GpuMeshRef(name));
            }
            if let Some(name) = material_name {
                if !self.materials.contains_key(&name) {
                    let material = self.create_gpu_material(device, &name)?;
                    self.materials.insert(name.clone(), material);
                }
                world.insert(entity, GpuMaterialRef(name));
            }
            world.remove::<NeedsGpuResources>(entity);
        }
        Ok(())
    }

    fn create_gpu_mesh(
        &self,
        device: &mut dyn GraphicsDevice,
        name: &str,
    ) -> Result<GpuMesh, RenderError> {
        let Some(mesh) = self.assets.mesh(name) else {
            return Err(RenderError::MeshNotFound {
                name: name.to_owned(),
            });
        };
        if mesh.attributes.len() != mesh.positions.len() {
            return Err(RenderError::Internal(format!(
                "mesh '{}' has {} attribute elements for {} positions",
                name,
                mesh.attributes.len(),
                mesh.positions.len()
            )));
        }

        let position_buffer = device.create_buffer(&BufferDescriptor {
            label: Some(format!("{name}.positions").into()),
            size: std::mem::size_of_val(mesh.positions.as_slice()) as u64,
            initial_data: Some(bytemuck::cast_slice(&mesh.positions)),
            usage: BufferUsage::VERTEX,
        })?;
        let attribute_buffer = device.create_buffer(&BufferDescriptor {
            label: Some(format!("{name}.attributes").into()),
            size: std::mem::size_of_val(mesh.attributes.as_slice()) as u64,
            initial_data: Some(bytemuck::cast_slice(&mesh.attributes)),
            usage: BufferUsage::VERTEX,
        })?;
        let index_buffer = device.create_buffer(&BufferDescriptor {
            label: Some(format!("{name}.indices").into()),
            size: std::mem::size_of_val(mesh.indices.as_slice()) as u64,
            initial_data: Some(bytemuck::cast_slice(&mesh.indices)),
            usage: BufferUsage::INDEX,
        })?;

        log::debug!(
            "Created GPU mesh '{}' ({} vertices, {} indices)",
            name,
            mesh.positions.len(),
            mesh.indices.len()
        );
        Ok(GpuMesh {
            position_buffer,
            attribute_buffer,
            index_buffer,
            vertex_count: mesh.positions.len() as u32,
            index_count: mesh.indices.len() as u32,
            initial_transform: mesh.initial_transform,
        })
    }

    fn create_gpu_material(
        &self,
        device: &mut dyn GraphicsDevice,
        name: &str,
    ) -> Result<GpuMaterial, RenderError> {
        let Some(material) = self.assets.material(name) else {
            return Err(RenderError::MaterialNotFound {
                name: name.to_owned(),
            });
        };

        let base_color_texture = create_material_texture(
            device,
            name,
            "base_color",
            material.base_color_image.as_ref(),
            Format::R8G8B8A8Srgb,
        )?;
        let normal_texture = create_material_texture(
            device,
            name,
            "normal",
            material.normal_image.as_ref(),
            Format::R8G8B8A8Unorm,
        )?;
        let metallic_roughness_texture = create_material_texture(
            device,
            name,
            "metallic_roughness",
            material.metallic_roughness_image.as_ref(),
            Format::R8G8B8A8Unorm,
        )?;
        let emissive_texture = create_material_texture(
            device,
            name,
            "emissive",
            material.emissive_image.as_ref(),
            Format::R8G8B8A8Srgb,
        )?;

        let uniforms = GpuMaterialUniforms {
            base_color: material.base_color,
            factors: material.factors,
            base_color_handle: resident_handle(device, base_color_texture)?,
            normal_handle: resident_handle(device, normal_texture)?,
            metallic_roughness_handle: resident_handle(device, metallic_roughness_texture)?,
            emissive_handle: resident_handle(device, emissive_texture)?,
        };
        let uniform_buffer = device.create_buffer(&BufferDescriptor {
            label: Some(format!("{name}.material").into()),
            size: std::mem::size_of::<GpuMaterialUniforms>() as u64,
            initial_data: Some(bytemuck::bytes_of(&uniforms)),
            usage: BufferUsage::UNIFORM,
        })?;

        log::debug!("Created GPU material '{name}'");
        Ok(GpuMaterial {
            uniforms,
            uniform_buffer,
            base_color_texture,
            normal_texture,
            metallic_roughness_texture,
            emissive_texture,
        })
    }

    fn geometry_pass(
        &self,
        device: &mut dyn GraphicsDevice,
        world: &World,
    ) -> Result<(), RenderError> {
        let Some(framebuffer) = self.geometry_framebuffer else {
            // No valid render targets this frame; nothing to draw into.
            return Ok(());
        };
        let Some(pipeline) = self.geometry_pipeline else {
            return Err(RenderError::NotInitialized);
        };
        let extent = device.framebuffer(framebuffer)?.color_attachments[0]
            .as_ref()
            .map(|attachment| attachment.extent)
            .ok_or_else(|| {
                RenderError::Internal("geometry targets have no albedo attachment".to_owned())
            })?;

        if self.settings.debug {
            device.push_debug_group("Geometry");
        }
        device.begin_render_pass(framebuffer)?;
        device.set_viewport(0, 0, extent);
        device.bind_graphics_pipeline(pipeline)?;
        device.set_uniform(
            pipeline,
            "u_view_projection",
            UniformValue::Mat4(self.view_info.view_projection_matrix()),
        )?;

        for entity in world.entities_with::<GpuMeshRef>() {
            let Some(mesh_ref) = world.get::<GpuMeshRef>(entity) else {
                continue;
            };
            let Some(mesh) = self.meshes.get(&mesh_ref.0) else {
                log::warn!(
                    "Entity {} points at missing GPU mesh '{}'",
                    entity.index(),
                    mesh_ref.0
                );
                continue;
            };

            let model = world
                .get::<Transform>(entity)
                .map(Transform::to_mat4)
                .unwrap_or(Mat4::IDENTITY)
                * mesh.initial_transform;
            device.set_uniform(pipeline, "u_model", UniformValue::Mat4(model))?;

            let material = world
                .get::<GpuMaterialRef>(entity)
                .and_then(|material_ref| self.materials.get(&material_ref.0));
            self.bind_material(device, material)?;

            device.bind_vertex_buffer(0, mesh.position_buffer, 0, POSITION_STRIDE)?;
            device.bind_vertex_buffer(1, mesh.attribute_buffer, 0, VertexAttributes::STRIDE)?;
            device.draw_indexed(mesh.index_buffer, mesh.index_count)?;
        }

        if self.settings.debug {
            device.pop_debug_group();
        }
        Ok(())
    }

    fn bind_material(
        &self,
        device: &mut dyn GraphicsDevice,
        material: Option<&GpuMaterial>,
    ) -> Result<(), ResourceError> {
        match material {
            Some(material) => {
                device.bind_uniform_buffer(MATERIAL_BLOCK_BINDING, material.uniform_buffer)?;
                for (unit, texture) in material.textures().into_iter().enumerate() {
                    // Empty slots sample the fallback so every declared
                    // sampler stays backed.
                    if let Some(texture) = texture.or(self.fallback_texture) {
                        device.bind_texture(unit as u32, texture)?;
                    }
                }
            }
            None => {
                if let Some(buffer) = self.default_material_buffer {
                    device.bind_uniform_buffer(MATERIAL_BLOCK_BINDING, buffer)?;
                }
                if let Some(texture) = self.fallback_texture {
                    for unit in 0..MATERIAL_TEXTURE_UNITS {
                        device.bind_texture(unit, texture)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn composite_pass(
        &self,
        device: &mut dyn GraphicsDevice,
        frame: &FrameContext,
        viewport: &ViewportState,
    ) -> Result<(), RenderError> {
        let Some(framebuffer) = self.geometry_framebuffer else {
            return Ok(());
        };
        let Some(pipeline) = self.composite_pipeline else {
            return Err(RenderError::NotInitialized);
        };
        let scene_color = device.framebuffer(framebuffer)?.color_attachments[0]
            .as_ref()
            .map(|attachment| attachment.texture)
            .ok_or_else(|| {
                RenderError::Internal("geometry targets have no albedo attachment".to_owned())
            })?;

        if self.settings.debug {
            device.push_debug_group("Composite");
        }
        device.begin_default_pass();
        device.set_viewport(0, 0, viewport.window_framebuffer_size);
        device.bind_graphics_pipeline(pipeline)?;
        device.bind_texture(0, scene_color)?;
        device.set_uniform(
            pipeline,
            "u_srgb_disabled",
            UniformValue::Int(frame.is_srgb_disabled as i32),
        )?;
        device.draw(0, 3)?;
        if self.settings.debug {
            device.pop_debug_group();
        }
        Ok(())
    }
}

impl<A: AssetProvider> Renderer for ForwardRenderer<A> {
    fn load(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError> {
        if self.loaded {
            return Err(RenderError::InitializationFailed(
                "renderer is already loaded".to_owned(),
            ));
        }
        self.initialize(device)
            .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;
        self.loaded = true;
        log::info!("Forward renderer loaded");
        Ok(())
    }

    fn unload(&mut self, device: &mut dyn GraphicsDevice) {
        self.destroy_render_targets(device);

        for (name, mesh) in self.meshes.drain() {
            for buffer in [mesh.position_buffer, mesh.attribute_buffer, mesh.index_buffer] {
                if let Err(e) = device.destroy_buffer(buffer) {
                    log::warn!("Unable to destroy a buffer of mesh '{name}': {e}");
                }
            }
        }
        for (name, material) in self.materials.drain() {
            if let Err(e) = device.destroy_buffer(material.uniform_buffer) {
                log::warn!("Unable to destroy the uniform buffer of material '{name}': {e}");
            }
            for texture in material.textures().into_iter().flatten() {
                // Residency must be revoked before destroy when eviction on
                // destroy is disabled.
                let _ = device.make_texture_non_resident(texture);
                if let Err(e) = device.destroy_texture(texture) {
                    log::warn!("Unable to destroy a texture of material '{name}': {e}");
                }
            }
        }

        if let Some(texture) = self.fallback_texture.take() {
            if let Err(e) = device.destroy_texture(texture) {
                log::warn!("Unable to destroy the fallback texture: {e}");
            }
        }
        if let Some(buffer) = self.default_material_buffer.take() {
            if let Err(e) = device.destroy_buffer(buffer) {
                log::warn!("Unable to destroy the default material buffer: {e}");
            }
        }
        for pipeline in [self.geometry_pipeline.take(), self.composite_pipeline.take()]
            .into_iter()
            .flatten()
        {
            if let Err(e) = device.destroy_graphics_pipeline(pipeline) {
                log::warn!("Unable to destroy a pipeline: {e}");
            }
        }

        self.loaded = false;
        log::info!("Forward renderer unloaded");
    }

    fn render(
        &mut self,
        device: &mut dyn GraphicsDevice,
        world: &mut World,
        frame: &FrameContext,
        viewport: &mut ViewportState,
    ) -> Result<(), RenderError> {
        if !self.loaded {
            return Err(RenderError::NotInitialized);
        }

        // 1. React to surface changes before any pass touches the targets.
        if viewport.needs_resize() {
            self.recreate_render_targets(device, frame, viewport)?;
        }

        // 2. Turn freshly tagged entities into GPU resources.
        self.sync_gpu_resources(device, world)?;

        // 3. Rasterize the scene into the offscreen targets.
        self.geometry_pass(device, world)?;

        // 4. Stretch the result over the window surface.
        self.composite_pass(device, frame, viewport)?;

        Ok(())
    }
}

fn geometry_framebuffer_descriptor(size: Extent2D) -> FramebufferDescriptor<'static> {
    let mut descriptor = FramebufferDescriptor {
        label: Some("GeometryTargets".into()),
        ..Default::default()
    };
    descriptor.color_attachments[0] = Some(ColorAttachmentDescriptor {
        label: Some("GeometryAlbedo".into()),
        format: Format::R8G8B8A8Srgb,
        extent: size,
        load_op: LoadOp::Clear,
        clear_value: ClearValue::Float([0.4, 0.3, 0.2, 1.0]),
    });
    descriptor.color_attachments[1] = Some(ColorAttachmentDescriptor {
        label: Some("GeometryNormals".into()),
        format: Format::R32G32B32A32Float,
        extent: size,
        load_op: LoadOp::Clear,
        clear_value: ClearValue::Float([0.0, 0.0, 0.0, 1.0]),
    });
    descriptor.depth_stencil_attachment = Some(DepthStencilAttachmentDescriptor {
        label: Some("GeometryDepth".into()),
        format: Format::D24UnormS8Uint,
        extent: size,
        load_op: LoadOp::Clear,
        clear_depth_stencil: ClearDepthStencil::default(),
    });
    descriptor
}

fn geometry_pipeline_descriptor() -> GraphicsPipelineDescriptor<'static> {
    let mut vertex_input = VertexInputDescriptor::default();
    vertex_input.attributes[0] = Some(VertexAttributeDescriptor {
        location: 0,
        binding: 0,
        format: Format::R32G32B32Float,
        offset: 0,
    });
    vertex_input.attributes[1] = Some(VertexAttributeDescriptor {
        location: 1,
        binding: 1,
        format: Format::R32G32B32Float,
        offset: VertexAttributes::NORMAL_OFFSET,
    });
    vertex_input.attributes[2] = Some(VertexAttributeDescriptor {
        location: 2,
        binding: 1,
        format: Format::R32G32Float,
        offset: VertexAttributes::UV_OFFSET,
    });
    vertex_input.attributes[3] = Some(VertexAttributeDescriptor {
        location: 3,
        binding: 1,
        format: Format::R32G32B32A32Float,
        offset: VertexAttributes::TANGENT_OFFSET,
    });

    GraphicsPipelineDescriptor {
        label: Some("GeometryPass".into()),
        vertex_source: ShaderSourceData::Glsl(shaders::GEOMETRY_VERT_GLSL.into()),
        fragment_source: ShaderSourceData::Glsl(shaders::GEOMETRY_FRAG_GLSL.into()),
        input_assembly: InputAssemblyDescriptor::default(),
        vertex_input: Some(vertex_input),
    }
}

fn composite_pipeline_descriptor() -> GraphicsPipelineDescriptor<'static> {
    GraphicsPipelineDescriptor {
        label: Some("CompositePass".into()),
        vertex_source: ShaderSourceData::Glsl(shaders::COMPOSITE_VERT_GLSL.into()),
        fragment_source: ShaderSourceData::Glsl(shaders::COMPOSITE_FRAG_GLSL.into()),
        input_assembly: InputAssemblyDescriptor::default(),
        // The fullscreen triangle comes from the vertex index alone.
        vertex_input: None,
    }
}

fn create_material_texture(
    device: &mut dyn GraphicsDevice,
    material_name: &str,
    slot: &str,
    image: Option<&CpuImage>,
    format: Format,
) -> Result<Option<TextureId>, ResourceError> {
    let Some(image) = image else {
        return Ok(None);
    };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some(format!("{material_name}.{slot}").into()),
        texture_type: TextureType::Texture2D,
        format,
        extent: image.extent.into(),
        mip_level_count: image.extent.max_mip_levels(),
        sample_count: SampleCount::X1,
    })?;
    device.upload_texture(
        texture,
        &TextureUploadDescriptor {
            extent: image.extent.into(),
            pixels: &image.pixels,
            ..Default::default()
        },
    )?;
    device.generate_mipmaps(texture)?;
    Ok(Some(texture))
}

fn resident_handle(
    device: &mut dyn GraphicsDevice,
    texture: Option<TextureId>,
) -> Result<u64, ResourceError> {
    match texture {
        Some(texture) => device.make_texture_resident(texture),
        None => Ok(0),
    }
}

fn create_fallback_texture(device: &mut dyn GraphicsDevice) -> Result<TextureId, ResourceError> {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("FallbackWhite".into()),
        ..Default::default()
    })?;
    device.upload_texture(
        texture,
        &TextureUploadDescriptor {
            extent: Extent3D::new(1, 1, 1),
            pixels: &[255, 255, 255, 255],
            ..Default::default()
        },
    )?;
    Ok(texture)
}

fn create_default_material_buffer(
    device: &mut dyn GraphicsDevice,
) -> Result<BufferId, ResourceError> {
    let uniforms = GpuMaterialUniforms {
        base_color: [1.0, 1.0, 1.0, 1.0],
        factors: [0.0, 1.0, 0.0, 1.0],
        ..GpuMaterialUniforms::zeroed()
    };
    device.create_buffer(&BufferDescriptor {
        label: Some("DefaultMaterial".into()),
        size: std::mem::size_of::<GpuMaterialUniforms>() as u64,
        initial_data: Some(bytemuck::bytes_of(&uniforms)),
        usage: BufferUsage::UNIFORM,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_targets_pass_descriptor_validation() {
        let descriptor = geometry_framebuffer_descriptor(Extent2D::new(128, 128));
        assert!(descriptor.validate().is_ok());
        assert_eq!(
            descriptor.color_attachments.iter().flatten().count(),
            2,
            "albedo and normals"
        );
        assert!(descriptor.depth_stencil_attachment.is_some());
    }

    #[test]
    fn geometry_vertex_layout_matches_the_streams() {
        let descriptor = geometry_pipeline_descriptor();
        let vertex_input = descriptor.vertex_input.expect("geometry reads vertex buffers");
        let attributes: Vec<_> = vertex_input.attributes.iter().flatten().collect();

        assert_eq!(attributes.len(), 4);
        assert_eq!(attributes[0].binding, 0);
        assert!(attributes[1..].iter().all(|attribute| attribute.binding == 1));
        assert_eq!(attributes[2].offset, VertexAttributes::UV_OFFSET);
        assert_eq!(attributes[3].offset, VertexAttributes::TANGENT_OFFSET);
    }

    #[test]
    fn composite_draws_without_vertex_buffers() {
        assert!(composite_pipeline_descriptor().vertex_input.is_none());
    }
}
