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

//! OpenGL implementation of the graphics device contract.
//!
//! Every trait method resolves its handles through append-only slot tables
//! before touching GL state, so stale handles fail with
//! [`ResourceError::NotFound`] instead of operating on recycled GL names.
//! The device assumes its GL context is current on the calling thread for
//! the whole of its lifetime.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use glow::HasContext;

use ember_core::math::{Extent2D, Extent3D};
use ember_core::render::settings::BindlessPolicy;
use ember_core::rhi::buffer::{Buffer, BufferDescriptor, BufferUsage};
use ember_core::rhi::error::{PipelineError, ResourceError, ResourceKind, ShaderError};
use ember_core::rhi::format::AttributeClass;
use ember_core::rhi::framebuffer::{
    ClearValue, ColorAttachment, DepthStencilAttachment, Framebuffer, FramebufferDescriptor,
    LoadOp, MAX_COLOR_ATTACHMENTS,
};
use ember_core::rhi::handle::{
    BufferId, ComputePipelineId, FramebufferId, GraphicsPipelineId, ResourceId, SlotTable,
    TextureId,
};
use ember_core::rhi::pipeline::{
    ComputePipelineDescriptor, GraphicsPipelineDescriptor, ShaderStage, UniformValue,
};
use ember_core::rhi::texture::{
    SampleCount, Texture, TextureDescriptor, TextureType, TextureUploadDescriptor,
};
use ember_core::rhi::RenderDeviceInfo;
use ember_core::GraphicsDevice;

use crate::conversions::IntoGl;
use crate::include;

struct GlTextureEntry {
    raw: glow::Texture,
    target: u32,
    info: Texture,
    label: String,
}

struct GlBufferEntry {
    raw: glow::Buffer,
    info: Buffer,
    label: String,
}

struct GlFramebufferEntry {
    raw: glow::Framebuffer,
    info: Framebuffer,
    label: String,
}

struct GlGraphicsPipelineEntry {
    program: glow::Program,
    vertex_array: glow::VertexArray,
    topology: u32,
    primitive_restart: bool,
    label: String,
    uniform_locations: HashMap<String, Option<glow::UniformLocation>>,
}

struct GlComputePipelineEntry {
    program: glow::Program,
    label: String,
    uniform_locations: HashMap<String, Option<glow::UniformLocation>>,
}

/// A [`GraphicsDevice`] backed by an OpenGL 4.6 context.
///
/// The device owns every GL object it creates and deletes the survivors when
/// dropped. Texture residency is tracked host side: resident textures get a
/// stable non-zero handle and shaders reach them through the unit bindings
/// made by [`bind_texture`](GraphicsDevice::bind_texture).
pub struct GlDevice {
    gl: Arc<glow::Context>,
    policy: BindlessPolicy,
    info: RenderDeviceInfo,
    textures: SlotTable<TextureId, GlTextureEntry>,
    buffers: SlotTable<BufferId, GlBufferEntry>,
    framebuffers: SlotTable<FramebufferId, GlFramebufferEntry>,
    graphics_pipelines: SlotTable<GraphicsPipelineId, GlGraphicsPipelineEntry>,
    compute_pipelines: SlotTable<ComputePipelineId, GlComputePipelineEntry>,
    bound_graphics_pipeline: Option<GraphicsPipelineId>,
    bound_compute_pipeline: Option<ComputePipelineId>,
    last_index_buffer: Option<BufferId>,
    next_resident_handle: u64,
}

impl GlDevice {
    /// Wraps an existing [`glow::Context`].
    ///
    /// The context must be current on the calling thread and stay current
    /// for every later call into the device.
    pub fn new(gl: Arc<glow::Context>, policy: BindlessPolicy) -> Self {
        let info = unsafe {
            let info = RenderDeviceInfo {
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
                version: gl.get_parameter_string(glow::VERSION),
            };
            log::info!(
                "OpenGL device: {} ({}), {}",
                info.renderer,
                info.vendor,
                info.version
            );

            // Uploads state their row layout through the descriptor, so rows
            // must be tightly packed rather than 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            info
        };

        Self {
            gl,
            policy,
            info,
            textures: SlotTable::new(),
            buffers: SlotTable::new(),
            framebuffers: SlotTable::new(),
            graphics_pipelines: SlotTable::new(),
            compute_pipelines: SlotTable::new(),
            bound_graphics_pipeline: None,
            bound_compute_pipeline: None,
            last_index_buffer: None,
            next_resident_handle: 1,
        }
    }

    /// Creates a device by loading GL function pointers.
    ///
    /// # Safety
    ///
    /// `loader_function` must return pointers valid for the GL context
    /// current on this thread, and that context must remain current for the
    /// device's lifetime.
    pub unsafe fn from_loader_function(
        loader_function: impl FnMut(&str) -> *const std::ffi::c_void,
        policy: BindlessPolicy,
    ) -> Self {
        let gl = glow::Context::from_loader_function(loader_function);
        Self::new(Arc::new(gl), policy)
    }

    fn create_texture_internal(
        &mut self,
        desc: &TextureDescriptor<'_>,
    ) -> Result<(TextureId, glow::Texture), ResourceError> {
        if desc.texture_type == TextureType::Texture2DMultisampleArray {
            return Err(ResourceError::Unsupported(
                "multisample array textures".to_string(),
            ));
        }
        let Some(internal) = desc.format.into_gl() else {
            log::error!(
                "No OpenGL internal format for {:?}; refusing texture '{}'",
                desc.format,
                desc.label.as_deref().unwrap_or("unnamed texture")
            );
            return Err(ResourceError::Unsupported(format!(
                "no OpenGL internal format for {:?}",
                desc.format
            )));
        };

        let label = desc.label.as_deref().unwrap_or("unnamed texture").to_string();
        let target = desc.texture_type.into_gl();
        let extent = desc.extent;
        let levels = desc.mip_level_count as i32;

        let raw = unsafe {
            let raw = self
                .gl
                .create_texture()
                .map_err(ResourceError::BackendError)?;
            self.gl.bind_texture(target, Some(raw));
            match desc.texture_type {
                TextureType::Texture1D => {
                    self.gl
                        .tex_storage_2d(target, levels, internal, extent.width as i32, 1);
                }
                TextureType::Texture1DArray => {
                    self.gl.tex_storage_2d(
                        target,
                        levels,
                        internal,
                        extent.width as i32,
                        extent.depth_or_array_layers as i32,
                    );
                }
                TextureType::Texture2D | TextureType::TextureCube => {
                    self.gl.tex_storage_2d(
                        target,
                        levels,
                        internal,
                        extent.width as i32,
                        extent.height as i32,
                    );
                }
                TextureType::Texture2DMultisample => {
                    self.gl.tex_storage_2d_multisample(
                        target,
                        desc.sample_count.as_u32() as i32,
                        internal,
                        extent.width as i32,
                        extent.height as i32,
                        true,
                    );
                }
                TextureType::Texture3D
                | TextureType::Texture2DArray
                | TextureType::TextureCubeArray => {
                    self.gl.tex_storage_3d(
                        target,
                        levels,
                        internal,
                        extent.width as i32,
                        extent.height as i32,
                        extent.depth_or_array_layers as i32,
                    );
                }
                // Refused above.
                TextureType::Texture2DMultisampleArray => {}
            }
            raw
        };

        let id = self.textures.insert_with(|id| GlTextureEntry {
            raw,
            target,
            info: Texture {
                id,
                texture_type: desc.texture_type,
                format: desc.format,
                extent,
                mip_level_count: desc.mip_level_count,
                sample_count: desc.sample_count,
                resident_handle: None,
            },
            label: label.clone(),
        });
        log::debug!(
            "Created texture '{}' ({:?}, {:?}, {}x{}x{})",
            label,
            desc.texture_type,
            desc.format,
            extent.width,
            extent.height,
            extent.depth_or_array_layers
        );
        Ok((id, raw))
    }

    fn compile_stage(
        &self,
        stage: ShaderStage,
        source: &str,
        pipeline_label: &str,
    ) -> Result<glow::Shader, ResourceError> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            ShaderStage::Compute => glow::COMPUTE_SHADER,
        };
        unsafe {
            let shader = self
                .gl
                .create_shader(shader_type)
                .map_err(ResourceError::BackendError)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let details = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(ShaderError::CompilationError {
                    stage,
                    pipeline_label: pipeline_label.to_string(),
                    details,
                }
                .into());
            }
            Ok(shader)
        }
    }

    /// Links `shaders` into a program, consuming them on every path.
    fn link_program(
        &self,
        shaders: &[glow::Shader],
        pipeline_label: &str,
    ) -> Result<glow::Program, ResourceError> {
        unsafe {
            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(details) => {
                    for &shader in shaders {
                        self.gl.delete_shader(shader);
                    }
                    return Err(ResourceError::BackendError(details));
                }
            };
            for &shader in shaders {
                self.gl.attach_shader(program, shader);
            }
            self.gl.link_program(program);
            for &shader in shaders {
                self.gl.detach_shader(program, shader);
                self.gl.delete_shader(shader);
            }
            if !self.gl.get_program_link_status(program) {
                let details = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(PipelineError::LinkError {
                    pipeline_label: pipeline_label.to_string(),
                    details,
                }
                .into());
            }
            Ok(program)
        }
    }

    fn build_graphics_program(
        &self,
        desc: &GraphicsPipelineDescriptor<'_>,
        label: &str,
    ) -> Result<glow::Program, ResourceError> {
        let vertex_source = include::resolve_source(&desc.vertex_source)?;
        let fragment_source = include::resolve_source(&desc.fragment_source)?;
        let vertex = self.compile_stage(ShaderStage::Vertex, &vertex_source, label)?;
        let fragment = match self.compile_stage(ShaderStage::Fragment, &fragment_source, label) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { self.gl.delete_shader(vertex) };
                return Err(e);
            }
        };
        self.link_program(&[vertex, fragment], label)
    }

    /// Rebinds whichever program the bound pipeline state says is active.
    fn restore_bound_program(&self) {
        let program = self
            .bound_graphics_pipeline
            .and_then(|id| self.graphics_pipelines.get(id))
            .map(|entry| entry.program)
            .or_else(|| {
                self.bound_compute_pipeline
                    .and_then(|id| self.compute_pipelines.get(id))
                    .map(|entry| entry.program)
            });
        unsafe { self.gl.use_program(program) };
    }
}

fn apply_uniform(gl: &glow::Context, location: &glow::UniformLocation, value: UniformValue) {
    unsafe {
        match value {
            UniformValue::Float(x) => gl.uniform_1_f32(Some(location), x),
            UniformValue::Int(x) => gl.uniform_1_i32(Some(location), x),
            UniformValue::Uint(x) => gl.uniform_1_u32(Some(location), x),
            UniformValue::Vec2(v) => gl.uniform_2_f32_slice(Some(location), &v.to_array()),
            UniformValue::Vec3(v) => gl.uniform_3_f32_slice(Some(location), &v.to_array()),
            UniformValue::Vec4(v) => gl.uniform_4_f32_slice(Some(location), &v.to_array()),
            UniformValue::IVec4(v) => gl.uniform_4_i32(Some(location), v.x, v.y, v.z, v.w),
            UniformValue::Mat4(m) => {
                gl.uniform_matrix_4_f32_slice(Some(location), false, &m.to_cols_array())
            }
        }
    }
}

impl GraphicsDevice for GlDevice {
    fn create_texture(&mut self, desc: &TextureDescriptor<'_>) -> Result<TextureId, ResourceError> {
        self.create_texture_internal(desc).map(|(id, _)| id)
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        upload: &TextureUploadDescriptor<'_>,
    ) -> Result<(), ResourceError> {
        let entry = self.textures.get(texture).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Texture,
            index: texture.index(),
        })?;
        let format = entry.info.format;
        if format.is_compressed() {
            return Err(ResourceError::Unsupported(format!(
                "uploads to compressed format {format:?}"
            )));
        }
        if entry.info.texture_type == TextureType::Texture2DMultisample {
            return Err(ResourceError::Unsupported(
                "uploads to multisample textures".to_string(),
            ));
        }

        let Some(upload_format) = upload.upload_format.or_else(|| format.upload_format()) else {
            return Err(ResourceError::InvalidDescriptor(format!(
                "no upload layout for {format:?}"
            )));
        };
        let Some(upload_type) = upload.upload_type.or_else(|| format.upload_type()) else {
            return Err(ResourceError::InvalidDescriptor(format!(
                "uploads to {format:?} must state an explicit upload type"
            )));
        };
        let gl_format = upload_format.into_gl();
        let gl_type = upload_type.into_gl();

        unsafe {
            self.gl.bind_texture(entry.target, Some(entry.raw));
            match entry.info.texture_type.dimension_count() {
                1 | 2 => self.gl.tex_sub_image_2d(
                    entry.target,
                    upload.mip_level as i32,
                    upload.offset.x as i32,
                    upload.offset.y as i32,
                    upload.extent.width as i32,
                    upload.extent.height as i32,
                    gl_format,
                    gl_type,
                    glow::PixelUnpackData::Slice(upload.pixels),
                ),
                _ => self.gl.tex_sub_image_3d(
                    entry.target,
                    upload.mip_level as i32,
                    upload.offset.x as i32,
                    upload.offset.y as i32,
                    upload.offset.z as i32,
                    upload.extent.width as i32,
                    upload.extent.height as i32,
                    upload.extent.depth_or_array_layers as i32,
                    gl_format,
                    gl_type,
                    glow::PixelUnpackData::Slice(upload.pixels),
                ),
            }
        }
        Ok(())
    }

    fn generate_mipmaps(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        let entry = self.textures.get(texture).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Texture,
            index: texture.index(),
        })?;
        unsafe {
            self.gl.bind_texture(entry.target, Some(entry.raw));
            self.gl.generate_mipmap(entry.target);
        }
        Ok(())
    }

    fn make_texture_resident(&mut self, texture: TextureId) -> Result<u64, ResourceError> {
        let entry = self
            .textures
            .get_mut(texture)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Texture,
                index: texture.index(),
            })?;
        if let Some(handle) = entry.info.resident_handle {
            if self.policy.residency_idempotent {
                return Ok(handle);
            }
            return Err(ResourceError::AlreadyResident {
                index: texture.index(),
            });
        }
        let handle = self.next_resident_handle;
        self.next_resident_handle += 1;
        entry.info.resident_handle = Some(handle);
        log::debug!("Texture '{}' made resident as handle {}", entry.label, handle);
        Ok(handle)
    }

    fn make_texture_non_resident(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        let entry = self
            .textures
            .get_mut(texture)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Texture,
                index: texture.index(),
            })?;
        if entry.info.resident_handle.take().is_none() {
            return Err(ResourceError::NotResident {
                index: texture.index(),
            });
        }
        Ok(())
    }

    fn destroy_texture(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        let resident = self
            .textures
            .get(texture)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Texture,
                index: texture.index(),
            })?
            .info
            .resident_handle
            .is_some();
        if resident && !self.policy.evict_on_destroy {
            return Err(ResourceError::AlreadyResident {
                index: texture.index(),
            });
        }
        if let Some(entry) = self.textures.remove(texture) {
            unsafe { self.gl.delete_texture(entry.raw) };
            log::debug!("Destroyed texture '{}'", entry.label);
        }
        Ok(())
    }

    fn texture(&self, texture: TextureId) -> Result<&Texture, ResourceError> {
        self.textures
            .get(texture)
            .map(|entry| &entry.info)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Texture,
                index: texture.index(),
            })
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<(), ResourceError> {
        let entry = self.textures.get(texture).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Texture,
            index: texture.index(),
        })?;
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(entry.target, Some(entry.raw));
        }
        Ok(())
    }

    fn create_buffer(&mut self, desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError> {
        if let Some(data) = desc.initial_data {
            if data.len() as u64 > desc.size {
                return Err(ResourceError::InvalidDescriptor(format!(
                    "buffer '{}' initial data ({} bytes) exceeds its size ({} bytes)",
                    desc.label.as_deref().unwrap_or("unnamed buffer"),
                    data.len(),
                    desc.size
                )));
            }
        }

        let label = desc.label.as_deref().unwrap_or("unnamed buffer").to_string();
        let hint = desc.usage.into_gl();
        let raw = unsafe {
            let raw = self
                .gl
                .create_buffer()
                .map_err(ResourceError::BackendError)?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(raw));
            match desc.initial_data {
                Some(data) if data.len() as u64 == desc.size => {
                    self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, hint);
                }
                Some(data) => {
                    self.gl
                        .buffer_data_size(glow::ARRAY_BUFFER, desc.size as i32, hint);
                    self.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, data);
                }
                None => {
                    self.gl
                        .buffer_data_size(glow::ARRAY_BUFFER, desc.size as i32, hint);
                }
            }
            raw
        };

        let id = self.buffers.insert_with(|id| GlBufferEntry {
            raw,
            info: Buffer {
                id,
                size: desc.size,
                usage: desc.usage,
            },
            label: label.clone(),
        });
        log::debug!("Created buffer '{}' ({} bytes)", label, desc.size);
        Ok(id)
    }

    fn update_buffer(
        &mut self,
        buffer: BufferId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), ResourceError> {
        let entry = self.buffers.get(buffer).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Buffer,
            index: buffer.index(),
        })?;
        if !entry.info.usage.contains(BufferUsage::DYNAMIC_UPDATE) {
            return Err(ResourceError::ImmutableBuffer {
                index: buffer.index(),
            });
        }
        if offset + data.len() as u64 > entry.info.size {
            return Err(ResourceError::OutOfBounds {
                kind: ResourceKind::Buffer,
                index: buffer.index(),
            });
        }
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(entry.raw));
            self.gl
                .buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, offset as i32, data);
        }
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: BufferId) -> Result<(), ResourceError> {
        let entry = self.buffers.remove(buffer).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Buffer,
            index: buffer.index(),
        })?;
        if self.last_index_buffer == Some(buffer) {
            self.last_index_buffer = None;
        }
        unsafe { self.gl.delete_buffer(entry.raw) };
        log::debug!("Destroyed buffer '{}'", entry.label);
        Ok(())
    }

    fn buffer(&self, buffer: BufferId) -> Result<&Buffer, ResourceError> {
        self.buffers
            .get(buffer)
            .map(|entry| &entry.info)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Buffer,
                index: buffer.index(),
            })
    }

    fn bind_uniform_buffer(
        &mut self,
        binding: u32,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        let entry = self.buffers.get(buffer).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Buffer,
            index: buffer.index(),
        })?;
        unsafe {
            self.gl
                .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(entry.raw));
        }
        Ok(())
    }

    fn bind_storage_buffer(
        &mut self,
        binding: u32,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        let entry = self.buffers.get(buffer).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Buffer,
            index: buffer.index(),
        })?;
        unsafe {
            self.gl
                .bind_buffer_base(glow::SHADER_STORAGE_BUFFER, binding, Some(entry.raw));
        }
        Ok(())
    }

    fn create_framebuffer(
        &mut self,
        desc: &FramebufferDescriptor<'_>,
    ) -> Result<FramebufferId, ResourceError> {
        desc.validate()?;
        let label = desc.label_or_unnamed().to_string();

        // All attachment textures are created up front so a failure can roll
        // back without leaving orphans behind.
        let mut created: Vec<TextureId> = Vec::new();
        let mut attach_points: Vec<(u32, glow::Texture)> = Vec::new();
        let mut draw_buffers: Vec<u32> = Vec::with_capacity(MAX_COLOR_ATTACHMENTS);
        let mut color_records: [Option<ColorAttachment>; MAX_COLOR_ATTACHMENTS] =
            Default::default();

        for (slot, attachment) in desc.color_attachments.iter().enumerate() {
            let Some(attachment) = attachment else {
                // Absent slots keep a NONE entry so draw buffer i always maps
                // to color slot i.
                draw_buffers.push(glow::NONE);
                continue;
            };
            let attachment_label = attachment.label.as_deref().unwrap_or("color attachment");
            let texture_label = format!(
                "{}_{}x{}",
                attachment_label, attachment.extent.width, attachment.extent.height
            );
            let result = self.create_texture_internal(&TextureDescriptor {
                label: Some(Cow::Owned(texture_label)),
                texture_type: TextureType::Texture2D,
                format: attachment.format,
                extent: Extent3D::from(attachment.extent),
                mip_level_count: 1,
                sample_count: SampleCount::X1,
            });
            let (texture_id, raw_texture) = match result {
                Ok(pair) => pair,
                Err(e) => {
                    for &orphan in &created {
                        let _ = self.destroy_texture(orphan);
                    }
                    return Err(e);
                }
            };
            created.push(texture_id);
            attach_points.push((glow::COLOR_ATTACHMENT0 + slot as u32, raw_texture));
            draw_buffers.push(glow::COLOR_ATTACHMENT0 + slot as u32);
            color_records[slot] = Some(ColorAttachment {
                texture: texture_id,
                format: attachment.format,
                extent: attachment.extent,
                load_op: attachment.load_op,
                clear_value: attachment.clear_value,
            });
        }

        let mut depth_record: Option<DepthStencilAttachment> = None;
        if let Some(attachment) = &desc.depth_stencil_attachment {
            let attachment_label = attachment.label.as_deref().unwrap_or("depth attachment");
            let texture_label = format!(
                "{}_{}x{}",
                attachment_label, attachment.extent.width, attachment.extent.height
            );
            let result = self.create_texture_internal(&TextureDescriptor {
                label: Some(Cow::Owned(texture_label)),
                texture_type: TextureType::Texture2D,
                format: attachment.format,
                extent: Extent3D::from(attachment.extent),
                mip_level_count: 1,
                sample_count: SampleCount::X1,
            });
            let (texture_id, raw_texture) = match result {
                Ok(pair) => pair,
                Err(e) => {
                    for &orphan in &created {
                        let _ = self.destroy_texture(orphan);
                    }
                    return Err(e);
                }
            };
            created.push(texture_id);
            // Depth-bearing formats always go to the combined point, with or
            // without a stencil aspect; only pure stencil formats use the
            // stencil point.
            let point = if attachment.format.is_depth() {
                glow::DEPTH_STENCIL_ATTACHMENT
            } else {
                glow::STENCIL_ATTACHMENT
            };
            attach_points.push((point, raw_texture));
            depth_record = Some(DepthStencilAttachment {
                texture: texture_id,
                format: attachment.format,
                extent: attachment.extent,
                load_op: attachment.load_op,
                clear_depth_stencil: attachment.clear_depth_stencil,
            });
        }

        let raw = match unsafe { self.gl.create_framebuffer() } {
            Ok(raw) => raw,
            Err(details) => {
                for &orphan in &created {
                    let _ = self.destroy_texture(orphan);
                }
                return Err(ResourceError::BackendError(details));
            }
        };
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(raw));
            for &(point, raw_texture) in &attach_points {
                self.gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    point,
                    glow::TEXTURE_2D,
                    Some(raw_texture),
                    0,
                );
            }
            self.gl.draw_buffers(&draw_buffers);

            let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                log::error!("Framebuffer '{label}' is incomplete (status 0x{status:X})");
            }
        }

        let id = self.framebuffers.insert_with(|id| GlFramebufferEntry {
            raw,
            info: Framebuffer {
                id,
                color_attachments: color_records,
                depth_stencil_attachment: depth_record,
            },
            label: label.clone(),
        });
        log::debug!("Created framebuffer '{label}'");
        Ok(id)
    }

    fn framebuffer(&self, framebuffer: FramebufferId) -> Result<&Framebuffer, ResourceError> {
        self.framebuffers
            .get(framebuffer)
            .map(|entry| &entry.info)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Framebuffer,
                index: framebuffer.index(),
            })
    }

    fn begin_render_pass(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError> {
        let entry = self
            .framebuffers
            .get(framebuffer)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Framebuffer,
                index: framebuffer.index(),
            })?;
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(entry.raw));

            // The draw-buffer list keeps NONE placeholders for absent slots,
            // so draw buffer i is always color slot i and clears can address
            // by slot number. Invalidation addresses attachment points.
            let mut discard: Vec<u32> = Vec::new();
            for (slot, attachment) in entry.info.color_attachments.iter().enumerate() {
                let Some(attachment) = attachment else {
                    continue;
                };
                match attachment.load_op {
                    LoadOp::Clear => match attachment.clear_value {
                        ClearValue::Float(values) => {
                            self.gl
                                .clear_buffer_f32_slice(glow::COLOR, slot as u32, &values)
                        }
                        ClearValue::Int(values) => {
                            self.gl
                                .clear_buffer_i32_slice(glow::COLOR, slot as u32, &values)
                        }
                        ClearValue::Uint(values) => {
                            self.gl
                                .clear_buffer_u32_slice(glow::COLOR, slot as u32, &values)
                        }
                    },
                    LoadOp::DontCare => discard.push(glow::COLOR_ATTACHMENT0 + slot as u32),
                    LoadOp::Load => {}
                }
            }

            if let Some(depth) = &entry.info.depth_stencil_attachment {
                match depth.load_op {
                    LoadOp::Clear => {
                        let clear = depth.clear_depth_stencil;
                        if depth.format.is_depth() && depth.format.has_stencil() {
                            self.gl.clear_buffer_depth_stencil(
                                glow::DEPTH_STENCIL,
                                0,
                                clear.depth,
                                clear.stencil as i32,
                            );
                        } else if depth.format.is_depth() {
                            self.gl
                                .clear_buffer_f32_slice(glow::DEPTH, 0, &[clear.depth]);
                        } else {
                            self.gl
                                .clear_buffer_i32_slice(glow::STENCIL, 0, &[clear.stencil as i32]);
                        }
                    }
                    LoadOp::DontCare => {
                        discard.push(if depth.format.is_depth() {
                            glow::DEPTH_STENCIL_ATTACHMENT
                        } else {
                            glow::STENCIL_ATTACHMENT
                        });
                    }
                    LoadOp::Load => {}
                }
            }

            if !discard.is_empty() {
                self.gl.invalidate_framebuffer(glow::FRAMEBUFFER, &discard);
            }
        }
        Ok(())
    }

    fn begin_default_pass(&mut self) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
    }

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError> {
        let entry = self
            .framebuffers
            .remove(framebuffer)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Framebuffer,
                index: framebuffer.index(),
            })?;
        unsafe { self.gl.delete_framebuffer(entry.raw) };
        for attachment in entry.info.color_attachments.iter().flatten() {
            let _ = self.destroy_texture(attachment.texture);
        }
        if let Some(depth) = &entry.info.depth_stencil_attachment {
            let _ = self.destroy_texture(depth.texture);
        }
        log::debug!("Destroyed framebuffer '{}' and its attachments", entry.label);
        Ok(())
    }

    fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDescriptor<'_>,
    ) -> Result<GraphicsPipelineId, ResourceError> {
        let label = desc
            .label
            .as_deref()
            .unwrap_or("unnamed pipeline")
            .to_string();

        let program = match self.build_graphics_program(desc, &label) {
            Ok(program) => program,
            Err(e) => {
                log::error!("Unable to build graphics pipeline '{label}'");
                return Err(e);
            }
        };

        let vertex_array = match unsafe { self.gl.create_vertex_array() } {
            Ok(vertex_array) => vertex_array,
            Err(details) => {
                unsafe { self.gl.delete_program(program) };
                log::error!("Unable to build graphics pipeline '{label}'");
                return Err(ResourceError::BackendError(details));
            }
        };

        unsafe {
            self.gl.bind_vertex_array(Some(vertex_array));
            if let Some(vertex_input) = &desc.vertex_input {
                for attribute in vertex_input.attributes.iter().flatten() {
                    let size = attribute.format.component_count() as i32;
                    match attribute.format.attribute_class() {
                        AttributeClass::Float => {
                            let Some(component) = attribute.format.upload_type() else {
                                log::error!(
                                    "Vertex attribute {} of pipeline '{}' has format {:?} with no client component type; attribute skipped",
                                    attribute.location,
                                    label,
                                    attribute.format
                                );
                                continue;
                            };
                            self.gl.enable_vertex_attrib_array(attribute.location);
                            self.gl.vertex_attrib_format_f32(
                                attribute.location,
                                size,
                                component.into_gl(),
                                attribute.format.is_normalized(),
                                attribute.offset,
                            );
                            self.gl
                                .vertex_attrib_binding(attribute.location, attribute.binding);
                        }
                        AttributeClass::Integer => {
                            let Some(component) = attribute.format.upload_type() else {
                                log::error!(
                                    "Vertex attribute {} of pipeline '{}' has format {:?} with no client component type; attribute skipped",
                                    attribute.location,
                                    label,
                                    attribute.format
                                );
                                continue;
                            };
                            self.gl.enable_vertex_attrib_array(attribute.location);
                            self.gl.vertex_attrib_format_i32(
                                attribute.location,
                                size,
                                component.into_gl(),
                                attribute.offset,
                            );
                            self.gl
                                .vertex_attrib_binding(attribute.location, attribute.binding);
                        }
                        AttributeClass::Long => {
                            log::error!(
                                "Vertex attribute {} of pipeline '{}' uses 64-bit format {:?}, which this backend does not support; attribute skipped",
                                attribute.location,
                                label,
                                attribute.format
                            );
                        }
                    }
                }
            }
            self.gl.bind_vertex_array(None);
        }

        // Creating a pipeline must not disturb whichever one is bound.
        if let Some(bound) = self
            .bound_graphics_pipeline
            .and_then(|id| self.graphics_pipelines.get(id))
        {
            unsafe { self.gl.bind_vertex_array(Some(bound.vertex_array)) };
        }

        let id = self.graphics_pipelines.insert(GlGraphicsPipelineEntry {
            program,
            vertex_array,
            topology: desc.input_assembly.topology.into_gl(),
            primitive_restart: desc.input_assembly.primitive_restart,
            label: label.clone(),
            uniform_locations: HashMap::new(),
        });
        log::debug!("Created graphics pipeline '{label}'");
        Ok(id)
    }

    fn bind_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError> {
        let entry = self
            .graphics_pipelines
            .get(pipeline)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: pipeline.index(),
            })?;
        unsafe {
            self.gl.use_program(Some(entry.program));
            self.gl.bind_vertex_array(Some(entry.vertex_array));
            if entry.primitive_restart {
                self.gl.enable(glow::PRIMITIVE_RESTART_FIXED_INDEX);
            } else {
                self.gl.disable(glow::PRIMITIVE_RESTART_FIXED_INDEX);
            }
        }
        self.bound_graphics_pipeline = Some(pipeline);
        self.bound_compute_pipeline = None;
        // Element buffer binding lives in the vertex array, so the cache is
        // stale the moment the vertex array changes.
        self.last_index_buffer = None;
        Ok(())
    }

    fn destroy_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError> {
        let entry = self
            .graphics_pipelines
            .remove(pipeline)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: pipeline.index(),
            })?;
        if self.bound_graphics_pipeline == Some(pipeline) {
            self.bound_graphics_pipeline = None;
            self.last_index_buffer = None;
            unsafe {
                self.gl.use_program(None);
                self.gl.bind_vertex_array(None);
            }
        }
        unsafe {
            self.gl.delete_program(entry.program);
            self.gl.delete_vertex_array(entry.vertex_array);
        }
        log::debug!("Destroyed graphics pipeline '{}'", entry.label);
        Ok(())
    }

    fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDescriptor<'_>,
    ) -> Result<ComputePipelineId, ResourceError> {
        let label = desc
            .label
            .as_deref()
            .unwrap_or("unnamed pipeline")
            .to_string();
        let result = include::resolve_source(&desc.compute_source)
            .map_err(ResourceError::from)
            .and_then(|source| self.compile_stage(ShaderStage::Compute, &source, &label))
            .and_then(|shader| self.link_program(&[shader], &label));
        let program = match result {
            Ok(program) => program,
            Err(e) => {
                log::error!("Unable to build compute pipeline '{label}'");
                return Err(e);
            }
        };

        let id = self.compute_pipelines.insert(GlComputePipelineEntry {
            program,
            label: label.clone(),
            uniform_locations: HashMap::new(),
        });
        log::debug!("Created compute pipeline '{label}'");
        Ok(id)
    }

    fn bind_compute_pipeline(
        &mut self,
        pipeline: ComputePipelineId,
    ) -> Result<(), ResourceError> {
        let entry = self
            .compute_pipelines
            .get(pipeline)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::ComputePipeline,
                index: pipeline.index(),
            })?;
        unsafe { self.gl.use_program(Some(entry.program)) };
        self.bound_compute_pipeline = Some(pipeline);
        self.bound_graphics_pipeline = None;
        Ok(())
    }

    fn destroy_compute_pipeline(
        &mut self,
        pipeline: ComputePipelineId,
    ) -> Result<(), ResourceError> {
        let entry = self
            .compute_pipelines
            .remove(pipeline)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::ComputePipeline,
                index: pipeline.index(),
            })?;
        if self.bound_compute_pipeline == Some(pipeline) {
            self.bound_compute_pipeline = None;
            unsafe { self.gl.use_program(None) };
        }
        unsafe { self.gl.delete_program(entry.program) };
        log::debug!("Destroyed compute pipeline '{}'", entry.label);
        Ok(())
    }

    fn set_uniform(
        &mut self,
        pipeline: GraphicsPipelineId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), ResourceError> {
        let (program, location) = {
            let entry = self
                .graphics_pipelines
                .get_mut(pipeline)
                .ok_or(ResourceError::NotFound {
                    kind: ResourceKind::GraphicsPipeline,
                    index: pipeline.index(),
                })?;
            let location = if let Some(cached) = entry.uniform_locations.get(name) {
                cached.clone()
            } else {
                let looked_up = unsafe { self.gl.get_uniform_location(entry.program, name) };
                if looked_up.is_none() {
                    log::warn!("Uniform '{}' not found in pipeline '{}'", name, entry.label);
                }
                entry
                    .uniform_locations
                    .insert(name.to_string(), looked_up.clone());
                looked_up
            };
            (entry.program, location)
        };

        // Drivers strip unused uniforms; a missing location is tolerated.
        let Some(location) = location else {
            return Ok(());
        };
        unsafe { self.gl.use_program(Some(program)) };
        apply_uniform(&self.gl, &location, value);
        self.restore_bound_program();
        Ok(())
    }

    fn set_compute_uniform(
        &mut self,
        pipeline: ComputePipelineId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), ResourceError> {
        let (program, location) = {
            let entry = self
                .compute_pipelines
                .get_mut(pipeline)
                .ok_or(ResourceError::NotFound {
                    kind: ResourceKind::ComputePipeline,
                    index: pipeline.index(),
                })?;
            let location = if let Some(cached) = entry.uniform_locations.get(name) {
                cached.clone()
            } else {
                let looked_up = unsafe { self.gl.get_uniform_location(entry.program, name) };
                if looked_up.is_none() {
                    log::warn!("Uniform '{}' not found in pipeline '{}'", name, entry.label);
                }
                entry
                    .uniform_locations
                    .insert(name.to_string(), looked_up.clone());
                looked_up
            };
            (entry.program, location)
        };

        let Some(location) = location else {
            return Ok(());
        };
        unsafe { self.gl.use_program(Some(program)) };
        apply_uniform(&self.gl, &location, value);
        self.restore_bound_program();
        Ok(())
    }

    fn bind_vertex_buffer(
        &mut self,
        binding: u32,
        buffer: BufferId,
        offset: u64,
        stride: u32,
    ) -> Result<(), ResourceError> {
        if self.bound_graphics_pipeline.is_none() {
            return Err(ResourceError::NoPipelineBound);
        }
        let entry = self.buffers.get(buffer).ok_or(ResourceError::NotFound {
            kind: ResourceKind::Buffer,
            index: buffer.index(),
        })?;
        unsafe {
            self.gl
                .bind_vertex_buffer(binding, Some(entry.raw), offset as i32, stride as i32);
        }
        Ok(())
    }

    fn draw(&mut self, first_vertex: u32, vertex_count: u32) -> Result<(), ResourceError> {
        let Some(pipeline) = self.bound_graphics_pipeline else {
            return Err(ResourceError::NoPipelineBound);
        };
        let topology = self
            .graphics_pipelines
            .get(pipeline)
            .map(|entry| entry.topology)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: pipeline.index(),
            })?;
        unsafe {
            self.gl
                .draw_arrays(topology, first_vertex as i32, vertex_count as i32);
        }
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_buffer: BufferId,
        element_count: u32,
    ) -> Result<(), ResourceError> {
        let Some(pipeline) = self.bound_graphics_pipeline else {
            return Err(ResourceError::NoPipelineBound);
        };
        let topology = self
            .graphics_pipelines
            .get(pipeline)
            .map(|entry| entry.topology)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: pipeline.index(),
            })?;
        let raw = self
            .buffers
            .get(index_buffer)
            .map(|entry| entry.raw)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Buffer,
                index: index_buffer.index(),
            })?;
        unsafe {
            if self.last_index_buffer != Some(index_buffer) {
                self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(raw));
                self.last_index_buffer = Some(index_buffer);
            }
            self.gl
                .draw_elements(topology, element_count as i32, glow::UNSIGNED_INT, 0);
        }
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        index_buffer: BufferId,
        element_count: u32,
        instance_count: u32,
    ) -> Result<(), ResourceError> {
        let Some(pipeline) = self.bound_graphics_pipeline else {
            return Err(ResourceError::NoPipelineBound);
        };
        let topology = self
            .graphics_pipelines
            .get(pipeline)
            .map(|entry| entry.topology)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: pipeline.index(),
            })?;
        let raw = self
            .buffers
            .get(index_buffer)
            .map(|entry| entry.raw)
            .ok_or(ResourceError::NotFound {
                kind: ResourceKind::Buffer,
                index: index_buffer.index(),
            })?;
        unsafe {
            if self.last_index_buffer != Some(index_buffer) {
                self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(raw));
                self.last_index_buffer = Some(index_buffer);
            }
            self.gl.draw_elements_instanced(
                topology,
                element_count as i32,
                glow::UNSIGNED_INT,
                0,
                instance_count as i32,
            );
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        groups_x: u32,
        groups_y: u32,
        groups_z: u32,
    ) -> Result<(), ResourceError> {
        if self.bound_compute_pipeline.is_none() {
            return Err(ResourceError::NoPipelineBound);
        }
        unsafe { self.gl.dispatch_compute(groups_x, groups_y, groups_z) };
        Ok(())
    }

    fn set_viewport(&mut self, x: i32, y: i32, extent: Extent2D) {
        unsafe {
            self.gl
                .viewport(x, y, extent.width as i32, extent.height as i32);
        }
    }

    fn push_debug_group(&mut self, label: &str) {
        unsafe {
            self.gl
                .push_debug_group(glow::DEBUG_SOURCE_APPLICATION, 0, label);
        }
    }

    fn pop_debug_group(&mut self) {
        unsafe { self.gl.pop_debug_group() };
    }

    fn device_info(&self) -> RenderDeviceInfo {
        self.info.clone()
    }
}

impl Drop for GlDevice {
    fn drop(&mut self) {
        unsafe {
            for (_, entry) in self.framebuffers.drain() {
                self.gl.delete_framebuffer(entry.raw);
            }
            for (_, entry) in self.textures.drain() {
                self.gl.delete_texture(entry.raw);
            }
            for (_, entry) in self.buffers.drain() {
                self.gl.delete_buffer(entry.raw);
            }
            for (_, entry) in self.graphics_pipelines.drain() {
                self.gl.delete_program(entry.program);
                self.gl.delete_vertex_array(entry.vertex_array);
            }
            for (_, entry) in self.compute_pipelines.drain() {
                self.gl.delete_program(entry.program);
            }
        }
        log::debug!("OpenGL device dropped; all GPU objects released");
    }
}
