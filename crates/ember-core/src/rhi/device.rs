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

//! Defines the contract every graphics backend implements.
//!
//! The trait is object safe so renderers can hold a `&mut dyn GraphicsDevice`
//! and stay ignorant of the backing API. All resources are referred to by the
//! typed handles from [`crate::rhi::handle`]; a destroyed handle stays stale
//! forever and resolves to [`ResourceError::NotFound`].

use crate::math::Extent2D;
use crate::rhi::buffer::{Buffer, BufferDescriptor};
use crate::rhi::error::ResourceError;
use crate::rhi::framebuffer::{Framebuffer, FramebufferDescriptor};
use crate::rhi::handle::{
    BufferId, ComputePipelineId, FramebufferId, GraphicsPipelineId, TextureId,
};
use crate::rhi::pipeline::{ComputePipelineDescriptor, GraphicsPipelineDescriptor, UniformValue};
use crate::rhi::texture::{Texture, TextureDescriptor, TextureUploadDescriptor};

/// Identity strings reported by the backing device at creation.
#[derive(Debug, Clone, Default)]
pub struct RenderDeviceInfo {
    /// The driver vendor (e.g., "NVIDIA Corporation").
    pub vendor: String,
    /// The device the context runs on (e.g., "NVIDIA GeForce RTX 4080").
    pub renderer: String,
    /// The API version string exposed by the driver.
    pub version: String,
}

/// The abstract rendering device.
///
/// Creation methods hand out monotonically increasing handles and never reuse
/// a slot, so a handle held past `destroy_*` is detectably stale rather than
/// silently aliased onto a newer resource.
pub trait GraphicsDevice {
    // --- Textures ---

    /// Creates a texture with immutable storage sized by the descriptor.
    fn create_texture(&mut self, desc: &TextureDescriptor<'_>) -> Result<TextureId, ResourceError>;

    /// Copies pixel data into a region of one mip level.
    ///
    /// When the upload descriptor leaves format or type unset, both are
    /// derived from the texture's own format.
    fn upload_texture(
        &mut self,
        texture: TextureId,
        upload: &TextureUploadDescriptor<'_>,
    ) -> Result<(), ResourceError>;

    /// Populates every mip level below the base from its contents.
    fn generate_mipmaps(&mut self, texture: TextureId) -> Result<(), ResourceError>;

    /// Makes the texture shader-visible and returns its residency handle.
    fn make_texture_resident(&mut self, texture: TextureId) -> Result<u64, ResourceError>;

    /// Revokes the texture's residency handle.
    fn make_texture_non_resident(&mut self, texture: TextureId) -> Result<(), ResourceError>;

    /// Destroys the texture. Its handle is stale from here on.
    fn destroy_texture(&mut self, texture: TextureId) -> Result<(), ResourceError>;

    /// Looks up the record describing a live texture.
    fn texture(&self, texture: TextureId) -> Result<&Texture, ResourceError>;

    /// Binds the texture to a sampler unit for subsequent draws.
    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<(), ResourceError>;

    // --- Buffers ---

    /// Creates a buffer, optionally filled with initial data.
    fn create_buffer(&mut self, desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError>;

    /// Overwrites a range of a buffer created with
    /// [`BufferUsage::DYNAMIC_UPDATE`](crate::rhi::buffer::BufferUsage::DYNAMIC_UPDATE).
    fn update_buffer(
        &mut self,
        buffer: BufferId,
        offset: u64,
        data: &[u8],
    ) -> Result<(), ResourceError>;

    /// Destroys the buffer. Its handle is stale from here on.
    fn destroy_buffer(&mut self, buffer: BufferId) -> Result<(), ResourceError>;

    /// Looks up the record describing a live buffer.
    fn buffer(&self, buffer: BufferId) -> Result<&Buffer, ResourceError>;

    /// Binds the buffer to an indexed uniform binding point.
    fn bind_uniform_buffer(&mut self, binding: u32, buffer: BufferId)
        -> Result<(), ResourceError>;

    /// Binds the buffer to an indexed shader storage binding point.
    fn bind_storage_buffer(&mut self, binding: u32, buffer: BufferId)
        -> Result<(), ResourceError>;

    // --- Framebuffers ---

    /// Creates a framebuffer and one backing texture per attachment.
    ///
    /// An incomplete framebuffer is reported through the log rather than an
    /// error; the handle stays usable so a broken pass degrades instead of
    /// aborting the frame.
    fn create_framebuffer(
        &mut self,
        desc: &FramebufferDescriptor<'_>,
    ) -> Result<FramebufferId, ResourceError>;

    /// Looks up the record describing a live framebuffer.
    fn framebuffer(&self, framebuffer: FramebufferId) -> Result<&Framebuffer, ResourceError>;

    /// Binds the framebuffer and applies each attachment's load op.
    ///
    /// Attachments with [`LoadOp::Clear`](crate::rhi::framebuffer::LoadOp::Clear)
    /// are cleared on the path matching their format's base type class;
    /// attachments with `LoadOp::Load` keep their previous contents. A
    /// `LoadOp::DontCare` attachment starts the pass with undefined contents.
    fn begin_render_pass(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError>;

    /// Binds the window surface as the render target. Nothing is cleared.
    fn begin_default_pass(&mut self);

    /// Destroys the framebuffer and the attachment textures it created.
    fn destroy_framebuffer(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError>;

    // --- Pipelines ---

    /// Compiles and links a graphics pipeline.
    ///
    /// On failure nothing is recorded and no handle is consumed; the error
    /// carries the pipeline label and the backend's diagnostics.
    fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDescriptor<'_>,
    ) -> Result<GraphicsPipelineId, ResourceError>;

    /// Binds a graphics pipeline for subsequent draws.
    fn bind_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError>;

    /// Destroys the graphics pipeline. Its handle is stale from here on.
    fn destroy_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError>;

    /// Compiles and links a compute pipeline.
    fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDescriptor<'_>,
    ) -> Result<ComputePipelineId, ResourceError>;

    /// Binds a compute pipeline for subsequent dispatches.
    fn bind_compute_pipeline(&mut self, pipeline: ComputePipelineId)
        -> Result<(), ResourceError>;

    /// Destroys the compute pipeline. Its handle is stale from here on.
    fn destroy_compute_pipeline(
        &mut self,
        pipeline: ComputePipelineId,
    ) -> Result<(), ResourceError>;

    /// Sets a named uniform on a graphics pipeline.
    ///
    /// Unknown names are tolerated; drivers strip unused uniforms, so a
    /// missing location is not an error.
    fn set_uniform(
        &mut self,
        pipeline: GraphicsPipelineId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), ResourceError>;

    /// Sets a named uniform on a compute pipeline.
    fn set_compute_uniform(
        &mut self,
        pipeline: ComputePipelineId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), ResourceError>;

    // --- Drawing ---

    /// Attaches a vertex buffer to one binding of the bound pipeline's layout.
    fn bind_vertex_buffer(
        &mut self,
        binding: u32,
        buffer: BufferId,
        offset: u64,
        stride: u32,
    ) -> Result<(), ResourceError>;

    /// Draws non-indexed geometry with the bound graphics pipeline.
    fn draw(&mut self, first_vertex: u32, vertex_count: u32) -> Result<(), ResourceError>;

    /// Draws indexed geometry using 32-bit indices from `index_buffer`.
    fn draw_indexed(
        &mut self,
        index_buffer: BufferId,
        element_count: u32,
    ) -> Result<(), ResourceError>;

    /// Draws `instance_count` instances of indexed geometry.
    fn draw_indexed_instanced(
        &mut self,
        index_buffer: BufferId,
        element_count: u32,
        instance_count: u32,
    ) -> Result<(), ResourceError>;

    /// Dispatches the bound compute pipeline.
    fn dispatch(
        &mut self,
        groups_x: u32,
        groups_y: u32,
        groups_z: u32,
    ) -> Result<(), ResourceError>;

    // --- State ---

    /// Sets the viewport rectangle in framebuffer pixels.
    fn set_viewport(&mut self, x: i32, y: i32, extent: Extent2D);

    /// Opens a labelled group in the backend's debug stream.
    fn push_debug_group(&mut self, label: &str);

    /// Closes the innermost debug group.
    fn pop_debug_group(&mut self);

    // --- Introspection ---

    /// Identifies the backing device and driver.
    fn device_info(&self) -> RenderDeviceInfo;
}
