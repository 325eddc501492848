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

//! Scenario tests driving [`ForwardRenderer`] against a recording device.
//!
//! The device keeps the same handle bookkeeping a real backend would but
//! records calls instead of touching a graphics API, so resize behavior,
//! lazy resource creation, and teardown can be asserted headlessly.

use ember_core::math::{Extent2D, Extent3D, Mat4};
use ember_core::render::{FrameContext, RendererSettings, ViewportState};
use ember_core::rhi::framebuffer::{ColorAttachment, DepthStencilAttachment};
use ember_core::rhi::{
    Buffer, BufferDescriptor, BufferId, ComputePipelineDescriptor, ComputePipelineId, Format,
    Framebuffer, FramebufferDescriptor, FramebufferId, GraphicsPipelineDescriptor,
    GraphicsPipelineId, PipelineError, RenderDeviceInfo, ResourceError, ResourceId, ResourceKind,
    SampleCount, SlotTable, Texture, TextureDescriptor, TextureId, TextureType,
    TextureUploadDescriptor, UniformValue, MAX_COLOR_ATTACHMENTS,
};
use ember_core::{GraphicsDevice, RenderError};
use ember_render::components::{
    GpuMaterialRef, GpuMeshRef, MaterialSource, MeshSource, NeedsGpuResources, Transform,
};
use ember_render::gpu::VertexAttributes;
use ember_render::{
    AssetLibrary, CpuImage, CpuMaterial, CpuMesh, ForwardRenderer, Renderer, World,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn missing(kind: ResourceKind, index: usize) -> ResourceError {
    ResourceError::NotFound { kind, index }
}

/// A graphics device that keeps real handle bookkeeping but records calls
/// instead of issuing them to a graphics API.
#[derive(Default)]
struct RecordingDevice {
    textures: SlotTable<TextureId, Texture>,
    buffers: SlotTable<BufferId, Buffer>,
    framebuffers: SlotTable<FramebufferId, Framebuffer>,
    graphics_pipelines: SlotTable<GraphicsPipelineId, String>,
    compute_pipelines: SlotTable<ComputePipelineId, String>,
    calls: Vec<&'static str>,
    uniforms: Vec<String>,
    viewports: Vec<(i32, i32, Extent2D)>,
    draws: Vec<(u32, u32)>,
    indexed_draws: u32,
    buffers_created: u32,
    framebuffers_destroyed: u32,
    next_resident_handle: u64,
    fail_graphics_pipelines: bool,
}

impl RecordingDevice {
    fn insert_backing_texture(
        &mut self,
        texture_type: TextureType,
        format: Format,
        extent: Extent3D,
        mip_level_count: u32,
    ) -> TextureId {
        self.textures.insert_with(|id| Texture {
            id,
            texture_type,
            format,
            extent,
            mip_level_count,
            sample_count: SampleCount::X1,
            resident_handle: None,
        })
    }

    fn call_position(&self, name: &str) -> Option<usize> {
        self.calls.iter().position(|call| *call == name)
    }

    fn call_count(&self, name: &str) -> usize {
        self.calls.iter().filter(|call| **call == name).count()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_texture(&mut self, desc: &TextureDescriptor<'_>) -> Result<TextureId, ResourceError> {
        self.calls.push("create_texture");
        Ok(self.insert_backing_texture(
            desc.texture_type,
            desc.format,
            desc.extent,
            desc.mip_level_count,
        ))
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        _upload: &TextureUploadDescriptor<'_>,
    ) -> Result<(), ResourceError> {
        self.calls.push("upload_texture");
        self.textures
            .get(texture)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Texture, texture.index()))
    }

    fn generate_mipmaps(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        self.calls.push("generate_mipmaps");
        self.textures
            .get(texture)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Texture, texture.index()))
    }

    fn make_texture_resident(&mut self, texture: TextureId) -> Result<u64, ResourceError> {
        self.calls.push("make_texture_resident");
        self.next_resident_handle += 1;
        let handle = self.next_resident_handle;
        let record = self
            .textures
            .get_mut(texture)
            .ok_or(missing(ResourceKind::Texture, texture.index()))?;
        if let Some(existing) = record.resident_handle {
            return Ok(existing);
        }
        record.resident_handle = Some(handle);
        Ok(handle)
    }

    fn make_texture_non_resident(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        self.calls.push("make_texture_non_resident");
        let record = self
            .textures
            .get_mut(texture)
            .ok_or(missing(ResourceKind::Texture, texture.index()))?;
        record.resident_handle = None;
        Ok(())
    }

    fn destroy_texture(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        self.calls.push("destroy_texture");
        self.textures
            .remove(texture)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Texture, texture.index()))
    }

    fn texture(&self, texture: TextureId) -> Result<&Texture, ResourceError> {
        self.textures
            .get(texture)
            .ok_or(missing(ResourceKind::Texture, texture.index()))
    }

    fn bind_texture(&mut self, _unit: u32, texture: TextureId) -> Result<(), ResourceError> {
        self.calls.push("bind_texture");
        self.textures
            .get(texture)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Texture, texture.index()))
    }

    fn create_buffer(&mut self, desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError> {
        self.calls.push("create_buffer");
        self.buffers_created += 1;
        let size = desc.size;
        let usage = desc.usage;
        Ok(self.buffers.insert_with(|id| Buffer { id, size, usage }))
    }

    fn update_buffer(
        &mut self,
        buffer: BufferId,
        _offset: u64,
        _data: &[u8],
    ) -> Result<(), ResourceError> {
        self.calls.push("update_buffer");
        self.buffers
            .get(buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn destroy_buffer(&mut self, buffer: BufferId) -> Result<(), ResourceError> {
        self.calls.push("destroy_buffer");
        self.buffers
            .remove(buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn buffer(&self, buffer: BufferId) -> Result<&Buffer, ResourceError> {
        self.buffers
            .get(buffer)
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn bind_uniform_buffer(
        &mut self,
        _binding: u32,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        self.calls.push("bind_uniform_buffer");
        self.buffers
            .get(buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn bind_storage_buffer(
        &mut self,
        _binding: u32,
        buffer: BufferId,
    ) -> Result<(), ResourceError> {
        self.calls.push("bind_storage_buffer");
        self.buffers
            .get(buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn create_framebuffer(
        &mut self,
        desc: &FramebufferDescriptor<'_>,
    ) -> Result<FramebufferId, ResourceError> {
        self.calls.push("create_framebuffer");
        desc.validate()?;

        let mut color_attachments: [Option<ColorAttachment>; MAX_COLOR_ATTACHMENTS] =
            Default::default();
        for (slot, attachment) in desc.color_attachments.iter().enumerate() {
            if let Some(attachment) = attachment {
                let texture = self.insert_backing_texture(
                    TextureType::Texture2D,
                    attachment.format,
                    attachment.extent.into(),
                    1,
                );
                color_attachments[slot] = Some(ColorAttachment {
                    texture,
                    format: attachment.format,
                    extent: attachment.extent,
                    load_op: attachment.load_op,
                    clear_value: attachment.clear_value,
                });
            }
        }
        let depth_stencil_attachment = desc.depth_stencil_attachment.as_ref().map(|attachment| {
            let texture = self.insert_backing_texture(
                TextureType::Texture2D,
                attachment.format,
                attachment.extent.into(),
                1,
            );
            DepthStencilAttachment {
                texture,
                format: attachment.format,
                extent: attachment.extent,
                load_op: attachment.load_op,
                clear_depth_stencil: attachment.clear_depth_stencil,
            }
        });

        Ok(self.framebuffers.insert_with(|id| Framebuffer {
            id,
            color_attachments,
            depth_stencil_attachment,
        }))
    }

    fn framebuffer(&self, framebuffer: FramebufferId) -> Result<&Framebuffer, ResourceError> {
        self.framebuffers
            .get(framebuffer)
            .ok_or(missing(ResourceKind::Framebuffer, framebuffer.index()))
    }

    fn begin_render_pass(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError> {
        self.calls.push("begin_render_pass");
        self.framebuffers
            .get(framebuffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Framebuffer, framebuffer.index()))
    }

    fn begin_default_pass(&mut self) {
        self.calls.push("begin_default_pass");
    }

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferId) -> Result<(), ResourceError> {
        self.calls.push("destroy_framebuffer");
        let record = self
            .framebuffers
            .remove(framebuffer)
            .ok_or(missing(ResourceKind::Framebuffer, framebuffer.index()))?;
        for attachment in record.color_attachments.into_iter().flatten() {
            self.textures.remove(attachment.texture);
        }
        if let Some(depth) = record.depth_stencil_attachment {
            self.textures.remove(depth.texture);
        }
        self.framebuffers_destroyed += 1;
        Ok(())
    }

    fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDescriptor<'_>,
    ) -> Result<GraphicsPipelineId, ResourceError> {
        self.calls.push("create_graphics_pipeline");
        let label = desc.label.as_deref().unwrap_or("unnamed").to_owned();
        if self.fail_graphics_pipelines {
            return Err(ResourceError::Pipeline(PipelineError::LinkError {
                pipeline_label: label,
                details: "forced link failure".to_owned(),
            }));
        }
        Ok(self.graphics_pipelines.insert(label))
    }

    fn bind_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError> {
        self.calls.push("bind_graphics_pipeline");
        self.graphics_pipelines
            .get(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::GraphicsPipeline, pipeline.index()))
    }

    fn destroy_graphics_pipeline(
        &mut self,
        pipeline: GraphicsPipelineId,
    ) -> Result<(), ResourceError> {
        self.calls.push("destroy_graphics_pipeline");
        self.graphics_pipelines
            .remove(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::GraphicsPipeline, pipeline.index()))
    }

    fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDescriptor<'_>,
    ) -> Result<ComputePipelineId, ResourceError> {
        self.calls.push("create_compute_pipeline");
        let label = desc.label.as_deref().unwrap_or("unnamed").to_owned();
        Ok(self.compute_pipelines.insert(label))
    }

    fn bind_compute_pipeline(&mut self, pipeline: ComputePipelineId) -> Result<(), ResourceError> {
        self.calls.push("bind_compute_pipeline");
        self.compute_pipelines
            .get(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::ComputePipeline, pipeline.index()))
    }

    fn destroy_compute_pipeline(
        &mut self,
        pipeline: ComputePipelineId,
    ) -> Result<(), ResourceError> {
        self.calls.push("destroy_compute_pipeline");
        self.compute_pipelines
            .remove(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::ComputePipeline, pipeline.index()))
    }

    fn set_uniform(
        &mut self,
        pipeline: GraphicsPipelineId,
        name: &str,
        _value: UniformValue,
    ) -> Result<(), ResourceError> {
        self.calls.push("set_uniform");
        self.uniforms.push(name.to_owned());
        self.graphics_pipelines
            .get(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::GraphicsPipeline, pipeline.index()))
    }

    fn set_compute_uniform(
        &mut self,
        pipeline: ComputePipelineId,
        name: &str,
        _value: UniformValue,
    ) -> Result<(), ResourceError> {
        self.calls.push("set_compute_uniform");
        self.uniforms.push(name.to_owned());
        self.compute_pipelines
            .get(pipeline)
            .map(|_| ())
            .ok_or(missing(ResourceKind::ComputePipeline, pipeline.index()))
    }

    fn bind_vertex_buffer(
        &mut self,
        _binding: u32,
        buffer: BufferId,
        _offset: u64,
        _stride: u32,
    ) -> Result<(), ResourceError> {
        self.calls.push("bind_vertex_buffer");
        self.buffers
            .get(buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, buffer.index()))
    }

    fn draw(&mut self, first_vertex: u32, vertex_count: u32) -> Result<(), ResourceError> {
        self.calls.push("draw");
        self.draws.push((first_vertex, vertex_count));
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        index_buffer: BufferId,
        _element_count: u32,
    ) -> Result<(), ResourceError> {
        self.calls.push("draw_indexed");
        self.indexed_draws += 1;
        self.buffers
            .get(index_buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, index_buffer.index()))
    }

    fn draw_indexed_instanced(
        &mut self,
        index_buffer: BufferId,
        _element_count: u32,
        _instance_count: u32,
    ) -> Result<(), ResourceError> {
        self.calls.push("draw_indexed_instanced");
        self.buffers
            .get(index_buffer)
            .map(|_| ())
            .ok_or(missing(ResourceKind::Buffer, index_buffer.index()))
    }

    fn dispatch(
        &mut self,
        _groups_x: u32,
        _groups_y: u32,
        _groups_z: u32,
    ) -> Result<(), ResourceError> {
        self.calls.push("dispatch");
        Ok(())
    }

    fn set_viewport(&mut self, x: i32, y: i32, extent: Extent2D) {
        self.calls.push("set_viewport");
        self.viewports.push((x, y, extent));
    }

    fn push_debug_group(&mut self, _label: &str) {
        self.calls.push("push_debug_group");
    }

    fn pop_debug_group(&mut self) {
        self.calls.push("pop_debug_group");
    }

    fn device_info(&self) -> RenderDeviceInfo {
        RenderDeviceInfo {
            vendor: "ember".to_string(),
            renderer: "recording device".to_string(),
            version: "1.0".to_string(),
        }
    }
}

fn unit_quad() -> CpuMesh {
    let attribute = VertexAttributes {
        normal: [0.0, 0.0, 1.0],
        uv: [0.0, 0.0],
        tangent: [1.0, 0.0, 0.0, 1.0],
    };
    CpuMesh {
        positions: vec![
            [-0.5, -0.5, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.5, 0.0],
            [-0.5, 0.5, 0.0],
        ],
        attributes: vec![attribute; 4],
        indices: vec![0, 1, 2, 0, 2, 3],
        initial_transform: Mat4::IDENTITY,
    }
}

fn library() -> AssetLibrary {
    let mut library = AssetLibrary::new();
    library.insert_mesh("quad", unit_quad());
    library.insert_material(
        "plaster",
        CpuMaterial {
            base_color_image: Some(CpuImage::new(Extent2D::new(2, 2), vec![255; 16])),
            ..Default::default()
        },
    );
    library
}

fn frame(frame_counter: u64) -> FrameContext {
    FrameContext {
        delta_time: 1.0 / 60.0,
        frame_counter,
        is_srgb_disabled: false,
    }
}

fn loaded_renderer(
    device: &mut RecordingDevice,
    settings: RendererSettings,
) -> ForwardRenderer<AssetLibrary> {
    let mut renderer = ForwardRenderer::new(library(), settings);
    renderer.load(device).expect("renderer load");
    renderer
}

#[test]
fn test_first_frame_builds_render_targets() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    // Case 1: the startup flag routes the first frame through the resize path.
    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");
    assert_eq!(device.framebuffers.live_count(), 1);
    assert_eq!(device.framebuffers_destroyed, 0);
    assert!(device.viewports.contains(&(0, 0, Extent2D::new(1280, 720))));
    assert!(!viewport.needs_resize());

    // Case 2: nothing is rebuilt while the flags stay low.
    let created = device.call_count("create_framebuffer");
    renderer
        .render(&mut device, &mut world, &frame(1), &mut viewport)
        .expect("second frame");
    assert_eq!(device.call_count("create_framebuffer"), created);
    assert_eq!(device.framebuffers_destroyed, 0);
}

#[test]
fn test_resize_rebuilds_targets_at_scaled_size() {
    init_logs();
    let mut device = RecordingDevice::default();
    let settings = RendererSettings {
        resolution_scale: 0.5,
        ..Default::default()
    };
    let mut renderer = loaded_renderer(&mut device, settings);
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1920, 1080));

    // Case 1: the first targets already honor the resolution scale.
    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");
    let (_, framebuffer) = device.framebuffers.iter().next().expect("one framebuffer");
    let albedo = framebuffer.color_attachments[0].as_ref().expect("albedo");
    assert_eq!(albedo.extent, Extent2D::new(960, 540));

    // Case 2: a window resize destroys the old targets before recreating.
    viewport.window_framebuffer_size = Extent2D::new(1600, 900);
    viewport.window_framebuffer_resized = true;
    renderer
        .render(&mut device, &mut world, &frame(1), &mut viewport)
        .expect("resized frame");
    assert_eq!(device.framebuffers_destroyed, 1);
    assert_eq!(device.framebuffers.live_count(), 1);
    let (_, framebuffer) = device.framebuffers.iter().next().expect("one framebuffer");
    let albedo = framebuffer.color_attachments[0].as_ref().expect("albedo");
    assert_eq!(albedo.extent, Extent2D::new(800, 450));
    assert!(device.viewports.contains(&(0, 0, Extent2D::new(800, 450))));
    assert!(!viewport.needs_resize());
}

#[test]
fn test_zero_sized_scene_viewer_falls_back_to_window() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));
    // Editor mode with a scene viewer the docking layout has not sized yet.
    viewport.is_editor = true;

    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");

    let (_, framebuffer) = device.framebuffers.iter().next().expect("one framebuffer");
    let albedo = framebuffer.color_attachments[0].as_ref().expect("albedo");
    assert_eq!(albedo.extent, Extent2D::new(1280, 720));
}

#[test]
fn test_lazy_creation_is_shared_by_name() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    let first = world.spawn((
        MeshSource("quad".to_owned()),
        NeedsGpuResources,
        Transform::default(),
    ));
    let second = world.spawn((MeshSource("quad".to_owned()), NeedsGpuResources));

    // Case 1: one cached mesh serves both entities.
    let buffers_before = device.buffers_created;
    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");
    assert_eq!(device.buffers_created - buffers_before, 3);
    let mesh = renderer.cached_mesh("quad").expect("cached mesh");
    assert_eq!(mesh.vertex_count, 4);
    assert_eq!(mesh.index_count, 6);
    for entity in [first, second] {
        assert_eq!(
            world.get::<GpuMeshRef>(entity).map(|key| key.0.as_str()),
            Some("quad")
        );
        assert!(!world.has::<NeedsGpuResources>(entity));
    }
    assert_eq!(device.indexed_draws, 2);

    // Case 2: the next frame reuses the cache and just draws.
    renderer
        .render(&mut device, &mut world, &frame(1), &mut viewport)
        .expect("second frame");
    assert_eq!(device.buffers_created - buffers_before, 3);
    assert_eq!(device.indexed_draws, 4);
}

#[test]
fn test_material_textures_become_resident() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    let entity = world.spawn((
        MeshSource("quad".to_owned()),
        MaterialSource("plaster".to_owned()),
        NeedsGpuResources,
        Transform::default(),
    ));

    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");

    assert!(world.has::<GpuMaterialRef>(entity));
    let material = renderer.cached_material("plaster").expect("cached material");
    assert_ne!(material.uniforms.base_color_handle, 0);
    assert_eq!(material.uniforms.normal_handle, 0, "no normal map registered");

    let texture = material.base_color_texture.expect("base color texture");
    let record = device.texture(texture).expect("live texture");
    assert!(record.resident_handle.is_some());
    assert_eq!(record.mip_level_count, 2, "full chain for a 2x2 image");
}

#[test]
fn test_render_before_load_is_refused() {
    let mut device = RecordingDevice::default();
    let mut renderer = ForwardRenderer::new(library(), RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    let result = renderer.render(&mut device, &mut world, &frame(0), &mut viewport);

    assert!(matches!(result, Err(RenderError::NotInitialized)));
    assert_eq!(device.framebuffers.live_count(), 0);
}

#[test]
fn test_missing_mesh_asset_fails_by_name() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    world.spawn((MeshSource("ghost".to_owned()), NeedsGpuResources));

    match renderer.render(&mut device, &mut world, &frame(0), &mut viewport) {
        Err(RenderError::MeshNotFound { name }) => assert_eq!(name, "ghost"),
        other => panic!("expected a missing mesh error, got {other:?}"),
    }
}

#[test]
fn test_pipeline_failure_fails_load_cleanly() {
    init_logs();
    let mut device = RecordingDevice::default();
    device.fail_graphics_pipelines = true;
    let mut renderer = ForwardRenderer::new(library(), RendererSettings::default());

    // Case 1: the failure surfaces as an initialization error and consumes
    // no pipeline slot.
    let error = renderer.load(&mut device).expect_err("load must fail");
    assert!(matches!(error, RenderError::InitializationFailed(_)));
    assert_eq!(device.graphics_pipelines.live_count(), 0);

    // Case 2: a later load against a healthy device succeeds.
    device.fail_graphics_pipelines = false;
    renderer.load(&mut device).expect("load after recovery");
    assert_eq!(device.graphics_pipelines.live_count(), 2);
}

#[test]
fn test_passes_run_in_order() {
    init_logs();
    let mut device = RecordingDevice::default();
    let settings = RendererSettings {
        debug: true,
        ..Default::default()
    };
    let mut renderer = loaded_renderer(&mut device, settings);
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    world.spawn((
        MeshSource("quad".to_owned()),
        MaterialSource("plaster".to_owned()),
        NeedsGpuResources,
        Transform::default(),
    ));

    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");

    let geometry = device.call_position("begin_render_pass").expect("geometry pass");
    let scene_draw = device.call_position("draw_indexed").expect("scene draw");
    let composite = device.call_position("begin_default_pass").expect("composite pass");
    let fullscreen = device.call_position("draw").expect("fullscreen draw");
    assert!(geometry < scene_draw);
    assert!(scene_draw < composite);
    assert!(composite < fullscreen);

    assert!(device.draws.contains(&(0, 3)), "composite draws one triangle");
    assert!(device.uniforms.iter().any(|name| name == "u_view_projection"));
    assert!(device.uniforms.iter().any(|name| name == "u_model"));
    assert!(device.uniforms.iter().any(|name| name == "u_srgb_disabled"));
    assert_eq!(device.call_count("push_debug_group"), 2);
    assert_eq!(device.call_count("pop_debug_group"), 2);
}

#[test]
fn test_unload_releases_everything() {
    init_logs();
    let mut device = RecordingDevice::default();
    let mut renderer = loaded_renderer(&mut device, RendererSettings::default());
    let mut world = World::new();
    let mut viewport = ViewportState::new(Extent2D::new(1280, 720));

    world.spawn((
        MeshSource("quad".to_owned()),
        MaterialSource("plaster".to_owned()),
        NeedsGpuResources,
        Transform::default(),
    ));
    renderer
        .render(&mut device, &mut world, &frame(0), &mut viewport)
        .expect("first frame");

    renderer.unload(&mut device);

    assert_eq!(device.textures.live_count(), 0);
    assert_eq!(device.buffers.live_count(), 0);
    assert_eq!(device.framebuffers.live_count(), 0);
    assert_eq!(device.graphics_pipelines.live_count(), 0);

    let result = renderer.render(&mut device, &mut world, &frame(1), &mut viewport);
    assert!(matches!(result, Err(RenderError::NotInitialized)));
}
