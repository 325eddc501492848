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

//! The rendering hardware interface.
//!
//! Everything a backend needs to implement and everything a renderer needs
//! to consume lives here: typed handles, format classification tables,
//! resource descriptors, the error hierarchy, and the
//! [`GraphicsDevice`](device::GraphicsDevice) trait that ties them together.
//! Nothing in this module talks to a graphics API directly.

pub mod buffer;
pub mod device;
pub mod error;
pub mod format;
pub mod framebuffer;
pub mod handle;
pub mod pipeline;
pub mod texture;

pub use self::buffer::{Buffer, BufferDescriptor, BufferUsage};
pub use self::device::{GraphicsDevice, RenderDeviceInfo};
pub use self::error::{PipelineError, RenderError, ResourceError, ResourceKind, ShaderError};
pub use self::format::{AttributeClass, BaseTypeClass, Format, UploadFormat, UploadType};
pub use self::framebuffer::{
    ClearDepthStencil, ClearValue, ColorAttachmentDescriptor, DepthStencilAttachmentDescriptor,
    Framebuffer, FramebufferDescriptor, LoadOp, MAX_COLOR_ATTACHMENTS,
};
pub use self::handle::{
    BufferId, ComputePipelineId, FramebufferId, GraphicsPipelineId, ResourceId, SlotTable,
    TextureId, INVALID_INDEX,
};
pub use self::pipeline::{
    ComputePipelineDescriptor, GraphicsPipelineDescriptor, InputAssemblyDescriptor,
    PrimitiveTopology, ShaderSourceData, ShaderStage, UniformValue, VertexAttributeDescriptor,
    VertexInputDescriptor, MAX_VERTEX_ATTRIBUTES,
};
pub use self::texture::{
    SampleCount, Texture, TextureDescriptor, TextureType, TextureUploadDescriptor,
};
