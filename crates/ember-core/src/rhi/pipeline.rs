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

//! Defines data structures related to graphics and compute pipelines.

use std::borrow::Cow;
use std::path::PathBuf;

use glam::{IVec4, Mat4, Vec2, Vec3, Vec4};

use crate::rhi::format::Format;

/// Maximum number of vertex attributes an input layout can carry.
pub const MAX_VERTEX_ATTRIBUTES: usize = 8;

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Independent triangles, three vertices each.
    #[default]
    Triangles,
    /// A connected strip of triangles.
    TriangleStrip,
    /// A fan of triangles sharing the first vertex.
    TriangleFan,
    /// Independent lines, two vertices each.
    Lines,
}

/// The programmable stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
    /// Compute stage.
    Compute,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
            ShaderStage::Compute => write!(f, "Compute"),
        }
    }
}

/// Where a shader's GLSL source comes from.
#[derive(Debug, Clone)]
pub enum ShaderSourceData<'a> {
    /// Source text held in memory. Include directives resolve against no
    /// directory and are rejected.
    Glsl(Cow<'a, str>),
    /// Source loaded from a file. Include directives resolve relative to
    /// the file's parent directory.
    GlslFile(PathBuf),
}

/// Primitive assembly state for a graphics pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputAssemblyDescriptor {
    /// How vertices are assembled into primitives.
    pub topology: PrimitiveTopology,
    /// Whether the primitive restart index splits strips and fans.
    pub primitive_restart: bool,
}

impl Default for InputAssemblyDescriptor {
    fn default() -> Self {
        Self {
            topology: PrimitiveTopology::Triangles,
            primitive_restart: false,
        }
    }
}

/// One vertex attribute within an input layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeDescriptor {
    /// The shader input location the attribute feeds.
    pub location: u32,
    /// The vertex buffer binding slot the attribute reads from.
    pub binding: u32,
    /// The element format of the attribute.
    pub format: Format,
    /// Byte offset of the attribute within its binding's stride.
    pub offset: u32,
}

/// The vertex input layout of a graphics pipeline.
///
/// Pipelines without one draw from no vertex buffers, generating vertices
/// in the shader.
#[derive(Debug, Clone, Default)]
pub struct VertexInputDescriptor {
    /// Up to [`MAX_VERTEX_ATTRIBUTES`] attributes, by slot.
    pub attributes: [Option<VertexAttributeDescriptor>; MAX_VERTEX_ATTRIBUTES],
}

/// A descriptor used to create a graphics pipeline through
/// [`GraphicsDevice::create_graphics_pipeline`](crate::rhi::device::GraphicsDevice::create_graphics_pipeline).
#[derive(Debug, Clone)]
pub struct GraphicsPipelineDescriptor<'a> {
    /// An optional debug label, also woven into diagnostics.
    pub label: Option<Cow<'a, str>>,
    /// The vertex stage source.
    pub vertex_source: ShaderSourceData<'a>,
    /// The fragment stage source.
    pub fragment_source: ShaderSourceData<'a>,
    /// Primitive assembly state.
    pub input_assembly: InputAssemblyDescriptor,
    /// Vertex input layout, if the pipeline reads vertex buffers.
    pub vertex_input: Option<VertexInputDescriptor>,
}

/// A descriptor used to create a compute pipeline through
/// [`GraphicsDevice::create_compute_pipeline`](crate::rhi::device::GraphicsDevice::create_compute_pipeline).
#[derive(Debug, Clone)]
pub struct ComputePipelineDescriptor<'a> {
    /// An optional debug label, also woven into diagnostics.
    pub label: Option<Cow<'a, str>>,
    /// The compute stage source.
    pub compute_source: ShaderSourceData<'a>,
}

/// A value assignable to a named pipeline uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// A single 32-bit float.
    Float(f32),
    /// A single signed integer.
    Int(i32),
    /// A single unsigned integer.
    Uint(u32),
    /// A two-component float vector.
    Vec2(Vec2),
    /// A three-component float vector.
    Vec3(Vec3),
    /// A four-component float vector.
    Vec4(Vec4),
    /// A four-component signed integer vector.
    IVec4(IVec4),
    /// A 4x4 column-major float matrix.
    Mat4(Mat4),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_assembly_defaults_to_plain_triangles() {
        let assembly = InputAssemblyDescriptor::default();
        assert_eq!(assembly.topology, PrimitiveTopology::Triangles);
        assert!(!assembly.primitive_restart);
    }

    #[test]
    fn shader_stages_display_by_name() {
        assert_eq!(ShaderStage::Vertex.to_string(), "Vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "Fragment");
        assert_eq!(ShaderStage::Compute.to_string(), "Compute");
    }
}
