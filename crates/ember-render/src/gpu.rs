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

//! GPU-side records the renderer caches per asset name, and the vertex
//! layouts they are drawn with.

use ember_core::math::Mat4;
use ember_core::rhi::handle::{BufferId, TextureId};

/// Byte stride of the position stream (binding 0 of the geometry pass).
pub const POSITION_STRIDE: u32 = (std::mem::size_of::<f32>() * 3) as u32;

/// Interleaved secondary vertex attributes (binding 1 of the geometry pass).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexAttributes {
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Tangent with the bitangent sign in `w`.
    pub tangent: [f32; 4],
}

impl VertexAttributes {
    /// Byte stride of one interleaved element.
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;
    /// Byte offset of `normal` within an element.
    pub const NORMAL_OFFSET: u32 = 0;
    /// Byte offset of `uv` within an element.
    pub const UV_OFFSET: u32 = 12;
    /// Byte offset of `tangent` within an element.
    pub const TANGENT_OFFSET: u32 = 20;
}

/// A mesh resident on the GPU, cached under its asset name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuMesh {
    /// Vertex buffer holding the position stream.
    pub position_buffer: BufferId,
    /// Vertex buffer holding the interleaved [`VertexAttributes`] stream.
    pub attribute_buffer: BufferId,
    /// Index buffer holding `u32` indices.
    pub index_buffer: BufferId,
    /// Number of vertices in the position stream.
    pub vertex_count: u32,
    /// Number of indices to draw.
    pub index_count: u32,
    /// Transform baked into the source asset, applied before the entity's own.
    pub initial_transform: Mat4,
}

/// Contents of a material's uniform block, laid out to match std140.
///
/// Texture handles of `0` mean the material has no image for that slot and
/// shaders should fall back to the factor values alone.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuMaterialUniforms {
    /// Base color multiplier, linear RGBA.
    pub base_color: [f32; 4],
    /// Metallic, roughness, emissive strength, and occlusion strength factors.
    pub factors: [f32; 4],
    /// Bindless handle of the base color texture.
    pub base_color_handle: u64,
    /// Bindless handle of the normal map.
    pub normal_handle: u64,
    /// Bindless handle of the metallic/roughness texture.
    pub metallic_roughness_handle: u64,
    /// Bindless handle of the emissive texture.
    pub emissive_handle: u64,
}

/// A material resident on the GPU, cached under its asset name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuMaterial {
    /// Uniform block contents as uploaded to `uniform_buffer`.
    pub uniforms: GpuMaterialUniforms,
    /// Uniform buffer holding `uniforms`.
    pub uniform_buffer: BufferId,
    /// Base color texture, stored sRGB.
    pub base_color_texture: Option<TextureId>,
    /// Tangent-space normal map, stored linear.
    pub normal_texture: Option<TextureId>,
    /// Metallic/roughness texture, stored linear.
    pub metallic_roughness_texture: Option<TextureId>,
    /// Emissive texture, stored sRGB.
    pub emissive_texture: Option<TextureId>,
}

impl GpuMaterial {
    /// Returns the material textures in texture-unit order.
    pub fn textures(&self) -> [Option<TextureId>; 4] {
        [
            self.base_color_texture,
            self.normal_texture,
            self.metallic_roughness_texture,
            self.emissive_texture,
        ]
    }
}
