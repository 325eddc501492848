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

//! CPU-side asset data and the provider contract the renderer resolves
//! entity asset names against.

use std::collections::HashMap;

use ember_core::math::{Extent2D, Mat4};

use crate::gpu::VertexAttributes;

/// Decoded image data, tightly packed 8-bit RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuImage {
    /// Pixel dimensions of the image.
    pub extent: Extent2D,
    /// Pixel bytes, `width * height * 4` of them, rows tightly packed.
    pub pixels: Vec<u8>,
}

impl CpuImage {
    /// Creates an image from its dimensions and pixel bytes.
    pub fn new(extent: Extent2D, pixels: Vec<u8>) -> Self {
        Self { extent, pixels }
    }
}

/// A material as loaded from disk, before any GPU resources exist for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuMaterial {
    /// Base color multiplier, linear RGBA.
    pub base_color: [f32; 4],
    /// Metallic, roughness, emissive strength, and occlusion strength factors.
    pub factors: [f32; 4],
    /// Base color image, interpreted as sRGB.
    pub base_color_image: Option<CpuImage>,
    /// Tangent-space normal map, interpreted as linear.
    pub normal_image: Option<CpuImage>,
    /// Metallic/roughness image, interpreted as linear.
    pub metallic_roughness_image: Option<CpuImage>,
    /// Emissive image, interpreted as sRGB.
    pub emissive_image: Option<CpuImage>,
}

impl Default for CpuMaterial {
    /// Returns an untextured white material with full roughness.
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            factors: [0.0, 1.0, 0.0, 1.0],
            base_color_image: None,
            normal_image: None,
            metallic_roughness_image: None,
            emissive_image: None,
        }
    }
}

/// A mesh as loaded from disk, before any GPU resources exist for it.
///
/// Positions are kept separate from the remaining attributes so the two
/// streams can land in separate vertex buffers; `attributes` must therefore
/// have one element per position.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Interleaved normal/uv/tangent data, parallel to `positions`.
    pub attributes: Vec<VertexAttributes>,
    /// Triangle list indices into the vertex streams.
    pub indices: Vec<u32>,
    /// Transform baked into the asset, applied before the entity's own.
    pub initial_transform: Mat4,
}

/// Resolves asset names to CPU-side data.
///
/// The renderer asks a provider for assets lazily, the first frame an entity
/// names them. How the data got into memory is the provider's business.
pub trait AssetProvider {
    /// Returns the mesh registered under `name`, if any.
    fn mesh(&self, name: &str) -> Option<&CpuMesh>;

    /// Returns the material registered under `name`, if any.
    fn material(&self, name: &str) -> Option<&CpuMaterial>;
}

/// An in-memory [`AssetProvider`] keyed by asset name.
#[derive(Debug, Default)]
pub struct AssetLibrary {
    meshes: HashMap<String, CpuMesh>,
    materials: HashMap<String, CpuMaterial>,
}

impl AssetLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mesh` under `name`, replacing any previous entry.
    pub fn insert_mesh(&mut self, name: impl Into<String>, mesh: CpuMesh) {
        self.meshes.insert(name.into(), mesh);
    }

    /// Registers `material` under `name`, replacing any previous entry.
    pub fn insert_material(&mut self, name: impl Into<String>, material: CpuMaterial) {
        self.materials.insert(name.into(), material);
    }
}

impl AssetProvider for AssetLibrary {
    fn mesh(&self, name: &str) -> Option<&CpuMesh> {
        self.meshes.get(name)
    }

    fn material(&self, name: &str) -> Option<&CpuMaterial> {
        self.materials.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    fn triangle() -> CpuMesh {
        CpuMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            attributes: vec![VertexAttributes::zeroed(); 3],
            indices: vec![0, 1, 2],
            initial_transform: Mat4::IDENTITY,
        }
    }

    #[test]
    fn library_resolves_inserted_assets_by_name() {
        let mut library = AssetLibrary::new();
        library.insert_mesh("triangle", triangle());
        library.insert_material("plaster", CpuMaterial::default());

        assert!(library.mesh("triangle").is_some());
        assert!(library.material("plaster").is_some());
        assert!(library.mesh("plaster").is_none());
        assert!(library.material("missing").is_none());
    }

    #[test]
    fn default_material_is_untextured_white() {
        let material = CpuMaterial::default();

        assert_eq!(material.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(material.base_color_image.is_none());
        assert!(material.emissive_image.is_none());
    }
}
