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

//! Defines data structures related to GPU texture resources.

use std::borrow::Cow;

use crate::math::dimension::{Extent3D, Origin3D};
use crate::rhi::format::{Format, UploadFormat, UploadType};
use crate::rhi::handle::TextureId;

/// The shape of a texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    /// One-dimensional texture.
    Texture1D,
    /// Two-dimensional texture.
    Texture2D,
    /// Three-dimensional (volume) texture.
    Texture3D,
    /// Array of one-dimensional textures.
    Texture1DArray,
    /// Array of two-dimensional textures.
    Texture2DArray,
    /// Six-faced cube map.
    TextureCube,
    /// Array of cube maps.
    TextureCubeArray,
    /// Multisampled two-dimensional texture.
    Texture2DMultisample,
    /// Array of multisampled two-dimensional textures.
    Texture2DMultisampleArray,
}

impl TextureType {
    /// Number of coordinate dimensions an upload into this texture uses.
    ///
    /// Array layers and cube faces count as a dimension, so a 2D array
    /// uploads through the three-dimensional path.
    pub const fn dimension_count(&self) -> u32 {
        match self {
            TextureType::Texture1D => 1,
            TextureType::Texture2D
            | TextureType::Texture2DMultisample
            | TextureType::Texture1DArray => 2,
            TextureType::Texture3D
            | TextureType::Texture2DArray
            | TextureType::Texture2DMultisampleArray
            | TextureType::TextureCube
            | TextureType::TextureCubeArray => 3,
        }
    }
}

/// Multisample count for render target textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleCount {
    /// No multisampling.
    #[default]
    X1,
    /// 2x multisampling.
    X2,
    /// 4x multisampling.
    X4,
    /// 8x multisampling.
    X8,
    /// 16x multisampling.
    X16,
    /// 32x multisampling.
    X32,
}

impl SampleCount {
    /// The sample count as a plain integer.
    pub const fn as_u32(&self) -> u32 {
        match self {
            SampleCount::X1 => 1,
            SampleCount::X2 => 2,
            SampleCount::X4 => 4,
            SampleCount::X8 => 8,
            SampleCount::X16 => 16,
            SampleCount::X32 => 32,
        }
    }
}

/// A descriptor used to create a texture through
/// [`GraphicsDevice::create_texture`](crate::rhi::device::GraphicsDevice::create_texture).
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label for the texture.
    pub label: Option<Cow<'a, str>>,
    /// The shape of the texture.
    pub texture_type: TextureType,
    /// The storage format of the texture.
    pub format: Format,
    /// Width, height, and depth or layer count. For array types the layer
    /// count rides in `depth_or_array_layers`.
    pub extent: Extent3D,
    /// Number of mip levels to allocate.
    pub mip_level_count: u32,
    /// Samples per pixel, only meaningful for multisampled types.
    pub sample_count: SampleCount,
}

impl Default for TextureDescriptor<'_> {
    fn default() -> Self {
        Self {
            label: None,
            texture_type: TextureType::Texture2D,
            format: Format::R8G8B8A8Unorm,
            extent: Extent3D::new(1, 1, 1),
            mip_level_count: 1,
            sample_count: SampleCount::X1,
        }
    }
}

/// A descriptor for uploading texel data into an existing texture.
///
/// `upload_format` and `upload_type` default to `None`, in which case they
/// are derived from the texture's storage format.
#[derive(Debug, Clone)]
pub struct TextureUploadDescriptor<'a> {
    /// The mip level receiving the data.
    pub mip_level: u32,
    /// Texel offset of the destination region.
    pub offset: Origin3D,
    /// Size of the destination region.
    pub extent: Extent3D,
    /// Client pixel layout override.
    pub upload_format: Option<UploadFormat>,
    /// Client component type override.
    pub upload_type: Option<UploadType>,
    /// The raw texel bytes.
    pub pixels: &'a [u8],
}

impl Default for TextureUploadDescriptor<'_> {
    fn default() -> Self {
        Self {
            mip_level: 0,
            offset: Origin3D::default(),
            extent: Extent3D::default(),
            upload_format: None,
            upload_type: None,
            pixels: &[],
        }
    }
}

/// Bookkeeping record for a live texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// The handle this record is stored under.
    pub id: TextureId,
    /// The shape of the texture.
    pub texture_type: TextureType,
    /// The storage format of the texture.
    pub format: Format,
    /// Width, height, and depth or layer count.
    pub extent: Extent3D,
    /// Number of allocated mip levels.
    pub mip_level_count: u32,
    /// Samples per pixel.
    pub sample_count: SampleCount,
    /// The shader-visible handle while the texture is resident, if any.
    pub resident_handle: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_dimensions_by_texture_type() {
        assert_eq!(TextureType::Texture1D.dimension_count(), 1);
        assert_eq!(TextureType::Texture2D.dimension_count(), 2);
        assert_eq!(TextureType::Texture1DArray.dimension_count(), 2);
        assert_eq!(TextureType::Texture2DMultisample.dimension_count(), 2);
        assert_eq!(TextureType::Texture3D.dimension_count(), 3);
        assert_eq!(TextureType::Texture2DArray.dimension_count(), 3);
        assert_eq!(TextureType::Texture2DMultisampleArray.dimension_count(), 3);
        assert_eq!(TextureType::TextureCube.dimension_count(), 3);
        assert_eq!(TextureType::TextureCubeArray.dimension_count(), 3);
    }

    #[test]
    fn sample_counts_convert_to_integers() {
        assert_eq!(SampleCount::default(), SampleCount::X1);
        assert_eq!(SampleCount::X1.as_u32(), 1);
        assert_eq!(SampleCount::X8.as_u32(), 8);
        assert_eq!(SampleCount::X32.as_u32(), 32);
    }
}
