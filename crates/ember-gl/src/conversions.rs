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

//! Translates backend-agnostic enums into OpenGL constants.
//!
//! Formats OpenGL has no sized internal format for come back as `None` and
//! surface as [`ResourceError::Unsupported`](ember_core::ResourceError::Unsupported)
//! at creation. One-dimensional texture types are mapped onto `TEXTURE_2D`
//! with a height of one, so they share the two-dimensional storage and
//! upload paths.

use ember_core::rhi::buffer::BufferUsage;
use ember_core::rhi::format::{Format, UploadFormat, UploadType};
use ember_core::rhi::pipeline::PrimitiveTopology;
use ember_core::rhi::texture::TextureType;

/// A local extension trait converting engine enums into OpenGL constants.
/// Keeping the conversions behind a trait sidesteps the orphan rule while
/// reading as an ordinary `.into_gl()` call at the use sites.
pub(crate) trait IntoGl<T> {
    /// Consumes self and returns the matching OpenGL value.
    fn into_gl(self) -> T;
}

// --- Formats ---

impl IntoGl<Option<u32>> for Format {
    fn into_gl(self) -> Option<u32> {
        let internal = match self {
            Format::R8Unorm => glow::R8,
            Format::R8Snorm => glow::R8_SNORM,
            Format::R16Unorm => glow::R16,
            Format::R16Snorm => glow::R16_SNORM,
            Format::R16Float => glow::R16F,
            Format::R32Float => glow::R32F,
            Format::R8Sint => glow::R8I,
            Format::R8Uint => glow::R8UI,
            Format::R16Sint => glow::R16I,
            Format::R16Uint => glow::R16UI,
            Format::R32Sint => glow::R32I,
            Format::R32Uint => glow::R32UI,

            Format::R8G8Unorm => glow::RG8,
            Format::R8G8Snorm => glow::RG8_SNORM,
            Format::R16G16Unorm => glow::RG16,
            Format::R16G16Snorm => glow::RG16_SNORM,
            Format::R16G16Float => glow::RG16F,
            Format::R32G32Float => glow::RG32F,
            Format::R8G8Sint => glow::RG8I,
            Format::R8G8Uint => glow::RG8UI,
            Format::R16G16Sint => glow::RG16I,
            Format::R16G16Uint => glow::RG16UI,
            Format::R32G32Sint => glow::RG32I,
            Format::R32G32Uint => glow::RG32UI,

            Format::R3G3B2Unorm => glow::R3_G3_B2,
            Format::R4G4B4Unorm => glow::RGB4,
            Format::R5G5B5Unorm => glow::RGB5,
            Format::R10G10B10Unorm => glow::RGB10,
            Format::R12G12B12Unorm => glow::RGB12,

            Format::R8G8B8Unorm => glow::RGB8,
            Format::R8G8B8Snorm => glow::RGB8_SNORM,
            Format::R8G8B8Srgb => glow::SRGB8,
            Format::R16G16B16Unorm => glow::RGB16,
            Format::R16G16B16Snorm => glow::RGB16_SNORM,
            Format::R16G16B16Float => glow::RGB16F,
            Format::R32G32B32Float => glow::RGB32F,
            Format::R11G11B10Float => glow::R11F_G11F_B10F,
            Format::R9G9B9E5Float => glow::RGB9_E5,
            Format::R8G8B8Sint => glow::RGB8I,
            Format::R8G8B8Uint => glow::RGB8UI,
            Format::R16G16B16Sint => glow::RGB16I,
            Format::R16G16B16Uint => glow::RGB16UI,
            Format::R32G32B32Sint => glow::RGB32I,
            Format::R32G32B32Uint => glow::RGB32UI,

            Format::R2G2B2A2Unorm => glow::RGBA2,
            Format::R4G4B4A4Unorm => glow::RGBA4,
            Format::R5G5B5A1Unorm => glow::RGB5_A1,
            Format::R10G10B10A2Unorm => glow::RGB10_A2,
            Format::R10G10B10A2Uint => glow::RGB10_A2UI,
            Format::R12G12B12A12Unorm => glow::RGBA12,

            Format::R8G8B8A8Unorm => glow::RGBA8,
            Format::R8G8B8A8Snorm => glow::RGBA8_SNORM,
            Format::R8G8B8A8Srgb => glow::SRGB8_ALPHA8,
            Format::R16G16B16A16Unorm => glow::RGBA16,
            Format::R16G16B16A16Snorm => glow::RGBA16_SNORM,
            Format::R16G16B16A16Float => glow::RGBA16F,
            Format::R32G32B32A32Float => glow::RGBA32F,
            Format::R8G8B8A8Sint => glow::RGBA8I,
            Format::R8G8B8A8Uint => glow::RGBA8UI,
            Format::R16G16B16A16Sint => glow::RGBA16I,
            Format::R16G16B16A16Uint => glow::RGBA16UI,
            Format::R32G32B32A32Sint => glow::RGBA32I,
            Format::R32G32B32A32Uint => glow::RGBA32UI,

            Format::D16Unorm => glow::DEPTH_COMPONENT16,
            Format::D24Unorm => glow::DEPTH_COMPONENT24,
            Format::D32Unorm => glow::DEPTH_COMPONENT32,
            Format::D32Float => glow::DEPTH_COMPONENT32F,
            Format::D24UnormS8Uint => glow::DEPTH24_STENCIL8,
            Format::D32FloatS8Uint => glow::DEPTH32F_STENCIL8,
            Format::S8Uint => glow::STENCIL_INDEX8,

            // BC1 through BC3 have no core OpenGL internal format; S3TC
            // never left extension status.
            Format::Bc1RgbUnorm
            | Format::Bc1RgbSrgb
            | Format::Bc1RgbaUnorm
            | Format::Bc1RgbaSrgb
            | Format::Bc2Unorm
            | Format::Bc2Srgb
            | Format::Bc3Unorm
            | Format::Bc3Srgb => return None,
            Format::Bc4Unorm => glow::COMPRESSED_RED_RGTC1,
            Format::Bc4Snorm => glow::COMPRESSED_SIGNED_RED_RGTC1,
            Format::Bc5Unorm => glow::COMPRESSED_RG_RGTC2,
            Format::Bc5Snorm => glow::COMPRESSED_SIGNED_RG_RGTC2,
            Format::Bc6hUfloat => glow::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT,
            Format::Bc6hSfloat => glow::COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
            Format::Bc7Unorm => glow::COMPRESSED_RGBA_BPTC_UNORM,
            Format::Bc7Srgb => glow::COMPRESSED_SRGB_ALPHA_BPTC_UNORM,
        };
        Some(internal)
    }
}

// --- Texture Targets ---

impl IntoGl<u32> for TextureType {
    fn into_gl(self) -> u32 {
        match self {
            // A 1D texture becomes a width-by-one texture and a 1D array
            // stacks its layers along height, which keeps both usable from
            // the same sampler code paths as plain 2D textures.
            TextureType::Texture1D | TextureType::Texture1DArray | TextureType::Texture2D => {
                glow::TEXTURE_2D
            }
            TextureType::Texture3D => glow::TEXTURE_3D,
            TextureType::Texture2DArray => glow::TEXTURE_2D_ARRAY,
            TextureType::TextureCube => glow::TEXTURE_CUBE_MAP,
            TextureType::TextureCubeArray => glow::TEXTURE_CUBE_MAP_ARRAY,
            TextureType::Texture2DMultisample => glow::TEXTURE_2D_MULTISAMPLE,
            TextureType::Texture2DMultisampleArray => glow::TEXTURE_2D_MULTISAMPLE_ARRAY,
        }
    }
}

// --- Upload Layout ---

impl IntoGl<u32> for UploadFormat {
    fn into_gl(self) -> u32 {
        match self {
            UploadFormat::R => glow::RED,
            UploadFormat::RInteger => glow::RED_INTEGER,
            UploadFormat::Rg => glow::RG,
            UploadFormat::RgInteger => glow::RG_INTEGER,
            UploadFormat::Rgb => glow::RGB,
            UploadFormat::RgbInteger => glow::RGB_INTEGER,
            UploadFormat::Rgba => glow::RGBA,
            UploadFormat::RgbaInteger => glow::RGBA_INTEGER,
            UploadFormat::Depth => glow::DEPTH_COMPONENT,
            UploadFormat::DepthStencil => glow::DEPTH_STENCIL,
            UploadFormat::Stencil => glow::STENCIL_INDEX,
        }
    }
}

impl IntoGl<u32> for UploadType {
    fn into_gl(self) -> u32 {
        match self {
            UploadType::UnsignedByte => glow::UNSIGNED_BYTE,
            UploadType::Byte => glow::BYTE,
            UploadType::UnsignedShort => glow::UNSIGNED_SHORT,
            UploadType::Short => glow::SHORT,
            UploadType::HalfFloat => glow::HALF_FLOAT,
            UploadType::Float => glow::FLOAT,
            UploadType::UnsignedInt => glow::UNSIGNED_INT,
            UploadType::Int => glow::INT,
        }
    }
}

// --- Pipeline State ---

impl IntoGl<u32> for PrimitiveTopology {
    fn into_gl(self) -> u32 {
        match self {
            PrimitiveTopology::Triangles => glow::TRIANGLES,
            PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
            PrimitiveTopology::TriangleFan => glow::TRIANGLE_FAN,
            PrimitiveTopology::Lines => glow::LINES,
        }
    }
}

// --- Buffer Hints ---

impl IntoGl<u32> for BufferUsage {
    fn into_gl(self) -> u32 {
        if self.contains(BufferUsage::DYNAMIC_UPDATE) {
            glow::DYNAMIC_DRAW
        } else {
            glow::STATIC_DRAW
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_uncompressed_format_has_an_internal_format() {
        for format in Format::ALL {
            if !format.is_compressed() {
                let internal: Option<u32> = format.into_gl();
                assert!(internal.is_some(), "{format:?}");
            }
        }
    }

    #[test]
    fn only_the_s3tc_family_is_unsupported() {
        let unsupported: Vec<Format> = Format::ALL
            .iter()
            .copied()
            .filter(|format| IntoGl::<Option<u32>>::into_gl(*format).is_none())
            .collect();
        assert_eq!(
            unsupported,
            vec![
                Format::Bc1RgbUnorm,
                Format::Bc1RgbSrgb,
                Format::Bc1RgbaUnorm,
                Format::Bc1RgbaSrgb,
                Format::Bc2Unorm,
                Format::Bc2Srgb,
                Format::Bc3Unorm,
                Format::Bc3Srgb,
            ]
        );
    }

    #[test]
    fn internal_format_spot_checks() {
        assert_eq!(Format::R8G8B8A8Srgb.into_gl(), Some(glow::SRGB8_ALPHA8));
        assert_eq!(Format::R11G11B10Float.into_gl(), Some(glow::R11F_G11F_B10F));
        assert_eq!(Format::R9G9B9E5Float.into_gl(), Some(glow::RGB9_E5));
        assert_eq!(Format::R4G4B4Unorm.into_gl(), Some(glow::RGB4));
        assert_eq!(Format::R5G5B5A1Unorm.into_gl(), Some(glow::RGB5_A1));
        assert_eq!(Format::R10G10B10A2Uint.into_gl(), Some(glow::RGB10_A2UI));
        assert_eq!(Format::D24UnormS8Uint.into_gl(), Some(glow::DEPTH24_STENCIL8));
        assert_eq!(Format::S8Uint.into_gl(), Some(glow::STENCIL_INDEX8));
        assert_eq!(Format::Bc7Srgb.into_gl(), Some(glow::COMPRESSED_SRGB_ALPHA_BPTC_UNORM));
    }

    #[test]
    fn one_dimensional_types_share_the_two_dimensional_targets() {
        assert_eq!(TextureType::Texture1D.into_gl(), glow::TEXTURE_2D);
        assert_eq!(TextureType::Texture1DArray.into_gl(), glow::TEXTURE_2D);
        assert_eq!(
            TextureType::Texture2DMultisample.into_gl(),
            glow::TEXTURE_2D_MULTISAMPLE
        );
        assert_eq!(TextureType::TextureCubeArray.into_gl(), glow::TEXTURE_CUBE_MAP_ARRAY);
    }

    #[test]
    fn upload_enums_map_onto_gl_pairs() {
        assert_eq!(UploadFormat::RgbaInteger.into_gl(), glow::RGBA_INTEGER);
        assert_eq!(UploadFormat::DepthStencil.into_gl(), glow::DEPTH_STENCIL);
        assert_eq!(UploadType::HalfFloat.into_gl(), glow::HALF_FLOAT);
        assert_eq!(UploadType::UnsignedInt.into_gl(), glow::UNSIGNED_INT);
    }

    #[test]
    fn buffer_hints_follow_the_update_flag() {
        assert_eq!(
            (BufferUsage::VERTEX | BufferUsage::DYNAMIC_UPDATE).into_gl(),
            glow::DYNAMIC_DRAW
        );
        assert_eq!(BufferUsage::INDEX.into_gl(), glow::STATIC_DRAW);
    }
}
