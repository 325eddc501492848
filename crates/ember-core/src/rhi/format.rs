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

//! Defines the pixel and vertex format vocabulary and its translation tables.
//!
//! Every classification here is a total function over [`Format`]: callers can
//! rely on never panicking, and formats a given backend cannot express are
//! reported through `Option` rather than asserts.

/// A sized pixel or vertex element format.
///
/// The names spell out channel widths in bit order, followed by the numeric
/// interpretation. Compressed block formats carry the `Bc` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    // --- Single channel ---
    /// 8-bit red, unsigned normalized.
    R8Unorm,
    /// 8-bit red, signed normalized.
    R8Snorm,
    /// 16-bit red, unsigned normalized.
    R16Unorm,
    /// 16-bit red, signed normalized.
    R16Snorm,
    /// 16-bit red, floating point.
    R16Float,
    /// 32-bit red, floating point.
    R32Float,
    /// 8-bit red, signed integer.
    R8Sint,
    /// 8-bit red, unsigned integer.
    R8Uint,
    /// 16-bit red, signed integer.
    R16Sint,
    /// 16-bit red, unsigned integer.
    R16Uint,
    /// 32-bit red, signed integer.
    R32Sint,
    /// 32-bit red, unsigned integer.
    R32Uint,

    // --- Two channels ---
    /// 8-bit red and green, unsigned normalized.
    R8G8Unorm,
    /// 8-bit red and green, signed normalized.
    R8G8Snorm,
    /// 16-bit red and green, unsigned normalized.
    R16G16Unorm,
    /// 16-bit red and green, signed normalized.
    R16G16Snorm,
    /// 16-bit red and green, floating point.
    R16G16Float,
    /// 32-bit red and green, floating point.
    R32G32Float,
    /// 8-bit red and green, signed integer.
    R8G8Sint,
    /// 8-bit red and green, unsigned integer.
    R8G8Uint,
    /// 16-bit red and green, signed integer.
    R16G16Sint,
    /// 16-bit red and green, unsigned integer.
    R16G16Uint,
    /// 32-bit red and green, signed integer.
    R32G32Sint,
    /// 32-bit red and green, unsigned integer.
    R32G32Uint,

    // --- Packed three channels ---
    /// 3-3-2 bit RGB, unsigned normalized.
    R3G3B2Unorm,
    /// 4-4-4 bit RGB, unsigned normalized.
    R4G4B4Unorm,
    /// 5-5-5 bit RGB, unsigned normalized.
    R5G5B5Unorm,
    /// 10-10-10 bit RGB, unsigned normalized.
    R10G10B10Unorm,
    /// 12-12-12 bit RGB, unsigned normalized.
    R12G12B12Unorm,

    // --- Three channels ---
    /// 8-bit RGB, unsigned normalized.
    R8G8B8Unorm,
    /// 8-bit RGB, signed normalized.
    R8G8B8Snorm,
    /// 8-bit RGB, unsigned normalized with sRGB transfer.
    R8G8B8Srgb,
    /// 16-bit RGB, unsigned normalized.
    R16G16B16Unorm,
    /// 16-bit RGB, signed normalized.
    R16G16B16Snorm,
    /// 16-bit RGB, floating point.
    R16G16B16Float,
    /// 32-bit RGB, floating point.
    R32G32B32Float,
    /// Packed 11-11-10 bit RGB, small floats.
    R11G11B10Float,
    /// Packed 9-9-9 bit RGB mantissas with a shared 5-bit exponent.
    R9G9B9E5Float,
    /// 8-bit RGB, signed integer.
    R8G8B8Sint,
    /// 8-bit RGB, unsigned integer.
    R8G8B8Uint,
    /// 16-bit RGB, signed integer.
    R16G16B16Sint,
    /// 16-bit RGB, unsigned integer.
    R16G16B16Uint,
    /// 32-bit RGB, signed integer.
    R32G32B32Sint,
    /// 32-bit RGB, unsigned integer.
    R32G32B32Uint,

    // --- Packed four channels ---
    /// 2-2-2-2 bit RGBA, unsigned normalized.
    R2G2B2A2Unorm,
    /// 4-4-4-4 bit RGBA, unsigned normalized.
    R4G4B4A4Unorm,
    /// 5-5-5-1 bit RGBA, unsigned normalized.
    R5G5B5A1Unorm,
    /// 10-10-10-2 bit RGBA, unsigned normalized.
    R10G10B10A2Unorm,
    /// 10-10-10-2 bit RGBA, unsigned integer.
    R10G10B10A2Uint,
    /// 12-12-12-12 bit RGBA, unsigned normalized.
    R12G12B12A12Unorm,

    // --- Four channels ---
    /// 8-bit RGBA, unsigned normalized.
    R8G8B8A8Unorm,
    /// 8-bit RGBA, signed normalized.
    R8G8B8A8Snorm,
    /// 8-bit RGBA, unsigned normalized with sRGB transfer on the color channels.
    R8G8B8A8Srgb,
    /// 16-bit RGBA, unsigned normalized.
    R16G16B16A16Unorm,
    /// 16-bit RGBA, signed normalized.
    R16G16B16A16Snorm,
    /// 16-bit RGBA, floating point.
    R16G16B16A16Float,
    /// 32-bit RGBA, floating point.
    R32G32B32A32Float,
    /// 8-bit RGBA, signed integer.
    R8G8B8A8Sint,
    /// 8-bit RGBA, unsigned integer.
    R8G8B8A8Uint,
    /// 16-bit RGBA, signed integer.
    R16G16B16A16Sint,
    /// 16-bit RGBA, unsigned integer.
    R16G16B16A16Uint,
    /// 32-bit RGBA, signed integer.
    R32G32B32A32Sint,
    /// 32-bit RGBA, unsigned integer.
    R32G32B32A32Uint,

    // --- Depth and stencil ---
    /// 16-bit depth, unsigned normalized.
    D16Unorm,
    /// 24-bit depth, unsigned normalized.
    D24Unorm,
    /// 32-bit depth, unsigned normalized.
    D32Unorm,
    /// 32-bit depth, floating point.
    D32Float,
    /// 24-bit unsigned normalized depth with 8-bit unsigned integer stencil.
    D24UnormS8Uint,
    /// 32-bit floating point depth with 8-bit unsigned integer stencil.
    D32FloatS8Uint,
    /// 8-bit stencil, unsigned integer.
    S8Uint,

    // --- Block compressed ---
    /// BC1 (DXT1) RGB, unsigned normalized.
    Bc1RgbUnorm,
    /// BC1 (DXT1) RGB, sRGB transfer.
    Bc1RgbSrgb,
    /// BC1 (DXT1) RGBA with 1-bit alpha, unsigned normalized.
    Bc1RgbaUnorm,
    /// BC1 (DXT1) RGBA with 1-bit alpha, sRGB transfer.
    Bc1RgbaSrgb,
    /// BC2 (DXT3) RGBA, unsigned normalized.
    Bc2Unorm,
    /// BC2 (DXT3) RGBA, sRGB transfer.
    Bc2Srgb,
    /// BC3 (DXT5) RGBA, unsigned normalized.
    Bc3Unorm,
    /// BC3 (DXT5) RGBA, sRGB transfer.
    Bc3Srgb,
    /// BC4 single channel, unsigned normalized.
    Bc4Unorm,
    /// BC4 single channel, signed normalized.
    Bc4Snorm,
    /// BC5 two channels, unsigned normalized.
    Bc5Unorm,
    /// BC5 two channels, signed normalized.
    Bc5Snorm,
    /// BC6H RGB, unsigned half floats.
    Bc6hUfloat,
    /// BC6H RGB, signed half floats.
    Bc6hSfloat,
    /// BC7 RGBA, unsigned normalized.
    Bc7Unorm,
    /// BC7 RGBA, sRGB transfer.
    Bc7Srgb,
}

/// The numeric class a color attachment resolves to when clearing.
///
/// Clearing an integer attachment with a float clear path (or the other way
/// round) is undefined in every backend, so render passes dispatch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseTypeClass {
    /// Normalized, sRGB, and floating point formats.
    Float,
    /// Signed integer formats.
    Integer,
    /// Unsigned integer formats.
    UnsignedInteger,
}

/// The vertex attribute pointer family a format is fed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeClass {
    /// 32-bit float attribute path, with optional normalization.
    Float,
    /// Integer attribute path, values arrive unconverted in the shader.
    Integer,
    /// 64-bit attribute path.
    Long,
}

/// The client pixel layout used when uploading texel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadFormat {
    /// Single red channel.
    R,
    /// Single red channel, integer variant.
    RInteger,
    /// Red and green channels.
    Rg,
    /// Red and green channels, integer variant.
    RgInteger,
    /// Red, green, and blue channels.
    Rgb,
    /// Red, green, and blue channels, integer variant.
    RgbInteger,
    /// Red, green, blue, and alpha channels.
    Rgba,
    /// Red, green, blue, and alpha channels, integer variant.
    RgbaInteger,
    /// Depth component only.
    Depth,
    /// Interleaved depth and stencil.
    DepthStencil,
    /// Stencil index only.
    Stencil,
}

/// The client component type used when uploading texel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadType {
    /// One unsigned byte per component.
    UnsignedByte,
    /// One signed byte per component.
    Byte,
    /// One unsigned 16-bit word per component.
    UnsignedShort,
    /// One signed 16-bit word per component.
    Short,
    /// One half float per component.
    HalfFloat,
    /// One 32-bit float per component.
    Float,
    /// One unsigned 32-bit word per component.
    UnsignedInt,
    /// One signed 32-bit word per component.
    Int,
}

impl Format {
    /// Every format, in declaration order. Handy for table-driven tests.
    pub const ALL: &'static [Format] = &[
        Format::R8Unorm,
        Format::R8Snorm,
        Format::R16Unorm,
        Format::R16Snorm,
        Format::R16Float,
        Format::R32Float,
        Format::R8Sint,
        Format::R8Uint,
        Format::R16Sint,
        Format::R16Uint,
        Format::R32Sint,
        Format::R32Uint,
        Format::R8G8Unorm,
        Format::R8G8Snorm,
        Format::R16G16Unorm,
        Format::R16G16Snorm,
        Format::R16G16Float,
        Format::R32G32Float,
        Format::R8G8Sint,
        Format::R8G8Uint,
        Format::R16G16Sint,
        Format::R16G16Uint,
        Format::R32G32Sint,
        Format::R32G32Uint,
        Format::R3G3B2Unorm,
        Format::R4G4B4Unorm,
        Format::R5G5B5Unorm,
        Format::R10G10B10Unorm,
        Format::R12G12B12Unorm,
        Format::R8G8B8Unorm,
        Format::R8G8B8Snorm,
        Format::R8G8B8Srgb,
        Format::R16G16B16Unorm,
        Format::R16G16B16Snorm,
        Format::R16G16B16Float,
        Format::R32G32B32Float,
        Format::R11G11B10Float,
        Format::R9G9B9E5Float,
        Format::R8G8B8Sint,
        Format::R8G8B8Uint,
        Format::R16G16B16Sint,
        Format::R16G16B16Uint,
        Format::R32G32B32Sint,
        Format::R32G32B32Uint,
        Format::R2G2B2A2Unorm,
        Format::R4G4B4A4Unorm,
        Format::R5G5B5A1Unorm,
        Format::R10G10B10A2Unorm,
        Format::R10G10B10A2Uint,
        Format::R12G12B12A12Unorm,
        Format::R8G8B8A8Unorm,
        Format::R8G8B8A8Snorm,
        Format::R8G8B8A8Srgb,
        Format::R16G16B16A16Unorm,
        Format::R16G16B16A16Snorm,
        Format::R16G16B16A16Float,
        Format::R32G32B32A32Float,
        Format::R8G8B8A8Sint,
        Format::R8G8B8A8Uint,
        Format::R16G16B16A16Sint,
        Format::R16G16B16A16Uint,
        Format::R32G32B32A32Sint,
        Format::R32G32B32A32Uint,
        Format::D16Unorm,
        Format::D24Unorm,
        Format::D32Unorm,
        Format::D32Float,
        Format::D24UnormS8Uint,
        Format::D32FloatS8Uint,
        Format::S8Uint,
        Format::Bc1RgbUnorm,
        Format::Bc1RgbSrgb,
        Format::Bc1RgbaUnorm,
        Format::Bc1RgbaSrgb,
        Format::Bc2Unorm,
        Format::Bc2Srgb,
        Format::Bc3Unorm,
        Format::Bc3Srgb,
        Format::Bc4Unorm,
        Format::Bc4Snorm,
        Format::Bc5Unorm,
        Format::Bc5Snorm,
        Format::Bc6hUfloat,
        Format::Bc6hSfloat,
        Format::Bc7Unorm,
        Format::Bc7Srgb,
    ];

    /// Returns `true` for block compressed formats.
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self,
            Format::Bc1RgbUnorm
                | Format::Bc1RgbSrgb
                | Format::Bc1RgbaUnorm
                | Format::Bc1RgbaSrgb
                | Format::Bc2Unorm
                | Format::Bc2Srgb
                | Format::Bc3Unorm
                | Format::Bc3Srgb
                | Format::Bc4Unorm
                | Format::Bc4Snorm
                | Format::Bc5Unorm
                | Format::Bc5Snorm
                | Format::Bc6hUfloat
                | Format::Bc6hSfloat
                | Format::Bc7Unorm
                | Format::Bc7Srgb
        )
    }

    /// Returns `true` if the format carries a depth component.
    pub const fn is_depth(&self) -> bool {
        matches!(
            self,
            Format::D16Unorm
                | Format::D24Unorm
                | Format::D32Unorm
                | Format::D32Float
                | Format::D24UnormS8Uint
                | Format::D32FloatS8Uint
        )
    }

    /// Returns `true` if the format carries a stencil component.
    pub const fn has_stencil(&self) -> bool {
        matches!(
            self,
            Format::D24UnormS8Uint | Format::D32FloatS8Uint | Format::S8Uint
        )
    }

    /// Classifies the format for clear dispatch.
    ///
    /// Signed integer formats clear through the integer path, unsigned
    /// integer formats through the unsigned path, and everything else
    /// (normalized, sRGB, float, depth, compressed) through the float path.
    pub const fn base_type_class(&self) -> BaseTypeClass {
        match self {
            Format::R8Sint
            | Format::R16Sint
            | Format::R32Sint
            | Format::R8G8Sint
            | Format::R16G16Sint
            | Format::R32G32Sint
            | Format::R8G8B8Sint
            | Format::R16G16B16Sint
            | Format::R32G32B32Sint
            | Format::R8G8B8A8Sint
            | Format::R16G16B16A16Sint
            | Format::R32G32B32A32Sint => BaseTypeClass::Integer,
            Format::R8Uint
            | Format::R16Uint
            | Format::R32Uint
            | Format::R8G8Uint
            | Format::R16G16Uint
            | Format::R32G32Uint
            | Format::R8G8B8Uint
            | Format::R16G16B16Uint
            | Format::R32G32B32Uint
            | Format::R10G10B10A2Uint
            | Format::R8G8B8A8Uint
            | Format::R16G16B16A16Uint
            | Format::R32G32B32A32Uint
            | Format::S8Uint => BaseTypeClass::UnsignedInteger,
            _ => BaseTypeClass::Float,
        }
    }

    /// The client pixel layout a plain upload of this format uses.
    ///
    /// Returns `None` for block compressed formats, which cannot go through
    /// the uncompressed upload path.
    pub const fn upload_format(&self) -> Option<UploadFormat> {
        match self {
            Format::R8Unorm
            | Format::R8Snorm
            | Format::R16Unorm
            | Format::R16Snorm
            | Format::R16Float
            | Format::R32Float => Some(UploadFormat::R),
            Format::R8Sint
            | Format::R8Uint
            | Format::R16Sint
            | Format::R16Uint
            | Format::R32Sint
            | Format::R32Uint => Some(UploadFormat::RInteger),
            Format::R8G8Unorm
            | Format::R8G8Snorm
            | Format::R16G16Unorm
            | Format::R16G16Snorm
            | Format::R16G16Float
            | Format::R32G32Float => Some(UploadFormat::Rg),
            Format::R8G8Sint
            | Format::R8G8Uint
            | Format::R16G16Sint
            | Format::R16G16Uint
            | Format::R32G32Sint
            | Format::R32G32Uint => Some(UploadFormat::RgInteger),
            Format::R3G3B2Unorm
            | Format::R4G4B4Unorm
            | Format::R5G5B5Unorm
            | Format::R10G10B10Unorm
            | Format::R12G12B12Unorm
            | Format::R8G8B8Unorm
            | Format::R8G8B8Snorm
            | Format::R8G8B8Srgb
            | Format::R16G16B16Unorm
            | Format::R16G16B16Snorm
            | Format::R16G16B16Float
            | Format::R32G32B32Float
            | Format::R11G11B10Float
            | Format::R9G9B9E5Float => Some(UploadFormat::Rgb),
            Format::R8G8B8Sint
            | Format::R8G8B8Uint
            | Format::R16G16B16Sint
            | Format::R16G16B16Uint
            | Format::R32G32B32Sint
            | Format::R32G32B32Uint => Some(UploadFormat::RgbInteger),
            Format::R2G2B2A2Unorm
            | Format::R4G4B4A4Unorm
            | Format::R5G5B5A1Unorm
            | Format::R10G10B10A2Unorm
            | Format::R12G12B12A12Unorm
            | Format::R8G8B8A8Unorm
            | Format::R8G8B8A8Snorm
            | Format::R8G8B8A8Srgb
            | Format::R16G16B16A16Unorm
            | Format::R16G16B16A16Snorm
            | Format::R16G16B16A16Float
            | Format::R32G32B32A32Float => Some(UploadFormat::Rgba),
            Format::R10G10B10A2Uint
            | Format::R8G8B8A8Sint
            | Format::R8G8B8A8Uint
            | Format::R16G16B16A16Sint
            | Format::R16G16B16A16Uint
            | Format::R32G32B32A32Sint
            | Format::R32G32B32A32Uint => Some(UploadFormat::RgbaInteger),
            Format::D16Unorm | Format::D24Unorm | Format::D32Unorm | Format::D32Float => {
                Some(UploadFormat::Depth)
            }
            Format::D24UnormS8Uint | Format::D32FloatS8Uint => Some(UploadFormat::DepthStencil),
            Format::S8Uint => Some(UploadFormat::Stencil),
            _ => None,
        }
    }

    /// The client component type a plain upload of this format uses.
    ///
    /// Returns `None` where no single component type applies: packed,
    /// shared exponent, depth, stencil, and compressed formats. Uploads to
    /// those must state their type explicitly.
    pub const fn upload_type(&self) -> Option<UploadType> {
        match self {
            Format::R8Unorm
            | Format::R8G8Unorm
            | Format::R8G8B8Unorm
            | Format::R8G8B8A8Unorm
            | Format::R8Uint
            | Format::R8G8Uint
            | Format::R8G8B8Uint
            | Format::R8G8B8A8Uint
            | Format::R8G8B8Srgb
            | Format::R8G8B8A8Srgb => Some(UploadType::UnsignedByte),
            Format::R8Snorm
            | Format::R8G8Snorm
            | Format::R8G8B8Snorm
            | Format::R8G8B8A8Snorm
            | Format::R8Sint
            | Format::R8G8Sint
            | Format::R8G8B8Sint
            | Format::R8G8B8A8Sint => Some(UploadType::Byte),
            Format::R16Unorm
            | Format::R16G16Unorm
            | Format::R16G16B16Unorm
            | Format::R16G16B16A16Unorm
            | Format::R16Uint
            | Format::R16G16Uint
            | Format::R16G16B16Uint
            | Format::R16G16B16A16Uint => Some(UploadType::UnsignedShort),
            Format::R16Snorm
            | Format::R16G16Snorm
            | Format::R16G16B16Snorm
            | Format::R16G16B16A16Snorm
            | Format::R16Sint
            | Format::R16G16Sint
            | Format::R16G16B16Sint
            | Format::R16G16B16A16Sint => Some(UploadType::Short),
            Format::R16Float
            | Format::R16G16Float
            | Format::R16G16B16Float
            | Format::R16G16B16A16Float => Some(UploadType::HalfFloat),
            Format::R32Float
            | Format::R32G32Float
            | Format::R32G32B32Float
            | Format::R32G32B32A32Float => Some(UploadType::Float),
            Format::R32Sint | Format::R32G32Sint | Format::R32G32B32Sint
            | Format::R32G32B32A32Sint => Some(UploadType::Int),
            Format::R32Uint | Format::R32G32Uint | Format::R32G32B32Uint
            | Format::R32G32B32A32Uint => Some(UploadType::UnsignedInt),
            _ => None,
        }
    }

    /// Number of color components, or depth/stencil planes, in the format.
    pub const fn component_count(&self) -> u32 {
        match self {
            Format::R8Unorm
            | Format::R8Snorm
            | Format::R16Unorm
            | Format::R16Snorm
            | Format::R16Float
            | Format::R32Float
            | Format::R8Sint
            | Format::R8Uint
            | Format::R16Sint
            | Format::R16Uint
            | Format::R32Sint
            | Format::R32Uint
            | Format::D16Unorm
            | Format::D24Unorm
            | Format::D32Unorm
            | Format::D32Float
            | Format::S8Uint
            | Format::Bc4Unorm
            | Format::Bc4Snorm => 1,
            Format::R8G8Unorm
            | Format::R8G8Snorm
            | Format::R16G16Unorm
            | Format::R16G16Snorm
            | Format::R16G16Float
            | Format::R32G32Float
            | Format::R8G8Sint
            | Format::R8G8Uint
            | Format::R16G16Sint
            | Format::R16G16Uint
            | Format::R32G32Sint
            | Format::R32G32Uint
            | Format::D24UnormS8Uint
            | Format::D32FloatS8Uint
            | Format::Bc5Unorm
            | Format::Bc5Snorm => 2,
            Format::R3G3B2Unorm
            | Format::R4G4B4Unorm
            | Format::R5G5B5Unorm
            | Format::R10G10B10Unorm
            | Format::R12G12B12Unorm
            | Format::R8G8B8Unorm
            | Format::R8G8B8Snorm
            | Format::R8G8B8Srgb
            | Format::R16G16B16Unorm
            | Format::R16G16B16Snorm
            | Format::R16G16B16Float
            | Format::R32G32B32Float
            | Format::R11G11B10Float
            | Format::R9G9B9E5Float
            | Format::R8G8B8Sint
            | Format::R8G8B8Uint
            | Format::R16G16B16Sint
            | Format::R16G16B16Uint
            | Format::R32G32B32Sint
            | Format::R32G32B32Uint
            | Format::Bc1RgbUnorm
            | Format::Bc1RgbSrgb
            | Format::Bc6hUfloat
            | Format::Bc6hSfloat => 3,
            _ => 4,
        }
    }

    /// Returns `true` if sampled or fetched values are normalized to the
    /// `[0, 1]` (or `[-1, 1]`) range.
    pub const fn is_normalized(&self) -> bool {
        match self.base_type_class() {
            BaseTypeClass::Float => !matches!(
                self,
                Format::R16Float
                    | Format::R32Float
                    | Format::R16G16Float
                    | Format::R32G32Float
                    | Format::R16G16B16Float
                    | Format::R32G32B32Float
                    | Format::R11G11B10Float
                    | Format::R9G9B9E5Float
                    | Format::R16G16B16A16Float
                    | Format::R32G32B32A32Float
                    | Format::D32Float
                    | Format::Bc6hUfloat
                    | Format::Bc6hSfloat
            ),
            BaseTypeClass::Integer | BaseTypeClass::UnsignedInteger => false,
        }
    }

    /// The vertex attribute pointer family this format is fed through.
    ///
    /// Unsized and exotic formats fall through to the 64-bit class, which
    /// backends that lack a 64-bit attribute path reject at pipeline
    /// creation.
    pub const fn attribute_class(&self) -> AttributeClass {
        match self {
            Format::R8Unorm
            | Format::R8Snorm
            | Format::R16Unorm
            | Format::R16Snorm
            | Format::R8G8Unorm
            | Format::R8G8Snorm
            | Format::R16G16Unorm
            | Format::R16G16Snorm
            | Format::R8G8B8Unorm
            | Format::R8G8B8Snorm
            | Format::R16G16B16Unorm
            | Format::R16G16B16Snorm
            | Format::R8G8B8A8Unorm
            | Format::R8G8B8A8Snorm
            | Format::R16G16B16A16Unorm
            | Format::R16G16B16A16Snorm
            | Format::R16Float
            | Format::R16G16Float
            | Format::R16G16B16Float
            | Format::R16G16B16A16Float
            | Format::R32Float
            | Format::R32G32Float
            | Format::R32G32B32Float
            | Format::R32G32B32A32Float => AttributeClass::Float,
            Format::R8Sint
            | Format::R8Uint
            | Format::R16Sint
            | Format::R16Uint
            | Format::R32Sint
            | Format::R32Uint
            | Format::R8G8Sint
            | Format::R8G8Uint
            | Format::R16G16Sint
            | Format::R16G16Uint
            | Format::R32G32Sint
            | Format::R32G32Uint
            | Format::R8G8B8Sint
            | Format::R8G8B8Uint
            | Format::R16G16B16Sint
            | Format::R16G16B16Uint
            | Format::R32G32B32Sint
            | Format::R32G32B32Uint
            | Format::R8G8B8A8Sint
            | Format::R8G8B8A8Uint
            | Format::R16G16B16A16Sint
            | Format::R16G16B16A16Uint
            | Format::R32G32B32A32Sint
            | Format::R32G32B32A32Uint => AttributeClass::Integer,
            _ => AttributeClass::Long,
        }
    }

    /// Size in bytes of one pixel, where the format has a byte-aligned pixel.
    ///
    /// Returns `None` for block compressed formats and for packed layouts
    /// whose pixel does not land on a byte boundary.
    pub const fn bytes_per_pixel(&self) -> Option<u32> {
        match self {
            Format::R8Unorm
            | Format::R8Snorm
            | Format::R8Sint
            | Format::R8Uint
            | Format::R3G3B2Unorm
            | Format::S8Uint => Some(1),
            Format::R16Unorm
            | Format::R16Snorm
            | Format::R16Float
            | Format::R16Sint
            | Format::R16Uint
            | Format::R8G8Unorm
            | Format::R8G8Snorm
            | Format::R8G8Sint
            | Format::R8G8Uint
            | Format::R4G4B4A4Unorm
            | Format::R5G5B5A1Unorm
            | Format::D16Unorm => Some(2),
            Format::R8G8B8Unorm | Format::R8G8B8Snorm | Format::R8G8B8Srgb | Format::R8G8B8Sint
            | Format::R8G8B8Uint => Some(3),
            Format::R32Float
            | Format::R32Sint
            | Format::R32Uint
            | Format::R16G16Unorm
            | Format::R16G16Snorm
            | Format::R16G16Float
            | Format::R16G16Sint
            | Format::R16G16Uint
            | Format::R8G8B8A8Unorm
            | Format::R8G8B8A8Snorm
            | Format::R8G8B8A8Srgb
            | Format::R8G8B8A8Sint
            | Format::R8G8B8A8Uint
            | Format::R10G10B10A2Unorm
            | Format::R10G10B10A2Uint
            | Format::R11G11B10Float
            | Format::R9G9B9E5Float
            | Format::D24Unorm
            | Format::D32Unorm
            | Format::D32Float
            | Format::D24UnormS8Uint => Some(4),
            Format::R16G16B16Unorm
            | Format::R16G16B16Snorm
            | Format::R16G16B16Float
            | Format::R16G16B16Sint
            | Format::R16G16B16Uint => Some(6),
            Format::R32G32Float
            | Format::R32G32Sint
            | Format::R32G32Uint
            | Format::R16G16B16A16Unorm
            | Format::R16G16B16A16Snorm
            | Format::R16G16B16A16Float
            | Format::R16G16B16A16Sint
            | Format::R16G16B16A16Uint
            | Format::D32FloatS8Uint => Some(8),
            Format::R32G32B32Float | Format::R32G32B32Sint | Format::R32G32B32Uint => Some(12),
            Format::R32G32B32A32Float | Format::R32G32B32A32Sint | Format::R32G32B32A32Uint => {
                Some(16)
            }
            _ => None,
        }
    }
}
