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

//! Defines framebuffers, their attachments, and clear semantics.
//!
//! A framebuffer owns the textures backing its attachments: creating one
//! creates them, destroying it destroys them. Clear values are tagged by
//! numeric class and validated against the attachment format before any
//! backend work happens.

use std::borrow::Cow;

use crate::math::dimension::Extent2D;
use crate::rhi::error::ResourceError;
use crate::rhi::format::{BaseTypeClass, Format};
use crate::rhi::handle::{FramebufferId, TextureId};

/// Maximum number of color attachments a framebuffer can carry.
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// What happens to an attachment's contents when a render pass begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    /// Clear the attachment to its descriptor's clear value.
    Clear,
    /// Keep whatever the attachment already contains.
    Load,
    /// Discard the previous contents and leave them undefined.
    DontCare,
}

/// A clear color tagged with the numeric class it applies to.
///
/// The tag must agree with the attachment format's [`BaseTypeClass`];
/// mismatches are rejected at framebuffer creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// Clear color for normalized, sRGB, and floating point attachments.
    Float([f32; 4]),
    /// Clear color for signed integer attachments.
    Int([i32; 4]),
    /// Clear color for unsigned integer attachments.
    Uint([u32; 4]),
}

impl ClearValue {
    /// Returns `true` if this clear value can clear an attachment of the
    /// given class.
    pub const fn matches(&self, class: BaseTypeClass) -> bool {
        matches!(
            (self, class),
            (ClearValue::Float(_), BaseTypeClass::Float)
                | (ClearValue::Int(_), BaseTypeClass::Integer)
                | (ClearValue::Uint(_), BaseTypeClass::UnsignedInteger)
        )
    }
}

/// Clear values for a depth-stencil attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearDepthStencil {
    /// Depth clear value, in the `[0, 1]` range.
    pub depth: f32,
    /// Stencil clear value.
    pub stencil: u32,
}

impl Default for ClearDepthStencil {
    fn default() -> Self {
        Self {
            depth: 1.0,
            stencil: 0,
        }
    }
}

/// Describes one color attachment of a framebuffer to be created.
///
/// Each attachment carries its own label and extent; the backing texture is
/// created from them.
#[derive(Debug, Clone)]
pub struct ColorAttachmentDescriptor<'a> {
    /// An optional debug label, also used to derive the texture's label.
    pub label: Option<Cow<'a, str>>,
    /// The storage format of the attachment.
    pub format: Format,
    /// The size of the attachment in pixels.
    pub extent: Extent2D,
    /// What happens to the contents when a pass begins.
    pub load_op: LoadOp,
    /// Clear color used when `load_op` is [`LoadOp::Clear`].
    pub clear_value: ClearValue,
}

/// Describes the depth-stencil attachment of a framebuffer to be created.
#[derive(Debug, Clone)]
pub struct DepthStencilAttachmentDescriptor<'a> {
    /// An optional debug label, also used to derive the texture's label.
    pub label: Option<Cow<'a, str>>,
    /// The storage format of the attachment. Must carry a depth component.
    pub format: Format,
    /// The size of the attachment in pixels.
    pub extent: Extent2D,
    /// What happens to the contents when a pass begins.
    pub load_op: LoadOp,
    /// Clear values used when `load_op` is [`LoadOp::Clear`].
    pub clear_depth_stencil: ClearDepthStencil,
}

/// A descriptor used to create a framebuffer through
/// [`GraphicsDevice::create_framebuffer`](crate::rhi::device::GraphicsDevice::create_framebuffer).
#[derive(Debug, Clone, Default)]
pub struct FramebufferDescriptor<'a> {
    /// An optional debug label for the framebuffer.
    pub label: Option<Cow<'a, str>>,
    /// Up to [`MAX_COLOR_ATTACHMENTS`] color attachments, by slot.
    pub color_attachments: [Option<ColorAttachmentDescriptor<'a>>; MAX_COLOR_ATTACHMENTS],
    /// Optional depth-stencil attachment.
    pub depth_stencil_attachment: Option<DepthStencilAttachmentDescriptor<'a>>,
}

impl FramebufferDescriptor<'_> {
    /// The label as a displayable string, falling back to `"unnamed"`.
    pub fn label_or_unnamed(&self) -> &str {
        self.label.as_deref().unwrap_or("unnamed")
    }

    /// Checks the descriptor for contradictions before any resources are
    /// allocated.
    ///
    /// Rejects clear values whose tag disagrees with the attachment format's
    /// numeric class, depth formats in color slots, and non-depth formats in
    /// the depth-stencil slot.
    pub fn validate(&self) -> Result<(), ResourceError> {
        for (slot, attachment) in self.color_attachments.iter().enumerate() {
            let Some(attachment) = attachment else {
                continue;
            };
            if attachment.format.is_depth() {
                return Err(ResourceError::InvalidDescriptor(format!(
                    "framebuffer '{}' color slot {} uses depth format {:?}",
                    self.label_or_unnamed(),
                    slot,
                    attachment.format
                )));
            }
            if attachment.load_op == LoadOp::Clear
                && !attachment
                    .clear_value
                    .matches(attachment.format.base_type_class())
            {
                return Err(ResourceError::ClearValueMismatch {
                    framebuffer: self.label_or_unnamed().to_owned(),
                    slot,
                    format: attachment.format,
                });
            }
        }
        if let Some(depth) = &self.depth_stencil_attachment {
            if !depth.format.is_depth() && !depth.format.has_stencil() {
                return Err(ResourceError::InvalidDescriptor(format!(
                    "framebuffer '{}' depth-stencil attachment uses color format {:?}",
                    self.label_or_unnamed(),
                    depth.format
                )));
            }
        }
        Ok(())
    }
}

/// Bookkeeping record for one live color attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAttachment {
    /// The texture backing the attachment.
    pub texture: TextureId,
    /// The storage format of the attachment.
    pub format: Format,
    /// The size of the attachment in pixels.
    pub extent: Extent2D,
    /// What happens to the contents when a pass begins.
    pub load_op: LoadOp,
    /// Clear color used when `load_op` is [`LoadOp::Clear`].
    pub clear_value: ClearValue,
}

/// Bookkeeping record for a live depth-stencil attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthStencilAttachment {
    /// The texture backing the attachment.
    pub texture: TextureId,
    /// The storage format of the attachment.
    pub format: Format,
    /// The size of the attachment in pixels.
    pub extent: Extent2D,
    /// What happens to the contents when a pass begins.
    pub load_op: LoadOp,
    /// Clear values used when `load_op` is [`LoadOp::Clear`].
    pub clear_depth_stencil: ClearDepthStencil,
}

/// Bookkeeping record for a live framebuffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    /// The handle this record is stored under.
    pub id: FramebufferId,
    /// Color attachments by slot.
    pub color_attachments: [Option<ColorAttachment>; MAX_COLOR_ATTACHMENTS],
    /// Depth-stencil attachment, if any.
    pub depth_stencil_attachment: Option<DepthStencilAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_attachment(format: Format, clear_value: ClearValue) -> ColorAttachmentDescriptor<'static> {
        ColorAttachmentDescriptor {
            label: Some("Albedo".into()),
            format,
            extent: Extent2D::new(64, 64),
            load_op: LoadOp::Clear,
            clear_value,
        }
    }

    #[test]
    fn clear_value_tags_track_numeric_classes() {
        assert!(ClearValue::Float([0.0; 4]).matches(BaseTypeClass::Float));
        assert!(ClearValue::Int([0; 4]).matches(BaseTypeClass::Integer));
        assert!(ClearValue::Uint([0; 4]).matches(BaseTypeClass::UnsignedInteger));
        assert!(!ClearValue::Float([0.0; 4]).matches(BaseTypeClass::Integer));
        assert!(!ClearValue::Uint([0; 4]).matches(BaseTypeClass::Float));
    }

    #[test]
    fn validation_accepts_matching_clear_values() {
        let mut descriptor = FramebufferDescriptor {
            label: Some("GeometryPass".into()),
            ..Default::default()
        };
        descriptor.color_attachments[0] =
            Some(color_attachment(Format::R8G8B8A8Srgb, ClearValue::Float([0.4, 0.3, 0.2, 1.0])));
        descriptor.color_attachments[1] =
            Some(color_attachment(Format::R32G32Uint, ClearValue::Uint([0; 4])));
        descriptor.depth_stencil_attachment = Some(DepthStencilAttachmentDescriptor {
            label: Some("Depth".into()),
            format: Format::D24UnormS8Uint,
            extent: Extent2D::new(64, 64),
            load_op: LoadOp::Clear,
            clear_depth_stencil: ClearDepthStencil::default(),
        });

        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn validation_rejects_mismatched_clear_tag() {
        let mut descriptor = FramebufferDescriptor {
            label: Some("Ids".into()),
            ..Default::default()
        };
        descriptor.color_attachments[2] =
            Some(color_attachment(Format::R32Uint, ClearValue::Float([0.0; 4])));

        match descriptor.validate() {
            Err(ResourceError::ClearValueMismatch { framebuffer, slot, format }) => {
                assert_eq!(framebuffer, "Ids");
                assert_eq!(slot, 2);
                assert_eq!(format, Format::R32Uint);
            }
            other => panic!("expected clear value mismatch, got {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_misplaced_formats() {
        let mut with_depth_in_color = FramebufferDescriptor::default();
        with_depth_in_color.color_attachments[0] =
            Some(color_attachment(Format::D32Float, ClearValue::Float([0.0; 4])));
        assert!(matches!(
            with_depth_in_color.validate(),
            Err(ResourceError::InvalidDescriptor(_))
        ));

        let with_color_in_depth = FramebufferDescriptor {
            depth_stencil_attachment: Some(DepthStencilAttachmentDescriptor {
                label: None,
                format: Format::R8G8B8A8Unorm,
                extent: Extent2D::new(4, 4),
                load_op: LoadOp::Load,
                clear_depth_stencil: ClearDepthStencil::default(),
            }),
            ..Default::default()
        };
        assert!(matches!(
            with_color_in_depth.validate(),
            Err(ResourceError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn load_preserves_contents_without_clear_validation() {
        for load_op in [LoadOp::Load, LoadOp::DontCare] {
            let mut descriptor = FramebufferDescriptor::default();
            descriptor.color_attachments[0] = Some(ColorAttachmentDescriptor {
                load_op,
                // Deliberately mismatched tag; irrelevant without a clear.
                ..color_attachment(Format::R32Uint, ClearValue::Float([0.0; 4]))
            });
            assert!(descriptor.validate().is_ok());
        }
    }
}
