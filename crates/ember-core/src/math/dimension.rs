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

//! Provides structs for representing extents (sizes) and origins (offsets) in 2D and 3D.
//!
//! These types are commonly used to describe the dimensions of textures, windows, or
//! regions within them. They use integer (`u32`) components, making them suitable
//! for representing pixel-based coordinates and sizes.

/// A two-dimensional extent, typically representing width and height.
///
/// This is commonly used for texture dimensions or window sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent from a width and a height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either component is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ember_core::math::Extent2D;
    /// assert!(Extent2D::new(1920, 0).is_empty());
    /// assert!(!Extent2D::new(1920, 1080).is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Scales both components by a factor, truncating towards zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ember_core::math::Extent2D;
    /// let half = Extent2D::new(1920, 1080).scaled_by(0.5);
    /// assert_eq!(half, Extent2D::new(960, 540));
    /// ```
    pub fn scaled_by(&self, factor: f32) -> Self {
        Self {
            width: (self.width as f32 * factor) as u32,
            height: (self.height as f32 * factor) as u32,
        }
    }

    /// Number of mip levels in a full chain down to 1x1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ember_core::math::Extent2D;
    /// assert_eq!(Extent2D::new(1024, 512).max_mip_levels(), 11);
    /// assert_eq!(Extent2D::new(1, 1).max_mip_levels(), 1);
    /// ```
    pub const fn max_mip_levels(&self) -> u32 {
        let largest = if self.width > self.height {
            self.width
        } else {
            self.height
        };
        if largest == 0 {
            1
        } else {
            32 - largest.leading_zeros()
        }
    }
}

/// A three-dimensional extent, representing width, height, and depth.
///
/// This is used for 3D textures, texture arrays, or cubemaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth or number of array layers.
    pub depth_or_array_layers: u32,
}

impl Extent3D {
    /// Creates a new extent from a width, a height, and a depth or layer count.
    pub const fn new(width: u32, height: u32, depth_or_array_layers: u32) -> Self {
        Self {
            width,
            height,
            depth_or_array_layers,
        }
    }
}

impl From<Extent2D> for Extent3D {
    /// Promotes a 2D extent to 3D with a single depth slice.
    fn from(extent: Extent2D) -> Self {
        Self {
            width: extent.width,
            height: extent.height,
            depth_or_array_layers: 1,
        }
    }
}

/// A three-dimensional origin, representing an (x, y, z) offset.
///
/// This is often used to specify the corner of a 3D volume or an offset
/// into a texture array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin3D {
    /// The x-coordinate of the origin.
    pub x: u32,
    /// The y-coordinate of the origin.
    pub y: u32,
    /// The z-coordinate or array layer of the origin.
    pub z: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_extent_truncates_towards_zero() {
        let extent = Extent2D::new(1601, 901);
        assert_eq!(extent.scaled_by(0.5), Extent2D::new(800, 450));
        assert_eq!(extent.scaled_by(1.0), extent);
    }

    #[test]
    fn empty_extent_detection() {
        assert!(Extent2D::default().is_empty());
        assert!(Extent2D::new(0, 1080).is_empty());
        assert!(!Extent2D::new(1, 1).is_empty());
    }

    #[test]
    fn extent_promotion_uses_single_slice() {
        let extent: Extent3D = Extent2D::new(640, 480).into();
        assert_eq!(extent, Extent3D::new(640, 480, 1));
    }
}
