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

//! Defines tunable renderer and device behavior.

use crate::math::Extent2D;

/// Host-configurable renderer options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    /// Requested window framebuffer resolution at startup.
    pub resolution: Extent2D,
    /// Ratio of render-target resolution to surface resolution.
    ///
    /// Values below `1.0` render at reduced resolution and upscale during
    /// composition.
    pub resolution_scale: f32,
    /// Whether presentation should wait for vertical sync. Consumed by the
    /// embedding window layer; the renderer itself never touches the
    /// swapchain.
    pub vsync: bool,
    /// When true, render passes are wrapped in named debug groups.
    pub debug: bool,
    /// How the device treats texture residency edge cases.
    pub bindless: BindlessPolicy,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            resolution: Extent2D::new(1280, 720),
            resolution_scale: 1.0,
            vsync: true,
            debug: false,
            bindless: BindlessPolicy::default(),
        }
    }
}

/// Governs how a device treats texture residency edge cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindlessPolicy {
    /// When true, making an already-resident texture resident returns the
    /// existing handle. When false it is refused with
    /// [`AlreadyResident`](crate::rhi::error::ResourceError::AlreadyResident).
    pub residency_idempotent: bool,
    /// When true, destroying a still-resident texture revokes its residency
    /// first. When false the destroy is refused until the caller revokes it
    /// explicitly.
    pub evict_on_destroy: bool,
}

impl Default for BindlessPolicy {
    fn default() -> Self {
        Self {
            residency_idempotent: true,
            evict_on_destroy: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let settings = RendererSettings::default();
        assert_eq!(settings.resolution, Extent2D::new(1280, 720));
        assert_eq!(settings.resolution_scale, 1.0);
        assert!(settings.vsync);
        assert!(!settings.debug);

        let policy = BindlessPolicy::default();
        assert!(policy.residency_idempotent);
        assert!(policy.evict_on_destroy);
    }
}
