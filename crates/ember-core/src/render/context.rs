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

//! Defines the per-frame and per-viewport state handed to renderers.

use crate::math::Extent2D;

/// Timing and surface state for the frame being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext {
    /// Seconds elapsed since the previous frame.
    pub delta_time: f32,
    /// Frames rendered so far. Zero on the very first frame.
    pub frame_counter: u64,
    /// True when the swapchain surface does not perform sRGB encoding.
    pub is_srgb_disabled: bool,
}

/// Window and scene-viewer dimensions plus their dirty flags.
///
/// The host writes raw sizes and raises the matching `*_resized` flag; the
/// renderer derives the scaled sizes, reacts, and lowers both flags.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// True when rendering targets an editor's scene viewer rather than the
    /// window itself.
    pub is_editor: bool,
    /// Current window framebuffer size in pixels.
    pub window_framebuffer_size: Extent2D,
    /// Window framebuffer size after applying the resolution scale.
    pub window_framebuffer_scaled_size: Extent2D,
    /// Current scene viewer size in pixels. Meaningful only in editor mode.
    pub scene_viewer_size: Extent2D,
    /// Scene viewer size after applying the resolution scale.
    pub scene_viewer_scaled_size: Extent2D,
    /// Raised by the host when the window framebuffer size changed.
    pub window_framebuffer_resized: bool,
    /// Raised by the host when the scene viewer size changed.
    pub scene_viewer_resized: bool,
}

impl ViewportState {
    /// Creates viewport state for a window of the given size.
    ///
    /// Scaled sizes start equal to the raw size. The window resize flag
    /// starts raised so the first frame builds its render targets through
    /// the ordinary resize path.
    pub fn new(window_framebuffer_size: Extent2D) -> Self {
        Self {
            window_framebuffer_size,
            window_framebuffer_scaled_size: window_framebuffer_size,
            window_framebuffer_resized: true,
            ..Default::default()
        }
    }

    /// True when either surface changed size since the renderer last reacted.
    pub fn needs_resize(&self) -> bool {
        self.window_framebuffer_resized || self.scene_viewer_resized
    }

    /// Recomputes both scaled sizes from the raw sizes.
    pub fn rescale(&mut self, resolution_scale: f32) {
        self.window_framebuffer_scaled_size =
            self.window_framebuffer_size.scaled_by(resolution_scale);
        self.scene_viewer_scaled_size = self.scene_viewer_size.scaled_by(resolution_scale);
    }

    /// The scaled size render targets should currently match.
    pub fn active_scaled_size(&self) -> Extent2D {
        if self.is_editor {
            self.scene_viewer_scaled_size
        } else {
            self.window_framebuffer_scaled_size
        }
    }

    /// Lowers both resize flags.
    pub fn clear_resize_flags(&mut self) {
        self.window_framebuffer_resized = false;
        self.scene_viewer_resized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_truncates_towards_zero() {
        let mut viewport = ViewportState::new(Extent2D::new(1601, 901));
        viewport.rescale(0.5);
        assert_eq!(viewport.window_framebuffer_scaled_size, Extent2D::new(800, 450));
    }

    #[test]
    fn active_size_follows_editor_mode() {
        let mut viewport = ViewportState::new(Extent2D::new(1920, 1080));
        viewport.scene_viewer_size = Extent2D::new(1280, 720);
        viewport.rescale(1.0);

        assert_eq!(viewport.active_scaled_size(), Extent2D::new(1920, 1080));
        viewport.is_editor = true;
        assert_eq!(viewport.active_scaled_size(), Extent2D::new(1280, 720));
    }

    #[test]
    fn resize_flags_round_trip() {
        let mut viewport = ViewportState::new(Extent2D::new(800, 600));
        // A fresh viewport asks for its first render target build.
        assert!(viewport.needs_resize());

        viewport.clear_resize_flags();
        assert!(!viewport.needs_resize());

        viewport.scene_viewer_resized = true;
        assert!(viewport.needs_resize());

        viewport.clear_resize_flags();
        assert!(!viewport.needs_resize());
    }
}
