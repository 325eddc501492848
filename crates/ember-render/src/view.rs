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

//! Camera state the host hands the renderer each frame.

use ember_core::math::{Mat4, Vec3};

/// View and projection state for rendering a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInfo {
    /// World-to-view matrix.
    pub view_matrix: Mat4,
    /// View-to-clip matrix.
    pub projection_matrix: Mat4,
    /// Camera position in world space.
    pub camera_position: Vec3,
}

impl ViewInfo {
    /// Creates a `ViewInfo` from its matrices and the camera position.
    pub fn new(view_matrix: Mat4, projection_matrix: Mat4, camera_position: Vec3) -> Self {
        Self {
            view_matrix,
            projection_matrix,
            camera_position,
        }
    }

    /// Returns the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}

impl Default for ViewInfo {
    /// Returns an identity view at the world origin.
    fn default() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            camera_position: Vec3::ZERO,
        }
    }
}
