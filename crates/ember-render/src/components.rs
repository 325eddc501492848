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

//! Components the renderer reads from and writes back to the world.

use ember_core::math::{Mat4, Quat, Vec3};

/// Names the mesh asset an entity renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSource(pub String);

/// Names the material asset an entity renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSource(pub String);

/// Tags an entity whose GPU resources have not been created yet.
///
/// The renderer scans for this tag each frame, resolves the entity's
/// [`MeshSource`]/[`MaterialSource`] names against its caches, and removes the
/// tag once the lookups succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedsGpuResources;

/// Marks an entity whose mesh is resident in the renderer's cache under the
/// contained key.
///
/// Written back by the renderer; entities sharing a mesh name end up pointing
/// at the same cached record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuMeshRef(pub String);

/// Marks an entity whose material is resident in the renderer's cache under
/// the contained key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuMaterialRef(pub String);

/// Describes an entity's position, rotation, and scale in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation (position) of the entity.
    pub translation: Vec3,
    /// The rotation of the entity, represented as a quaternion.
    pub rotation: Quat,
    /// The scale of the entity.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform` with a given translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a new `Transform` with a given translation, and identity
    /// rotation/scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Creates a new identity `Transform` representing the world origin.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Calculates the `Mat4` transformation matrix from this component's
    /// translation, rotation, and scale.
    ///
    /// The final matrix applies in the standard `Scale -> Rotate -> Translate`
    /// order.
    pub fn to_mat4(&self) -> Mat4 {
        // T * R * S
        Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::math::{approx_eq, Vec4};

    #[test]
    fn identity_transform_maps_points_to_themselves() {
        let transform = Transform::default();
        let point = transform.to_mat4() * Vec4::new(1.0, 2.0, 3.0, 1.0);

        assert!(approx_eq(point.x, 1.0));
        assert!(approx_eq(point.y, 2.0));
        assert!(approx_eq(point.z, 3.0));
    }

    #[test]
    fn to_mat4_scales_before_translating() {
        let transform = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        };
        let point = transform.to_mat4() * Vec4::new(1.0, 0.0, 0.0, 1.0);

        // Scale applies first, so the unit point lands at 2 + 10.
        assert!(approx_eq(point.x, 12.0));
    }
}
