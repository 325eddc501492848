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

//! GLSL sources for the forward renderer, embedded at compile time.

/// Vertex stage of the geometry pass.
pub const GEOMETRY_VERT_GLSL: &str = include_str!("geometry.vert");

/// Fragment stage of the geometry pass.
pub const GEOMETRY_FRAG_GLSL: &str = include_str!("geometry.frag");

/// Vertex stage of the composite pass, a fullscreen triangle from the vertex
/// index alone.
pub const COMPOSITE_VERT_GLSL: &str = include_str!("composite.vert");

/// Fragment stage of the composite pass.
pub const COMPOSITE_FRAG_GLSL: &str = include_str!("composite.frag");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sources_are_complete_stages() {
        for source in [
            GEOMETRY_VERT_GLSL,
            GEOMETRY_FRAG_GLSL,
            COMPOSITE_VERT_GLSL,
            COMPOSITE_FRAG_GLSL,
        ] {
            assert!(source.starts_with("#version 460 core"));
            assert!(source.contains("void main"));
        }
    }

    #[test]
    fn geometry_fragment_writes_both_render_targets() {
        assert!(GEOMETRY_FRAG_GLSL.contains("o_albedo"));
        assert!(GEOMETRY_FRAG_GLSL.contains("o_normal"));
    }
}
