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

//! Scene-driven rendering on top of the ember graphics device contract.
//!
//! This crate turns entities that name their assets into GPU resources and
//! draws them through a two-pass forward pipeline: a geometry pass into
//! offscreen render targets, then a composite pass onto the default
//! framebuffer. Everything GPU-facing goes through the
//! [`GraphicsDevice`](ember_core::GraphicsDevice) trait, so the renderer never
//! touches the backing graphics API directly.

#![warn(missing_docs)]

pub mod assets;
pub mod components;
pub mod gpu;
pub mod renderer;
pub mod shaders;
pub mod view;
pub mod world;

pub use self::assets::{AssetLibrary, AssetProvider, CpuImage, CpuMaterial, CpuMesh};
pub use self::renderer::{ForwardRenderer, Renderer};
pub use self::view::ViewInfo;
pub use self::world::{Entity, World};
