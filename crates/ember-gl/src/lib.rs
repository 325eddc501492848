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

//! # Ember GL
//!
//! OpenGL implementation of the [`GraphicsDevice`](ember_core::GraphicsDevice)
//! contract, built on [`glow`]. The device owns every GL object it creates
//! and tracks them in append-only slot tables, so stale handles fail lookups
//! instead of touching freed GL names.

#![warn(missing_docs)]

mod conversions;
mod include;

pub mod device;

pub use device::GlDevice;
