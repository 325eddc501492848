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

//! Defines data structures related to GPU buffer resources.

use crate::ember_bitflags;
use std::borrow::Cow;

ember_bitflags! {
    /// A set of flags describing the allowed usages of a buffer.
    ///
    /// Buffers are created with immutable storage; the flags state up front
    /// how the buffer will be bound and whether its contents may be
    /// rewritten after creation.
    pub struct BufferUsage: u32 {
        /// The buffer contents may be overwritten through
        /// [`GraphicsDevice::update_buffer`](crate::rhi::device::GraphicsDevice::update_buffer).
        const DYNAMIC_UPDATE = 1 << 0;
        /// The buffer can be bound as a vertex buffer.
        const VERTEX = 1 << 1;
        /// The buffer can be bound as an index buffer.
        const INDEX = 1 << 2;
        /// The buffer can be bound as a uniform buffer.
        const UNIFORM = 1 << 3;
        /// The buffer can be bound as a storage buffer.
        const STORAGE = 1 << 4;
    }
}

/// A descriptor used to create a buffer through
/// [`GraphicsDevice::create_buffer`](crate::rhi::device::GraphicsDevice::create_buffer).
#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// The total size of the buffer in bytes.
    pub size: u64,
    /// Initial contents. When present, must not exceed `size` bytes.
    pub initial_data: Option<&'a [u8]>,
    /// A bitmask of [`BufferUsage`] flags describing how the buffer will be used.
    pub usage: BufferUsage,
}

/// Bookkeeping record for a live buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// The handle this record is stored under.
    pub id: crate::rhi::handle::BufferId,
    /// The total size of the buffer in bytes.
    pub size: u64,
    /// The usage flags the buffer was created with.
    pub usage: BufferUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_flags_compose() {
        let usage = BufferUsage::VERTEX | BufferUsage::DYNAMIC_UPDATE;
        assert!(usage.contains(BufferUsage::VERTEX));
        assert!(usage.contains(BufferUsage::DYNAMIC_UPDATE));
        assert!(!usage.contains(BufferUsage::INDEX));
    }
}
