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

//! Defines opaque, typed handles for GPU resources and the slot tables that
//! back them.
//!
//! Handles are plain indices into an append-only table. Indices are never
//! reused, so a handle to a destroyed resource stays invalid forever instead
//! of silently aliasing a newer resource.

use std::marker::PhantomData;

/// Index value reserved for handles that refer to nothing.
pub const INVALID_INDEX: usize = usize::MAX;

/// Conversion between a typed handle and its raw slot index.
///
/// Implemented by every resource id type so [`SlotTable`] can stay generic.
pub trait ResourceId: Copy {
    /// Wraps a raw slot index in the typed handle.
    fn from_index(index: usize) -> Self;
    /// Unwraps the typed handle back to its raw slot index.
    fn index(&self) -> usize;
}

macro_rules! define_resource_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Handle value that never refers to a live resource.
            pub const INVALID: Self = Self(INVALID_INDEX);

            /// Returns `true` unless this is the invalid sentinel.
            pub const fn is_valid(&self) -> bool {
                self.0 != INVALID_INDEX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl ResourceId for $name {
            fn from_index(index: usize) -> Self {
                Self(index)
            }

            fn index(&self) -> usize {
                self.0
            }
        }
    };
}

define_resource_id! {
    /// An opaque handle to a GPU texture resource.
    TextureId
}

define_resource_id! {
    /// An opaque handle to a GPU buffer resource.
    BufferId
}

define_resource_id! {
    /// An opaque handle to a framebuffer and its attachments.
    FramebufferId
}

define_resource_id! {
    /// An opaque handle to a compiled graphics pipeline.
    GraphicsPipelineId
}

define_resource_id! {
    /// An opaque handle to a compiled compute pipeline.
    ComputePipelineId
}

/// An append-only arena keyed by a typed resource id.
///
/// Inserting returns the next index in creation order. Removing frees the
/// payload but leaves the slot occupied, so later lookups through a stale
/// handle return `None` rather than another resource's entry.
#[derive(Debug)]
pub struct SlotTable<I: ResourceId, T> {
    slots: Vec<Option<T>>,
    _marker: PhantomData<I>,
}

impl<I: ResourceId, T> SlotTable<I, T> {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Stores a value and returns the handle minted for it.
    pub fn insert(&mut self, value: T) -> I {
        self.slots.push(Some(value));
        I::from_index(self.slots.len() - 1)
    }

    /// Stores a value built from the handle it will live under.
    ///
    /// Lets records embed their own id without a fix-up pass after insertion.
    pub fn insert_with(&mut self, build: impl FnOnce(I) -> T) -> I {
        let id = I::from_index(self.slots.len());
        self.slots.push(Some(build(id)));
        id
    }

    /// Returns the live value behind `id`, if any.
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the live value behind `id` mutably, if any.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Removes and returns the value behind `id`. The slot is never reused.
    pub fn remove(&mut self, id: I) -> Option<T> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Iterates over the live entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (I::from_index(index), value)))
    }

    /// Number of live entries.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Drains every live entry, leaving all slots dead.
    pub fn drain(&mut self) -> impl Iterator<Item = (I, T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.take().map(|value| (I::from_index(index), value)))
    }
}

impl<I: ResourceId, T> Default for SlotTable<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_monotonic_and_never_reused() {
        let mut table: SlotTable<TextureId, &str> = SlotTable::new();
        let a = table.insert("a");
        let b = table.insert("b");
        let c = table.insert("c");
        assert_eq!((a, b, c), (TextureId(0), TextureId(1), TextureId(2)));

        assert_eq!(table.remove(b), Some("b"));
        let d = table.insert("d");
        assert_eq!(d, TextureId(3), "freed slots must not be reused");
        assert_eq!(table.live_count(), 3);
    }

    #[test]
    fn stale_and_invalid_handles_resolve_to_nothing() {
        let mut table: SlotTable<BufferId, u32> = SlotTable::new();
        let id = table.insert(7);
        assert_eq!(table.get(id), Some(&7));

        table.remove(id);
        assert_eq!(table.get(id), None);
        assert_eq!(table.get_mut(id), None);
        assert_eq!(table.remove(id), None);

        assert_eq!(table.get(BufferId::INVALID), None);
        assert_eq!(table.get(BufferId(42)), None);
    }

    #[test]
    fn invalid_sentinel_is_default_and_detectable() {
        assert!(!TextureId::default().is_valid());
        assert!(!FramebufferId::INVALID.is_valid());
        assert!(GraphicsPipelineId(0).is_valid());
        assert_ne!(ComputePipelineId(0), ComputePipelineId::INVALID);
    }

    #[test]
    fn insert_with_hands_the_value_its_own_id() {
        let mut table: SlotTable<TextureId, TextureId> = SlotTable::new();
        table.insert(TextureId::INVALID);
        let id = table.insert_with(|id| id);
        assert_eq!(id, TextureId(1));
        assert_eq!(table.get(id), Some(&id));
    }

    #[test]
    fn iteration_skips_dead_slots() {
        let mut table: SlotTable<TextureId, char> = SlotTable::new();
        let a = table.insert('a');
        let b = table.insert('b');
        table.insert('c');
        table.remove(b);

        let live: Vec<_> = table.iter().collect();
        assert_eq!(live, vec![(TextureId(0), &'a'), (TextureId(2), &'c')]);
        assert_eq!(table.get(a), Some(&'a'));
    }
}
