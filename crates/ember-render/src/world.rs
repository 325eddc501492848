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

//! A small entity-component store for scene data.
//!
//! The renderer only needs to attach, read, and remove plain-data components
//! on entities, so this world keeps one type-keyed column per component type
//! instead of a full archetype layout. Entities are iterated in spawn order,
//! which keeps draw submission deterministic across frames.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Identifies one entity in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Returns the raw index of this entity, mostly useful for log messages.
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// A group of components that can be attached to an entity in one call.
///
/// Implemented for tuples so call sites read as
/// `world.spawn((Transform::default(), MeshSource("rock".into())))`.
pub trait ComponentBundle {
    /// Attaches every component of the bundle to `entity`.
    fn attach(self, world: &mut World, entity: Entity);
}

macro_rules! impl_component_bundle {
    ($(($($name:ident : $index:tt),+))+) => {
        $(
            impl<$($name: 'static),+> ComponentBundle for ($($name,)+) {
                fn attach(self, world: &mut World, entity: Entity) {
                    $(world.insert(entity, self.$index);)+
                }
            }
        )+
    };
}

impl_component_bundle! {
    (A: 0)
    (A: 0, B: 1)
    (A: 0, B: 1, C: 2)
    (A: 0, B: 1, C: 2, D: 3)
    (A: 0, B: 1, C: 2, D: 3, E: 4)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5)
}

/// Stores entities and their components.
#[derive(Default)]
pub struct World {
    entities: Vec<Entity>,
    next_index: u32,
    columns: HashMap<TypeId, HashMap<Entity, Box<dyn Any>>>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity carrying the components of `bundle`.
    pub fn spawn<B: ComponentBundle>(&mut self, bundle: B) -> Entity {
        let entity = self.spawn_empty();
        bundle.attach(self, entity);
        entity
    }

    /// Spawns a new entity with no components.
    pub fn spawn_empty(&mut self) -> Entity {
        let entity = Entity(self.next_index);
        self.next_index += 1;
        self.entities.push(entity);
        entity
    }

    /// Removes `entity` and every component attached to it.
    pub fn despawn(&mut self, entity: Entity) {
        self.entities.retain(|live| *live != entity);
        for column in self.columns.values_mut() {
            column.remove(&entity);
        }
    }

    /// Attaches `component` to `entity`, replacing any previous value of the
    /// same type.
    pub fn insert<T: 'static>(&mut self, entity: Entity, component: T) {
        self.columns
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(entity, Box::new(component));
    }

    /// Returns a reference to the `T` component of `entity`, if present.
    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.columns
            .get(&TypeId::of::<T>())?
            .get(&entity)?
            .downcast_ref::<T>()
    }

    /// Returns a mutable reference to the `T` component of `entity`, if
    /// present.
    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .get_mut(&entity)?
            .downcast_mut::<T>()
    }

    /// Detaches the `T` component from `entity` and returns it.
    pub fn remove<T: 'static>(&mut self, entity: Entity) -> Option<T> {
        let boxed = self.columns.get_mut(&TypeId::of::<T>())?.remove(&entity)?;
        boxed.downcast::<T>().ok().map(|component| *component)
    }

    /// Returns whether `entity` currently carries a `T` component.
    pub fn has<T: 'static>(&self, entity: Entity) -> bool {
        self.columns
            .get(&TypeId::of::<T>())
            .is_some_and(|column| column.contains_key(&entity))
    }

    /// Collects every live entity carrying a `T` component, in spawn order.
    ///
    /// The result is an owned list so callers can mutate the world while
    /// walking it.
    pub fn entities_with<T: 'static>(&self) -> Vec<Entity> {
        let Some(column) = self.columns.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|entity| column.contains_key(entity))
            .copied()
            .collect()
    }

    /// Returns the number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns whether the world holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    #[derive(Debug, PartialEq)]
    struct Name(&'static str);

    struct Tag;

    #[test]
    fn spawn_attaches_every_bundle_component() {
        let mut world = World::new();
        let entity = world.spawn((Health(10), Name("rock")));

        assert_eq!(world.get::<Health>(entity), Some(&Health(10)));
        assert_eq!(world.get::<Name>(entity), Some(&Name("rock")));
        assert!(!world.has::<Tag>(entity));
    }

    #[test]
    fn insert_replaces_a_component_of_the_same_type() {
        let mut world = World::new();
        let entity = world.spawn((Health(10),));

        world.insert(entity, Health(3));

        assert_eq!(world.get::<Health>(entity), Some(&Health(3)));
    }

    #[test]
    fn remove_detaches_and_returns_the_component() {
        let mut world = World::new();
        let entity = world.spawn((Health(10), Tag));

        assert_eq!(world.remove::<Health>(entity), Some(Health(10)));
        assert!(world.get::<Health>(entity).is_none());
        assert!(world.has::<Tag>(entity));
    }

    #[test]
    fn entities_with_walks_in_spawn_order() {
        let mut world = World::new();
        let first = world.spawn((Tag,));
        let plain = world.spawn_empty();
        let second = world.spawn((Tag,));

        assert_eq!(world.entities_with::<Tag>(), vec![first, second]);
        assert!(!world.entities_with::<Tag>().contains(&plain));
    }

    #[test]
    fn despawn_clears_every_column() {
        let mut world = World::new();
        let entity = world.spawn((Health(10), Name("rock"), Tag));

        world.despawn(entity);

        assert!(world.is_empty());
        assert!(world.get::<Health>(entity).is_none());
        assert!(world.entities_with::<Tag>().is_empty());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut world = World::new();
        let entity = world.spawn((Health(10),));

        world.get_mut::<Health>(entity).unwrap().0 = 42;

        assert_eq!(world.get::<Health>(entity), Some(&Health(42)));
    }
}
