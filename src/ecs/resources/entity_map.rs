use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

/// Bidirectional mapping between card keys and Bevy entities, plus the
/// simulation id allocator.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimEntityMap {
    to_bevy: BTreeMap<String, Entity>,
    to_key: BTreeMap<Entity, String>,
    next_id: u64,
}

impl SimEntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next simulation id. The first call returns 0.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a mapping. Panics if the key is already registered.
    pub fn insert(&mut self, key: &str, entity: Entity) {
        let prev = self.to_bevy.insert(key.to_string(), entity);
        assert!(prev.is_none(), "duplicate card key '{key}' in SimEntityMap");
        self.to_key.insert(entity, key.to_string());
    }

    pub fn get_bevy(&self, key: &str) -> Option<Entity> {
        self.to_bevy.get(key).copied()
    }

    pub fn get_key(&self, entity: Entity) -> Option<&str> {
        self.to_key.get(&entity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.to_bevy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_bevy.is_empty()
    }
}
