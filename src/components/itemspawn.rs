//! Item spawn point controller component.

use bevy_ecs::prelude::Component;

use crate::components::{BindState, Controller};
use crate::error::MapError;
use crate::schematic::{ItemSpawnPointEntry, Vec3};
use crate::world::WorldView;

/// A point where the hosting game may spawn an item at round start.
#[derive(Component, Debug, Clone)]
pub struct ItemSpawnPoint {
    /// Item identifier understood by the hosting game.
    pub item: String,
    /// Chance, in percent, that the item actually spawns.
    pub spawn_chance: u8,
    state: BindState,
}

impl ItemSpawnPoint {
    pub fn new() -> Self {
        ItemSpawnPoint {
            item: String::new(),
            spawn_chance: 100,
            state: BindState::Unbound,
        }
    }
}

impl Default for ItemSpawnPoint {
    fn default() -> Self {
        ItemSpawnPoint::new()
    }
}

impl Controller for ItemSpawnPoint {
    type Entry = ItemSpawnPointEntry;

    fn bind(
        &mut self,
        entry: Option<&ItemSpawnPointEntry>,
        _position: Vec3,
        _world: &dyn WorldView,
    ) -> Result<(), MapError> {
        if self.state != BindState::Unbound {
            return Err(MapError::AlreadyBound);
        }
        if let Some(entry) = entry {
            self.item = entry.item.clone();
            self.spawn_chance = entry.spawn_chance;
        }
        self.state = BindState::Bound;
        Ok(())
    }

    fn tick(&mut self, _dt: f32, _world: &dyn WorldView) {}

    fn unbind(&mut self, _world: &dyn WorldView) {
        if self.state == BindState::Bound {
            self.state = BindState::Released;
        }
    }

    fn state(&self) -> BindState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::memory::InMemoryWorld;

    #[test]
    fn test_bind_copies_item_config() {
        let world = InMemoryWorld::new();
        let entry = ItemSpawnPointEntry {
            item: "medkit".to_string(),
            spawn_chance: 40,
            ..ItemSpawnPointEntry::default()
        };
        let mut point = ItemSpawnPoint::new();
        point.bind(Some(&entry), Vec3::ZERO, &world).unwrap();
        assert_eq!(point.item, "medkit");
        assert_eq!(point.spawn_chance, 40);
    }
}
