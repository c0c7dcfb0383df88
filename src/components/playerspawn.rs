//! Player spawn point controller component.

use bevy_ecs::prelude::Component;

use crate::components::{BindState, Controller};
use crate::error::MapError;
use crate::schematic::{PlayerRole, PlayerSpawnPointEntry, Vec3};
use crate::world::WorldView;

/// A point where players of one role spawn.
#[derive(Component, Debug, Clone)]
pub struct PlayerSpawnPoint {
    pub role: PlayerRole,
    state: BindState,
}

impl PlayerSpawnPoint {
    pub fn new() -> Self {
        PlayerSpawnPoint {
            role: PlayerRole::ClassD,
            state: BindState::Unbound,
        }
    }
}

impl Default for PlayerSpawnPoint {
    fn default() -> Self {
        PlayerSpawnPoint::new()
    }
}

impl Controller for PlayerSpawnPoint {
    type Entry = PlayerSpawnPointEntry;

    fn bind(
        &mut self,
        entry: Option<&PlayerSpawnPointEntry>,
        _position: Vec3,
        _world: &dyn WorldView,
    ) -> Result<(), MapError> {
        if self.state != BindState::Unbound {
            return Err(MapError::AlreadyBound);
        }
        if let Some(entry) = entry {
            self.role = entry.role;
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
    fn test_bind_copies_role() {
        let world = InMemoryWorld::new();
        let entry = PlayerSpawnPointEntry {
            role: PlayerRole::Scientist,
            ..PlayerSpawnPointEntry::default()
        };
        let mut point = PlayerSpawnPoint::new();
        point.bind(Some(&entry), Vec3::ZERO, &world).unwrap();
        assert_eq!(point.role, PlayerRole::Scientist);
        assert!(point.is_bound());
    }
}
