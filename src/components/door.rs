//! Door controller component.

use bevy_ecs::prelude::Component;

use crate::components::{BindState, Controller};
use crate::error::MapError;
use crate::schematic::{DoorEntry, DoorKind, Vec3};
use crate::world::WorldView;

/// Configuration of one placed door. No per-tick behavior; the door's live
/// representation belongs to the hosting world and is torn down through the
/// controller's placement.
#[derive(Component, Debug, Clone)]
pub struct Door {
    pub door_kind: DoorKind,
    pub is_open: bool,
    pub is_locked: bool,
    state: BindState,
}

impl Door {
    pub fn new() -> Self {
        Door {
            door_kind: DoorKind::LightContainment,
            is_open: false,
            is_locked: false,
            state: BindState::Unbound,
        }
    }
}

impl Default for Door {
    fn default() -> Self {
        Door::new()
    }
}

impl Controller for Door {
    type Entry = DoorEntry;

    fn bind(
        &mut self,
        entry: Option<&DoorEntry>,
        _position: Vec3,
        _world: &dyn WorldView,
    ) -> Result<(), MapError> {
        if self.state != BindState::Unbound {
            return Err(MapError::AlreadyBound);
        }
        if let Some(entry) = entry {
            self.door_kind = entry.door_kind;
            self.is_open = entry.is_open;
            self.is_locked = entry.is_locked;
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
    fn test_bind_copies_entry_config() {
        let world = InMemoryWorld::new();
        let entry = DoorEntry {
            door_kind: DoorKind::Entrance,
            is_open: true,
            is_locked: true,
            ..DoorEntry::default()
        };
        let mut door = Door::new();
        door.bind(Some(&entry), Vec3::ZERO, &world).unwrap();
        assert_eq!(door.door_kind, DoorKind::Entrance);
        assert!(door.is_open);
        assert!(door.is_locked);
        assert!(door.is_bound());
    }

    #[test]
    fn test_bind_without_entry_keeps_defaults() {
        let world = InMemoryWorld::new();
        let mut door = Door::new();
        door.bind(None, Vec3::ZERO, &world).unwrap();
        assert_eq!(door.door_kind, DoorKind::LightContainment);
        assert!(!door.is_open);
    }

    #[test]
    fn test_rebind_is_rejected() {
        let world = InMemoryWorld::new();
        let mut door = Door::new();
        door.bind(None, Vec3::ZERO, &world).unwrap();
        assert_eq!(
            door.bind(None, Vec3::ZERO, &world),
            Err(MapError::AlreadyBound)
        );
    }
}
