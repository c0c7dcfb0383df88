//! Workstation controller component.

use bevy_ecs::prelude::Component;

use crate::components::{BindState, Controller};
use crate::error::MapError;
use crate::schematic::{Vec3, WorkstationEntry};
use crate::world::WorldView;

/// A placed workstation. Carries only its placement transform; all live
/// behavior belongs to the hosting world.
#[derive(Component, Debug, Clone)]
pub struct Workstation {
    pub rotation: Vec3,
    pub scale: Vec3,
    state: BindState,
}

impl Workstation {
    pub fn new() -> Self {
        Workstation {
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            state: BindState::Unbound,
        }
    }
}

impl Default for Workstation {
    fn default() -> Self {
        Workstation::new()
    }
}

impl Controller for Workstation {
    type Entry = WorkstationEntry;

    fn bind(
        &mut self,
        entry: Option<&WorkstationEntry>,
        _position: Vec3,
        _world: &dyn WorldView,
    ) -> Result<(), MapError> {
        if self.state != BindState::Unbound {
            return Err(MapError::AlreadyBound);
        }
        if let Some(entry) = entry {
            self.rotation = entry.rotation;
            self.scale = entry.scale;
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
