//! Object controllers: the runtime counterparts of schematic entries.
//!
//! Each placeable object kind has one controller component. A controller is
//! bound exactly once at spawn time, may be ticked every simulation step,
//! and is unbound exactly once at removal. The [`Controller`] trait fixes
//! that lifecycle; [`BindState`] is the state machine behind it:
//! `Unbound → Bound → Released`, with `Released` terminal.
//!
//! Submodules overview:
//! - [`door`] – door configuration (model, open/locked flags)
//! - [`workstation`] – workstation placement
//! - [`itemspawn`] – item spawn point (item id, spawn chance)
//! - [`playerspawn`] – player spawn point (role)
//! - [`lightregion`] – ambient-light override region; the only controller
//!   with per-tick behavior and live sub-object bindings

pub mod door;
pub mod itemspawn;
pub mod lightregion;
pub mod playerspawn;
pub mod workstation;

use bevy_ecs::prelude::Component;

use crate::error::MapError;
use crate::schematic::Vec3;
use crate::world::{WorldObjectRef, WorldView};

/// Lifecycle state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindState {
    /// Constructed but not yet bound.
    #[default]
    Unbound,
    /// Bound and live; may be ticked.
    Bound,
    /// Unbound after removal. Terminal.
    Released,
}

/// Common lifecycle contract of every controller kind.
///
/// `bind` and `unbind` are invoked synchronously by the registry from the
/// tick thread, never concurrently with a tick in flight. `unbind` must be
/// safe at any point after `bind` and effect-equivalent regardless of how
/// many ticks elapsed in between.
pub trait Controller {
    /// The schematic entry kind this controller is configured from.
    type Entry;

    /// Initialize once at spawn. With an entry, configuration is copied from
    /// it; without one (manual placement), configuration is derived from the
    /// controller's own placement in the world and defaults. Binding an
    /// already-bound controller fails with [`MapError::AlreadyBound`].
    fn bind(
        &mut self,
        entry: Option<&Self::Entry>,
        position: Vec3,
        world: &dyn WorldView,
    ) -> Result<(), MapError>;

    /// Advance one simulation step. Must be cheap when there is nothing to
    /// do; controllers with no per-tick behavior leave this a no-op.
    fn tick(&mut self, dt: f32, world: &dyn WorldView);

    /// Tear down once at removal, restoring any overridden live state to its
    /// documented default. Calling it again is a no-op.
    fn unbind(&mut self, world: &dyn WorldView);

    /// Current lifecycle state.
    fn state(&self) -> BindState;

    fn is_bound(&self) -> bool {
        self.state() == BindState::Bound
    }
}

/// The placed world object backing a controller, plus where it was placed.
///
/// The registry creates the object before binding and removes it after
/// unbinding, symmetric with creation.
#[derive(Component, Debug, Clone, Copy)]
pub struct Placement {
    pub object: WorldObjectRef,
    pub position: Vec3,
}
