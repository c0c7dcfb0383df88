//! Controller registry and tick driver.
//!
//! [`MapRuntime`] is the process-wide collection of active controllers. It
//! owns the ECS world the controllers live in, spawns them from schematic
//! entries (or bare placements), drives them once per simulation tick, and
//! guarantees that removal, of one controller or of everything at session
//! end, restores every overridden live entity to its default state.
//!
//! The hosting simulation is reached only through the injected
//! [`WorldView`]; each live sub-object is expected to be targeted by at most
//! one controller at a time, which is the caller's responsibility.

use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::components::door::Door;
use crate::components::itemspawn::ItemSpawnPoint;
use crate::components::lightregion::LightRegion;
use crate::components::playerspawn::PlayerSpawnPoint;
use crate::components::workstation::Workstation;
use crate::color::Rgba;
use crate::components::{Controller, Placement};
use crate::error::MapError;
use crate::resources::runtimeconfig::RuntimeConfig;
use crate::resources::worldlink::WorldLink;
use crate::resources::worldtime::WorldTime;
use crate::schematic::{MapSchematic, ObjectKind, SchematicEntry, Vec3};
use crate::systems::lightshift::shift_light_colors;
use crate::systems::time::update_world_time;
use crate::world::WorldView;

/// Stable handle to a registered controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerHandle(Entity);

/// Registry of active controllers plus the schedule that ticks them.
pub struct MapRuntime {
    world: World,
    schedule: Schedule,
    view: Arc<dyn WorldView>,
    kinds: FxHashMap<ControllerHandle, ObjectKind>,
    order: Vec<ControllerHandle>,
    restore_color: Rgba,
}

impl MapRuntime {
    /// Create a runtime bound to the given world query service.
    pub fn new(view: Arc<dyn WorldView>, config: &RuntimeConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldLink::new(view.clone()));
        world.insert_resource(config.clone());

        let mut schedule = Schedule::default();
        schedule.add_systems(shift_light_colors);

        MapRuntime {
            world,
            schedule,
            view,
            kinds: FxHashMap::default(),
            order: Vec::new(),
            restore_color: config.restore_color,
        }
    }

    /// Create and bind a new controller, returning its handle.
    ///
    /// The backing world object is created first; if that fails, nothing is
    /// registered and no live state has been touched. If binding fails, the
    /// placed object is rolled back before the error is returned.
    pub fn spawn(
        &mut self,
        kind: ObjectKind,
        entry: Option<&SchematicEntry>,
        position: Vec3,
    ) -> Result<ControllerHandle, MapError> {
        if let Some(entry) = entry
            && entry.kind() != kind
        {
            return Err(MapError::EntryMismatch {
                requested: kind,
                found: entry.kind(),
            });
        }

        let object = self
            .view
            .place_object(kind, position)
            .map_err(MapError::SpawnFailed)?;
        let placement = Placement { object, position };

        let spawned = match kind {
            ObjectKind::Door => {
                let entry = match entry {
                    Some(SchematicEntry::Door(e)) => Some(e),
                    _ => None,
                };
                bind_and_insert(&mut self.world, self.view.as_ref(), Door::new(), entry, placement)
            }
            ObjectKind::Workstation => {
                let entry = match entry {
                    Some(SchematicEntry::Workstation(e)) => Some(e),
                    _ => None,
                };
                bind_and_insert(
                    &mut self.world,
                    self.view.as_ref(),
                    Workstation::new(),
                    entry,
                    placement,
                )
            }
            ObjectKind::ItemSpawnPoint => {
                let entry = match entry {
                    Some(SchematicEntry::ItemSpawnPoint(e)) => Some(e),
                    _ => None,
                };
                bind_and_insert(
                    &mut self.world,
                    self.view.as_ref(),
                    ItemSpawnPoint::new(),
                    entry,
                    placement,
                )
            }
            ObjectKind::PlayerSpawnPoint => {
                let entry = match entry {
                    Some(SchematicEntry::PlayerSpawnPoint(e)) => Some(e),
                    _ => None,
                };
                bind_and_insert(
                    &mut self.world,
                    self.view.as_ref(),
                    PlayerSpawnPoint::new(),
                    entry,
                    placement,
                )
            }
            ObjectKind::LightRegion => {
                let entry = match entry {
                    Some(SchematicEntry::LightRegion(e)) => Some(e),
                    _ => None,
                };
                bind_and_insert(
                    &mut self.world,
                    self.view.as_ref(),
                    LightRegion::new(self.restore_color),
                    entry,
                    placement,
                )
            }
        };

        let entity = match spawned {
            Ok(entity) => entity,
            Err(err) => {
                self.view.remove_object(object);
                return Err(err);
            }
        };

        let handle = ControllerHandle(entity);
        self.kinds.insert(handle, kind);
        self.order.push(handle);
        info!("spawned {} controller {:?}", kind, handle);
        Ok(handle)
    }

    /// Spawn a controller for every entry of a schematic.
    ///
    /// All-or-nothing: if any entry fails, every controller spawned so far
    /// is removed again and the error is returned.
    pub fn spawn_schematic(
        &mut self,
        schematic: &MapSchematic,
    ) -> Result<Vec<ControllerHandle>, MapError> {
        let mut handles = Vec::with_capacity(schematic.len());
        for entry in schematic.entries() {
            match self.spawn(entry.kind(), Some(&entry), entry.position()) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!(
                        "spawning schematic '{}' failed ({}), rolling back {} controller(s)",
                        schematic.name,
                        err,
                        handles.len()
                    );
                    for handle in handles.into_iter().rev() {
                        let _ = self.remove(handle);
                    }
                    return Err(err);
                }
            }
        }
        info!(
            "spawned schematic '{}': {} controller(s)",
            schematic.name,
            handles.len()
        );
        Ok(handles)
    }

    /// Unbind and discard a controller.
    ///
    /// An unknown handle is reported as [`MapError::UnknownHandle`]; removal
    /// is often requested speculatively, so this is a status, not a fault.
    pub fn remove(&mut self, handle: ControllerHandle) -> Result<(), MapError> {
        let Some(kind) = self.kinds.remove(&handle) else {
            return Err(MapError::UnknownHandle(handle));
        };
        self.teardown(handle, kind);
        self.order.retain(|h| *h != handle);
        info!("removed {} controller {:?}", kind, handle);
        Ok(())
    }

    /// Tick every registered controller once.
    ///
    /// Advances the shared clock by `dt`, then runs the tick schedule.
    /// Iteration order is stable within a tick; controllers are independent.
    pub fn tick_all(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    /// Unbind and discard every controller. Required at session end so no
    /// live entity is left with a dangling override.
    pub fn clear(&mut self) {
        let handles: Vec<ControllerHandle> = self.order.drain(..).collect();
        for handle in &handles {
            if let Some(kind) = self.kinds.remove(handle) {
                self.teardown(*handle, kind);
            }
        }
        info!("cleared {} controller(s)", handles.len());
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a handle is currently registered.
    pub fn contains(&self, handle: ControllerHandle) -> bool {
        self.kinds.contains_key(&handle)
    }

    /// Kind of the controller behind a handle, if registered.
    pub fn kind_of(&self, handle: ControllerHandle) -> Option<ObjectKind> {
        self.kinds.get(&handle).copied()
    }

    /// Registered handles in registration order.
    pub fn handles(&self) -> &[ControllerHandle] {
        &self.order
    }

    /// The ECS world the controllers live in, for inspection.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Borrow the light region controller behind a handle, if that is its
    /// kind.
    pub fn light_region(&self, handle: ControllerHandle) -> Option<&LightRegion> {
        self.world.get::<LightRegion>(handle.0)
    }

    fn teardown(&mut self, handle: ControllerHandle, kind: ObjectKind) {
        let entity = handle.0;
        match kind {
            ObjectKind::Door => {
                if let Some(mut c) = self.world.get_mut::<Door>(entity) {
                    c.unbind(self.view.as_ref());
                }
            }
            ObjectKind::Workstation => {
                if let Some(mut c) = self.world.get_mut::<Workstation>(entity) {
                    c.unbind(self.view.as_ref());
                }
            }
            ObjectKind::ItemSpawnPoint => {
                if let Some(mut c) = self.world.get_mut::<ItemSpawnPoint>(entity) {
                    c.unbind(self.view.as_ref());
                }
            }
            ObjectKind::PlayerSpawnPoint => {
                if let Some(mut c) = self.world.get_mut::<PlayerSpawnPoint>(entity) {
                    c.unbind(self.view.as_ref());
                }
            }
            ObjectKind::LightRegion => {
                if let Some(mut c) = self.world.get_mut::<LightRegion>(entity) {
                    c.unbind(self.view.as_ref());
                }
            }
        }
        if let Some(placement) = self.world.get::<Placement>(entity) {
            let object = placement.object;
            self.view.remove_object(object);
        }
        self.world.despawn(entity);
    }
}

/// Bind a freshly constructed controller and insert it with its placement.
fn bind_and_insert<C>(
    world: &mut World,
    view: &dyn WorldView,
    mut controller: C,
    entry: Option<&C::Entry>,
    placement: Placement,
) -> Result<Entity, MapError>
where
    C: Controller + Component,
{
    controller.bind(entry, placement.position, view)?;
    Ok(world.spawn((placement, controller)).id())
}
