//! In-memory [`WorldView`] implementation.
//!
//! [`InMemoryWorld`] models just enough of a hosting simulation to exercise
//! the core: rooms as axis-aligned boxes with a classification, lights that
//! belong to rooms and remember the last override pushed onto them, and
//! placed objects with an alive flag. It also counts override pushes so
//! tests can assert that a static controller never re-pushes state.
//!
//! The `Mutex` exists only to make the type a well-behaved `Send + Sync`
//! collaborator; the core itself never calls in concurrently.

use std::sync::Mutex;

use crate::color::Rgba;
use crate::schematic::{ObjectKind, Vec3};
use crate::world::{LightRef, RoomKind, RoomRef, WorldObjectRef, WorldView};

/// Last override state observed on a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub color: Rgba,
    pub enabled: bool,
}

impl Default for LightState {
    fn default() -> Self {
        LightState {
            color: Rgba::WHITE,
            enabled: false,
        }
    }
}

struct RoomRecord {
    kind: RoomKind,
    min: Vec3,
    max: Vec3,
}

struct LightRecord {
    room: RoomRef,
    state: LightState,
}

struct ObjectRecord {
    #[allow(dead_code)]
    kind: ObjectKind,
    #[allow(dead_code)]
    position: Vec3,
    alive: bool,
}

#[derive(Default)]
struct Inner {
    rooms: Vec<RoomRecord>,
    lights: Vec<LightRecord>,
    objects: Vec<ObjectRecord>,
    override_pushes: u64,
    fail_placement: Option<(u32, String)>,
}

/// Scriptable in-memory world for tests and headless runs.
#[derive(Default)]
pub struct InMemoryWorld {
    inner: Mutex<Inner>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        InMemoryWorld::default()
    }

    /// Add a room of the given kind covering the `min..=max` box.
    pub fn add_room(&self, kind: RoomKind, min: Vec3, max: Vec3) -> RoomRef {
        let mut inner = self.inner.lock().unwrap();
        inner.rooms.push(RoomRecord { kind, min, max });
        RoomRef(inner.rooms.len() as u32 - 1)
    }

    /// Add a light controller parented under a room.
    pub fn add_light(&self, room: RoomRef) -> LightRef {
        let mut inner = self.inner.lock().unwrap();
        inner.lights.push(LightRecord {
            room,
            state: LightState::default(),
        });
        LightRef(inner.lights.len() as u32 - 1)
    }

    /// Current override state of a light.
    pub fn light_state(&self, light: LightRef) -> LightState {
        self.inner.lock().unwrap().lights[light.0 as usize].state
    }

    /// How many override pushes have been observed so far.
    pub fn override_pushes(&self) -> u64 {
        self.inner.lock().unwrap().override_pushes
    }

    /// Make the next `place_object` call fail with the given reason.
    pub fn fail_next_placement(&self, reason: impl Into<String>) {
        self.fail_placement_after(0, reason);
    }

    /// Let `successes` more placements succeed, then fail the one after.
    pub fn fail_placement_after(&self, successes: u32, reason: impl Into<String>) {
        self.inner.lock().unwrap().fail_placement = Some((successes, reason.into()));
    }

    /// Whether a placed object is still alive.
    pub fn object_alive(&self, object: WorldObjectRef) -> bool {
        self.inner
            .lock()
            .unwrap()
            .objects
            .get(object.0 as usize)
            .map(|o| o.alive)
            .unwrap_or(false)
    }

    /// Number of currently alive placed objects.
    pub fn alive_objects(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .objects
            .iter()
            .filter(|o| o.alive)
            .count()
    }
}

fn contains(min: Vec3, max: Vec3, p: Vec3) -> bool {
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y && p.z >= min.z && p.z <= max.z
}

impl WorldView for InMemoryWorld {
    fn rooms_of_kind(&self, kind: RoomKind) -> Vec<RoomRef> {
        let inner = self.inner.lock().unwrap();
        inner
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind == kind)
            .map(|(i, _)| RoomRef(i as u32))
            .collect()
    }

    fn room_at(&self, position: Vec3) -> Option<RoomRef> {
        let inner = self.inner.lock().unwrap();
        inner
            .rooms
            .iter()
            .position(|r| contains(r.min, r.max, position))
            .map(|i| RoomRef(i as u32))
    }

    fn room_kind(&self, room: RoomRef) -> RoomKind {
        let inner = self.inner.lock().unwrap();
        inner
            .rooms
            .get(room.0 as usize)
            .map(|r| r.kind)
            .unwrap_or(RoomKind::Unknown)
    }

    fn room_of_light(&self, light: LightRef) -> Option<RoomRef> {
        let inner = self.inner.lock().unwrap();
        inner.lights.get(light.0 as usize).map(|l| l.room)
    }

    fn light_controller_in(&self, room: RoomRef) -> Option<LightRef> {
        let inner = self.inner.lock().unwrap();
        inner
            .lights
            .iter()
            .position(|l| l.room == room)
            .map(|i| LightRef(i as u32))
    }

    fn all_light_controllers(&self) -> Vec<LightRef> {
        let inner = self.inner.lock().unwrap();
        (0..inner.lights.len() as u32).map(LightRef).collect()
    }

    fn set_light_override(&self, light: LightRef, color: Rgba, enabled: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.override_pushes += 1;
        if let Some(record) = inner.lights.get_mut(light.0 as usize) {
            record.state = LightState { color, enabled };
        }
    }

    fn place_object(&self, kind: ObjectKind, position: Vec3) -> Result<WorldObjectRef, String> {
        let mut inner = self.inner.lock().unwrap();
        match inner.fail_placement.take() {
            Some((0, reason)) => return Err(reason),
            Some((n, reason)) => inner.fail_placement = Some((n - 1, reason)),
            None => {}
        }
        inner.objects.push(ObjectRecord {
            kind,
            position,
            alive: true,
        });
        Ok(WorldObjectRef(inner.objects.len() as u32 - 1))
    }

    fn remove_object(&self, object: WorldObjectRef) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.objects.get_mut(object.0 as usize) {
            record.alive = false;
        }
    }
}
