//! World query surface the core binds against.
//!
//! The core never touches a concrete scene graph. Everything it needs from
//! the hosting simulation (room lookup by classification, containment
//! queries, locating the light controller inside a room, pushing overrides,
//! and creating/removing placed objects) goes through the [`WorldView`]
//! trait. The host implements it over its live world; tests and headless
//! runs use [`memory::InMemoryWorld`].
//!
//! Submodules:
//! - [`memory`] – self-contained in-memory implementation with probes

pub mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgba;
use crate::schematic::{ObjectKind, Vec3};

/// Classification of a room in the hosting simulation.
///
/// `Unknown` is the sentinel meaning "not resolved yet; infer from
/// placement". `Surface` is special: by convention the map has exactly one
/// surface zone, and its light controller is not parented under the room,
/// so it is located by scanning all live light controllers instead of
/// querying within the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Unknown,
    Surface,
    Intercom,
    Warhead,
    Checkpoint,
    Storage,
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomKind::Unknown => "unknown",
            RoomKind::Surface => "surface",
            RoomKind::Intercom => "intercom",
            RoomKind::Warhead => "warhead",
            RoomKind::Checkpoint => "checkpoint",
            RoomKind::Storage => "storage",
        };
        f.write_str(name)
    }
}

/// Opaque reference to a live room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomRef(pub u32);

/// Opaque reference to a live light-emitting sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightRef(pub u32);

/// Opaque reference to an object the core asked the world to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldObjectRef(pub u32);

/// Queries and effects the core needs from the hosting simulation.
///
/// All methods are synchronous and non-blocking; the core calls them from
/// the single tick thread only. An empty result from any lookup is valid;
/// binding tolerates partially resolvable worlds.
pub trait WorldView: Send + Sync {
    /// All live rooms of the given classification.
    fn rooms_of_kind(&self, kind: RoomKind) -> Vec<RoomRef>;

    /// The room containing a world-space point, if any.
    fn room_at(&self, position: Vec3) -> Option<RoomRef>;

    /// Classification of a live room.
    fn room_kind(&self, room: RoomRef) -> RoomKind;

    /// The room a light controller currently sits in, if any.
    fn room_of_light(&self, light: LightRef) -> Option<RoomRef>;

    /// The light controller within a room, if the room has one.
    fn light_controller_in(&self, room: RoomRef) -> Option<LightRef>;

    /// Every live light controller, in a stable order. Used only to locate
    /// the single-instance-by-convention surface light.
    fn all_light_controllers(&self) -> Vec<LightRef>;

    /// Push an override onto a light: forced color plus an enable flag.
    /// Fire-and-forget; failures are the host's concern.
    fn set_light_override(&self, light: LightRef, color: Rgba, enabled: bool);

    /// Create the placed world object backing a controller. This is the only
    /// spawn step that may fail; the error string reaches the operator.
    fn place_object(&self, kind: ObjectKind, position: Vec3) -> Result<WorldObjectRef, String>;

    /// Remove a previously placed world object. Removing an already-removed
    /// object is a no-op.
    fn remove_object(&self, object: WorldObjectRef);
}
