//! Serializable schematic records describing a map's editable objects.
//!
//! A [`MapSchematic`] is the persisted description of one customized map:
//! a name plus one list per placeable object kind. Entries are plain value
//! data: they carry no behavior and are immutable once loaded; edits happen
//! by replacing the whole container through a new load/save cycle, never by
//! mutating an entry a live controller was bound from.
//!
//! Persistence itself (file watching, YAML/JSON on disk) belongs to the
//! hosting layer; this module only defines the records and their serde
//! contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgba;
use crate::world::RoomKind;

/// Name given to a schematic that has not been saved under a real name yet.
pub const UNSET_NAME: &str = "None";

/// A position, rotation, or scale triple in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::ZERO
    }
}

/// The placeable object kinds a schematic can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Door,
    Workstation,
    ItemSpawnPoint,
    PlayerSpawnPoint,
    LightRegion,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Door => "door",
            ObjectKind::Workstation => "workstation",
            ObjectKind::ItemSpawnPoint => "item spawn point",
            ObjectKind::PlayerSpawnPoint => "player spawn point",
            ObjectKind::LightRegion => "light region",
        };
        f.write_str(name)
    }
}

/// Door model variants available to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorKind {
    LightContainment,
    HeavyContainment,
    Entrance,
}

/// Roles a player spawn point can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    ClassD,
    Scientist,
    FacilityGuard,
    NineTailedFox,
    ChaosInsurgency,
    Tutorial,
}

/// A placeable door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorEntry {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub door_kind: DoorKind,
    pub is_open: bool,
    pub is_locked: bool,
}

impl Default for DoorEntry {
    fn default() -> Self {
        DoorEntry {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            door_kind: DoorKind::LightContainment,
            is_open: false,
            is_locked: false,
        }
    }
}

/// A placeable workstation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkstationEntry {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for WorkstationEntry {
    fn default() -> Self {
        WorkstationEntry {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A point where an item may appear at round start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawnPointEntry {
    /// Item identifier understood by the hosting game.
    pub item: String,
    /// Chance, in percent, that the item actually spawns.
    pub spawn_chance: u8,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for ItemSpawnPointEntry {
    fn default() -> Self {
        ItemSpawnPointEntry {
            item: String::new(),
            spawn_chance: 100,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// A point where players of a given role spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawnPointEntry {
    pub role: PlayerRole,
    pub position: Vec3,
}

impl Default for PlayerSpawnPointEntry {
    fn default() -> Self {
        PlayerSpawnPointEntry {
            role: PlayerRole::ClassD,
            position: Vec3::ZERO,
        }
    }
}

/// An ambient-light override region.
///
/// `room_kind` selects which live rooms are affected; [`RoomKind::Unknown`]
/// means "infer from wherever this object ends up placed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRegionEntry {
    pub position: Vec3,
    pub color: Rgba,
    /// Hue rotation rate per second; `0` keeps the color static.
    pub shift_speed: f32,
    /// Apply the override only while the warhead sequence is active.
    pub only_warhead_light: bool,
    pub room_kind: RoomKind,
}

impl Default for LightRegionEntry {
    fn default() -> Self {
        LightRegionEntry {
            position: Vec3::ZERO,
            color: Rgba::RED,
            shift_speed: 0.0,
            only_warhead_light: false,
            room_kind: RoomKind::Unknown,
        }
    }
}

/// One schematic entry of any kind, as handed to the registry at spawn time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchematicEntry {
    Door(DoorEntry),
    Workstation(WorkstationEntry),
    ItemSpawnPoint(ItemSpawnPointEntry),
    PlayerSpawnPoint(PlayerSpawnPointEntry),
    LightRegion(LightRegionEntry),
}

impl SchematicEntry {
    /// The object kind this entry describes.
    pub fn kind(&self) -> ObjectKind {
        match self {
            SchematicEntry::Door(_) => ObjectKind::Door,
            SchematicEntry::Workstation(_) => ObjectKind::Workstation,
            SchematicEntry::ItemSpawnPoint(_) => ObjectKind::ItemSpawnPoint,
            SchematicEntry::PlayerSpawnPoint(_) => ObjectKind::PlayerSpawnPoint,
            SchematicEntry::LightRegion(_) => ObjectKind::LightRegion,
        }
    }

    /// Where the described object is placed.
    pub fn position(&self) -> Vec3 {
        match self {
            SchematicEntry::Door(e) => e.position,
            SchematicEntry::Workstation(e) => e.position,
            SchematicEntry::ItemSpawnPoint(e) => e.position,
            SchematicEntry::PlayerSpawnPoint(e) => e.position,
            SchematicEntry::LightRegion(e) => e.position,
        }
    }
}

/// Named container aggregating every editable object of one map.
///
/// Insertion order within each list carries no runtime meaning; controllers
/// spawned from the entries are independent of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSchematic {
    pub name: String,
    pub doors: Vec<DoorEntry>,
    pub workstations: Vec<WorkstationEntry>,
    pub item_spawn_points: Vec<ItemSpawnPointEntry>,
    pub player_spawn_points: Vec<PlayerSpawnPointEntry>,
    pub light_regions: Vec<LightRegionEntry>,
}

impl Default for MapSchematic {
    fn default() -> Self {
        MapSchematic {
            name: UNSET_NAME.to_string(),
            doors: Vec::new(),
            workstations: Vec::new(),
            item_spawn_points: Vec::new(),
            player_spawn_points: Vec::new(),
            light_regions: Vec::new(),
        }
    }
}

impl MapSchematic {
    /// Create an empty schematic with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        MapSchematic {
            name: name.into(),
            ..MapSchematic::default()
        }
    }

    /// Whether this schematic still carries the unset-name sentinel.
    pub fn is_unnamed(&self) -> bool {
        self.name == UNSET_NAME
    }

    /// Total number of entries across every kind.
    pub fn len(&self) -> usize {
        self.doors.len()
            + self.workstations.len()
            + self.item_spawn_points.len()
            + self.player_spawn_points.len()
            + self.light_regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten every entry into the [`SchematicEntry`] form used at spawn
    /// time, kind by kind in declaration order.
    pub fn entries(&self) -> Vec<SchematicEntry> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.doors.iter().cloned().map(SchematicEntry::Door));
        out.extend(
            self.workstations
                .iter()
                .cloned()
                .map(SchematicEntry::Workstation),
        );
        out.extend(
            self.item_spawn_points
                .iter()
                .cloned()
                .map(SchematicEntry::ItemSpawnPoint),
        );
        out.extend(
            self.player_spawn_points
                .iter()
                .cloned()
                .map(SchematicEntry::PlayerSpawnPoint),
        );
        out.extend(
            self.light_regions
                .iter()
                .cloned()
                .map(SchematicEntry::LightRegion),
        );
        out
    }
}
