//! Runtime map-customization core.
//!
//! Operators describe a map's editable furniture (doors, workstations,
//! item/player spawn points, and ambient-light regions) as serializable
//! schematic data. This crate takes such a schematic and spawns, ticks, and
//! tears down the matching live controllers inside a running simulation:
//!
//! 1. [`schematic`] records are handed to the [`registry::MapRuntime`]
//! 2. each entry becomes a bound controller ([`components`]) that locates
//!    the live state it must influence through the injected [`world`] query
//!    service
//! 3. the host loop calls `tick_all` once per frame, and the [`systems`]
//!    push recomputed state (hue-shifted light colors) into the world
//! 4. removal restores every overridden entity to its documented default
//!
//! The hosting simulation itself (scene graph, renderer, persistence,
//! command layer) stays behind the [`world::WorldView`] trait.

pub mod color;
pub mod components;
pub mod error;
pub mod registry;
pub mod resources;
pub mod schematic;
pub mod systems;
pub mod world;
