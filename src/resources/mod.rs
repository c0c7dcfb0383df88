//! ECS resources injected into the runtime world.
//!
//! Overview
//! - `worldtime` – simulation time and per-tick delta
//! - `worldlink` – injected handle to the hosting world's query service
//! - `runtimeconfig` – operator settings loaded from an INI file
pub mod runtimeconfig;
pub mod worldlink;
pub mod worldtime;
