//! Per-tick systems run by the controller registry's schedule.
//!
//! Overview
//! - `time` – advances the shared simulation clock
//! - `lightshift` – hue-rotates every live light region and pushes the
//!   recomputed color into the hosting world
pub mod lightshift;
pub mod time;
