//! Light synchronization system.
//!
//! Runs once per tick over every [`LightRegion`] controller, advancing its
//! hue rotation and pushing the recomputed color through the injected
//! [`WorldLink`]. Static regions (zero shift speed) and regions with nothing
//! bound are skipped without touching the world.

use bevy_ecs::prelude::*;

use crate::components::Controller;
use crate::components::lightregion::LightRegion;
use crate::resources::worldlink::WorldLink;
use crate::resources::worldtime::WorldTime;

/// Advance every live light region by the current tick delta.
pub fn shift_light_colors(
    world_time: Res<WorldTime>,
    link: Res<WorldLink>,
    mut regions: Query<&mut LightRegion>,
) {
    let dt = world_time.delta.max(0.0);
    for mut region in regions.iter_mut() {
        region.tick(dt, link.view());
    }
}
