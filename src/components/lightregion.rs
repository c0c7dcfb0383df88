//! Ambient-light override controller.
//!
//! A [`LightRegion`] forces the lights of every room matching its
//! classification to a chosen color, optionally rotating that color's hue
//! over time. Resolution of the affected lights happens once at bind time
//! and is never re-queried; removal restores every bound light to the
//! documented default state.

use bevy_ecs::prelude::Component;
use log::debug;
use smallvec::SmallVec;

use crate::color::{Rgba, shift_hue};
use crate::components::{BindState, Controller};
use crate::error::MapError;
use crate::schematic::{LightRegionEntry, Vec3};
use crate::world::{LightRef, RoomKind, WorldView};

/// Controller overriding the light color of rooms of one classification.
///
/// `bound_lights` holds non-owning references to the affected live lights;
/// the controller owns only their override state while it is alive, not
/// their lifetime.
#[derive(Component, Debug, Clone)]
pub struct LightRegion {
    /// Target/base color of the affected rooms.
    pub room_color: Rgba,
    /// Hue rotation rate per second; `0` keeps the color static.
    pub shift_speed: f32,
    /// Apply the override only while the warhead sequence is active.
    pub only_warhead_light: bool,
    /// Classification of affected rooms; `Unknown` means inferred at bind.
    pub room_kind: RoomKind,
    /// Color currently pushed to the bound lights. Derived, never persisted.
    pub current_color: Rgba,
    /// Default color restored at unbind.
    restore_color: Rgba,
    bound_lights: SmallVec<[LightRef; 4]>,
    state: BindState,
}

impl LightRegion {
    /// Create an unbound controller that will restore lights to
    /// `restore_color` on removal.
    pub fn new(restore_color: Rgba) -> Self {
        LightRegion {
            room_color: Rgba::RED,
            shift_speed: 0.0,
            only_warhead_light: false,
            room_kind: RoomKind::Unknown,
            current_color: Rgba::RED,
            restore_color,
            bound_lights: SmallVec::new(),
            state: BindState::Unbound,
        }
    }

    /// The lights currently overridden by this controller.
    pub fn bound_lights(&self) -> &[LightRef] {
        &self.bound_lights
    }

    fn override_enabled(&self) -> bool {
        !self.only_warhead_light
    }

    /// Collect the lights this controller affects, per classification.
    ///
    /// The surface zone exists exactly once by convention and its light is
    /// not parented under the room, so it is found by scanning all live
    /// lights and taking the first whose containing room is the surface.
    /// No tie-break is defined if a map ever has several surface lights;
    /// first-in-scan-order wins.
    fn resolve_lights(&mut self, world: &dyn WorldView) {
        if self.room_kind == RoomKind::Surface {
            for light in world.all_light_controllers() {
                let on_surface = world
                    .room_of_light(light)
                    .map(|room| world.room_kind(room) == RoomKind::Surface)
                    .unwrap_or(false);
                if on_surface {
                    self.bound_lights.push(light);
                    break;
                }
            }
            return;
        }

        for room in world.rooms_of_kind(self.room_kind) {
            match world.light_controller_in(room) {
                Some(light) => self.bound_lights.push(light),
                // rooms without a light controller are skipped, not errors
                None => debug!("room {:?} has no light controller, skipping", room),
            }
        }
    }
}

impl Controller for LightRegion {
    type Entry = LightRegionEntry;

    fn bind(
        &mut self,
        entry: Option<&LightRegionEntry>,
        position: Vec3,
        world: &dyn WorldView,
    ) -> Result<(), MapError> {
        if self.state != BindState::Unbound {
            return Err(MapError::AlreadyBound);
        }

        if let Some(entry) = entry {
            self.room_color = entry.color;
            self.shift_speed = entry.shift_speed;
            self.only_warhead_light = entry.only_warhead_light;
            self.room_kind = entry.room_kind;
        } else {
            // manual placement: classify by whichever room we were placed in
            self.room_kind = match world.room_at(position) {
                Some(room) => world.room_kind(room),
                None => RoomKind::Unknown,
            };
        }

        self.current_color = self.room_color;
        self.resolve_lights(world);

        let enabled = self.override_enabled();
        for &light in &self.bound_lights {
            world.set_light_override(light, self.current_color, enabled);
        }

        debug!(
            "light region bound to {} {} light(s)",
            self.bound_lights.len(),
            self.room_kind,
        );
        self.state = BindState::Bound;
        Ok(())
    }

    fn tick(&mut self, dt: f32, world: &dyn WorldView) {
        // a static color never needs recomputing or re-pushing
        if self.state != BindState::Bound
            || self.shift_speed == 0.0
            || self.bound_lights.is_empty()
        {
            return;
        }

        self.current_color = shift_hue(self.current_color, self.shift_speed * dt);
        let enabled = self.override_enabled();
        for &light in &self.bound_lights {
            world.set_light_override(light, self.current_color, enabled);
        }
    }

    fn unbind(&mut self, world: &dyn WorldView) {
        if self.state != BindState::Bound {
            return;
        }
        for &light in &self.bound_lights {
            world.set_light_override(light, self.restore_color, false);
        }
        self.bound_lights.clear();
        self.state = BindState::Released;
    }

    fn state(&self) -> BindState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::memory::{InMemoryWorld, LightState};

    fn entry(kind: RoomKind, shift_speed: f32) -> LightRegionEntry {
        LightRegionEntry {
            color: Rgba::new(255, 0, 0, 255),
            shift_speed,
            only_warhead_light: false,
            room_kind: kind,
            ..LightRegionEntry::default()
        }
    }

    fn room_box() -> (Vec3, Vec3) {
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_bind_pushes_initial_override() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Intercom, min, max);
        let light = world.add_light(room);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Intercom, 0.0)), Vec3::ZERO, &world)
            .unwrap();

        assert_eq!(region.bound_lights(), &[light]);
        assert_eq!(
            world.light_state(light),
            LightState {
                color: Rgba::RED,
                enabled: true
            }
        );
    }

    #[test]
    fn test_only_warhead_light_binds_disabled() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Warhead, min, max);
        let light = world.add_light(room);

        let mut region = LightRegion::new(Rgba::WHITE);
        let mut e = entry(RoomKind::Warhead, 0.0);
        e.only_warhead_light = true;
        region.bind(Some(&e), Vec3::ZERO, &world).unwrap();

        assert!(!world.light_state(light).enabled);
        assert_eq!(world.light_state(light).color, Rgba::RED);
    }

    #[test]
    fn test_rebind_is_rejected() {
        let world = InMemoryWorld::new();
        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Intercom, 0.0)), Vec3::ZERO, &world)
            .unwrap();
        let err = region
            .bind(Some(&entry(RoomKind::Intercom, 0.0)), Vec3::ZERO, &world)
            .unwrap_err();
        assert_eq!(err, MapError::AlreadyBound);
    }

    #[test]
    fn test_bind_without_entry_infers_room_kind() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Checkpoint, min, max);
        let light = world.add_light(room);

        let mut inferred = LightRegion::new(Rgba::WHITE);
        inferred.bind(None, Vec3::new(5.0, 5.0, 5.0), &world).unwrap();

        assert_eq!(inferred.room_kind, RoomKind::Checkpoint);
        assert_eq!(inferred.bound_lights(), &[light]);

        // equivalent to binding with an explicit entry of the same kind
        let mut explicit = LightRegion::new(Rgba::WHITE);
        let mut e = entry(RoomKind::Checkpoint, 0.0);
        e.color = Rgba::RED;
        explicit.bind(Some(&e), Vec3::ZERO, &world).unwrap();
        assert_eq!(explicit.bound_lights(), inferred.bound_lights());
    }

    #[test]
    fn test_bind_outside_any_room_stays_unknown() {
        let world = InMemoryWorld::new();
        let mut region = LightRegion::new(Rgba::WHITE);
        region.bind(None, Vec3::new(99.0, 99.0, 99.0), &world).unwrap();
        assert_eq!(region.room_kind, RoomKind::Unknown);
        assert!(region.bound_lights().is_empty());
    }

    #[test]
    fn test_partial_binding_tolerates_empty_world() {
        let world = InMemoryWorld::new();
        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Storage, 1.0)), Vec3::ZERO, &world)
            .unwrap();

        assert!(region.bound_lights().is_empty());
        assert!(region.is_bound());

        let before = world.override_pushes();
        region.tick(1.0, &world);
        region.unbind(&world);
        assert_eq!(world.override_pushes(), before);
    }

    #[test]
    fn test_rooms_without_lights_are_skipped() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let with_light = world.add_room(RoomKind::Storage, min, max);
        let _bare = world.add_room(RoomKind::Storage, min, max);
        let light = world.add_light(with_light);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Storage, 0.0)), Vec3::ZERO, &world)
            .unwrap();
        assert_eq!(region.bound_lights(), &[light]);
    }

    #[test]
    fn test_surface_light_found_by_scan() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let interior = world.add_room(RoomKind::Intercom, min, max);
        let surface = world.add_room(RoomKind::Surface, min, max);
        let _interior_light = world.add_light(interior);
        let surface_light = world.add_light(surface);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Surface, 0.0)), Vec3::ZERO, &world)
            .unwrap();
        assert_eq!(region.bound_lights(), &[surface_light]);
    }

    #[test]
    fn test_static_controller_never_repushes() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Intercom, min, max);
        let _light = world.add_light(room);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Intercom, 0.0)), Vec3::ZERO, &world)
            .unwrap();

        let after_bind = world.override_pushes();
        let color = region.current_color;
        for _ in 0..10 {
            region.tick(0.25, &world);
        }
        assert_eq!(world.override_pushes(), after_bind);
        assert_eq!(region.current_color, color);
    }

    #[test]
    fn test_tick_rotates_hue_and_pushes() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Intercom, min, max);
        let light = world.add_light(room);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Intercom, 0.1)), Vec3::ZERO, &world)
            .unwrap();
        region.tick(1.0, &world);

        // red rotated a tenth of the hue circle
        let expected = Rgba::new(255, 153, 0, 255);
        assert_eq!(region.current_color, expected);
        assert_eq!(world.light_state(light).color, expected);
        assert!(world.light_state(light).enabled);
    }

    #[test]
    fn test_unbind_restores_default_exactly_once() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Intercom, min, max);
        let light = world.add_light(room);

        let restore = Rgba::new(10, 20, 30, 255);
        let mut region = LightRegion::new(restore);
        region
            .bind(Some(&entry(RoomKind::Intercom, 0.5)), Vec3::ZERO, &world)
            .unwrap();
        region.tick(1.0, &world);

        region.unbind(&world);
        let after_first = world.light_state(light);
        assert_eq!(
            after_first,
            LightState {
                color: restore,
                enabled: false
            }
        );
        let pushes = world.override_pushes();

        // second unbind: no further mutation observable
        region.unbind(&world);
        assert_eq!(world.light_state(light), after_first);
        assert_eq!(world.override_pushes(), pushes);
        assert_eq!(region.state(), BindState::Released);
    }

    #[test]
    fn test_tick_after_unbind_is_inert() {
        let world = InMemoryWorld::new();
        let (min, max) = room_box();
        let room = world.add_room(RoomKind::Intercom, min, max);
        let _light = world.add_light(room);

        let mut region = LightRegion::new(Rgba::WHITE);
        region
            .bind(Some(&entry(RoomKind::Intercom, 1.0)), Vec3::ZERO, &world)
            .unwrap();
        region.unbind(&world);

        let pushes = world.override_pushes();
        region.tick(1.0, &world);
        assert_eq!(world.override_pushes(), pushes);
    }
}
