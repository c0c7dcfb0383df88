//! Injected handle to the hosting world.
//!
//! The query service is passed in at registry construction and exposed to
//! tick systems as this resource: an explicit, per-world reference rather
//! than a process-wide singleton, so parallel test fixtures each get their
//! own world.

use bevy_ecs::prelude::Resource;
use std::sync::Arc;

use crate::world::WorldView;

/// Resource wrapping the world query service.
#[derive(Resource, Clone)]
pub struct WorldLink {
    view: Arc<dyn WorldView>,
}

impl WorldLink {
    pub fn new(view: Arc<dyn WorldView>) -> Self {
        WorldLink { view }
    }

    /// Borrow the query service.
    pub fn view(&self) -> &dyn WorldView {
        self.view.as_ref()
    }
}
