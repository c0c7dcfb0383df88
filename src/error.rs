//! Error taxonomy for spawn, removal, and binding operations.
//!
//! Resolution misses during binding are not errors: a controller that finds
//! nothing to affect simply binds empty and runs as a no-op. Everything that
//! does surface here carries an operator-readable reason string.

use crate::registry::ControllerHandle;
use crate::schematic::ObjectKind;

/// Failures reported by the controller registry and the binding layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// `bind` was called on a controller that is already bound. Rebinding
    /// would orphan the previous override set, so it fails loudly instead.
    #[error("controller is already bound")]
    AlreadyBound,

    /// `remove` was called with a handle the registry does not know.
    /// Non-fatal: removal is often requested speculatively during cleanup.
    #[error("no controller registered under {0:?}")]
    UnknownHandle(ControllerHandle),

    /// The world refused to create the backing object. Nothing was
    /// registered and no live state was touched.
    #[error("world object creation failed: {0}")]
    SpawnFailed(String),

    /// The schematic entry handed to `spawn` describes a different kind of
    /// object than the one requested.
    #[error("schematic entry describes a {found}, not a {requested}")]
    EntryMismatch {
        requested: ObjectKind,
        found: ObjectKind,
    },
}
