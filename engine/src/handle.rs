//! Instance Handles
//!
//! Opaque identity shared between the builder and the external scene
//! collaborators (renderer, collision engine).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a structure instance in the scene.
///
/// Handles are never reused within a session, so a handle to a destroyed
/// instance can always be detected as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static_assertions::assert_eq_size!(InstanceId, u64);
static_assertions::assert_impl_all!(InstanceId: Copy, Eq, std::hash::Hash, Send, Sync);
