//! Overlap Tracking
//!
//! Counts foreign volumes currently intersecting a placement candidate.
//! The candidate is blocked while the count is above zero.

use super::layers::Layer;

/// Per-candidate count of intersecting foreign volumes.
///
/// Overlaps against the ground layer are never counted. The counter is
/// floored at zero, so unmatched exits cannot drive it negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapTracker {
    ground_layer: Layer,
    count: u32,
}

impl OverlapTracker {
    pub fn new(ground_layer: Layer) -> Self {
        Self {
            ground_layer,
            count: 0,
        }
    }

    /// Register a foreign volume entering the candidate.
    ///
    /// Returns `false` when the volume is on the ground layer and was ignored.
    pub fn on_enter(&mut self, foreign_layer: Layer) -> bool {
        if foreign_layer == self.ground_layer {
            return false;
        }
        self.count = self.count.saturating_add(1);
        true
    }

    /// Register a foreign volume leaving the candidate.
    pub fn on_exit(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    /// Layer-aware exit: ground exits are ignored the same way ground enters are.
    pub fn on_exit_from(&mut self, foreign_layer: Layer) {
        if foreign_layer != self.ground_layer {
            self.on_exit();
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.count > 0
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
