//! Structure Instances
//!
//! Runtime representation of a candidate (preview) or a committed structure.

use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::game::catalog::StructureDefinition;
use crate::handle::InstanceId;
use crate::physics::{Aabb, Layer, OverlapTracker};
use crate::render::VisualState;

/// Position + orientation of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Yaw of `steps` increments of `step_degrees` about +Y.
///
/// Positive steps turn clockwise seen from above, i.e. a negative angle in
/// the right-handed Y-up frame.
pub fn yaw_rotation(step_degrees: f32, steps: i32) -> Quat {
    Quat::from_rotation_y(-(step_degrees.to_radians() * steps as f32))
}

/// Overlap tracking only applies while the instance is a candidate.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Candidate { overlap: OverlapTracker },
    Committed,
}

/// A candidate or placed structure in the scene.
#[derive(Debug, Clone)]
pub struct StructureInstance {
    id: InstanceId,
    definition: Arc<StructureDefinition>,
    pose: Pose,
    visual_state: VisualState,
    phase: Phase,
}

impl StructureInstance {
    /// New uncommitted candidate with a zeroed overlap counter.
    pub fn candidate(
        id: InstanceId,
        definition: Arc<StructureDefinition>,
        pose: Pose,
        ground_layer: Layer,
    ) -> Self {
        Self {
            id,
            definition,
            pose,
            visual_state: VisualState::Invalid,
            phase: Phase::Candidate {
                overlap: OverlapTracker::new(ground_layer),
            },
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn definition(&self) -> &Arc<StructureDefinition> {
        &self.definition
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn set_position(&mut self, position: Vec3) -> bool {
        if self.pose.position == position {
            return false;
        }
        self.pose.position = position;
        true
    }

    /// Rotate by `steps` yaw increments and return the new orientation.
    pub fn rotate_yaw(&mut self, step_degrees: f32, steps: i32) -> Quat {
        let turned = yaw_rotation(step_degrees, steps) * self.pose.orientation;
        self.pose.orientation = turned.normalize();
        self.pose.orientation
    }

    pub fn visual_state(&self) -> VisualState {
        self.visual_state
    }

    /// Store a new visual state. Returns `true` when it actually changed.
    pub fn set_visual_state(&mut self, state: VisualState) -> bool {
        if self.visual_state == state {
            return false;
        }
        self.visual_state = state;
        true
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.phase, Phase::Committed)
    }

    pub fn is_flagged(&self) -> bool {
        self.visual_state == VisualState::DeleteFlagged
    }

    /// Overlap state of a candidate; committed instances are not tracked.
    pub fn overlap(&self) -> Option<&OverlapTracker> {
        match &self.phase {
            Phase::Candidate { overlap } => Some(overlap),
            Phase::Committed => None,
        }
    }

    pub fn overlap_mut(&mut self) -> Option<&mut OverlapTracker> {
        match &mut self.phase {
            Phase::Candidate { overlap } => Some(overlap),
            Phase::Committed => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.overlap().is_some_and(OverlapTracker::is_blocked)
    }

    /// Turn the candidate into a placed structure. Returns `false` if it already was one.
    pub fn commit(&mut self) -> bool {
        if self.is_committed() {
            return false;
        }
        self.phase = Phase::Committed;
        true
    }

    /// Collision volume at the current pose.
    pub fn bounds(&self) -> Aabb {
        self.definition.bounds_at(&self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{GROUND_LAYER, STRUCTURE_LAYER};
    use std::num::NonZeroU32;

    fn candidate() -> StructureInstance {
        let definition = Arc::new(StructureDefinition::new("box", Vec3::ONE, NonZeroU32::MIN));
        StructureInstance::candidate(InstanceId(1), definition, Pose::IDENTITY, GROUND_LAYER)
    }

    #[test]
    fn test_candidate_starts_clear_and_invalid() {
        let instance = candidate();
        assert!(!instance.is_committed());
        assert!(!instance.is_blocked());
        assert_eq!(instance.overlap().map(OverlapTracker::count), Some(0));
        assert_eq!(instance.visual_state(), VisualState::Invalid);
    }

    #[test]
    fn test_commit_drops_overlap_tracking() {
        let mut instance = candidate();
        instance.overlap_mut().unwrap().on_enter(STRUCTURE_LAYER);
        assert!(instance.is_blocked());

        assert!(instance.commit());
        assert!(!instance.commit());
        assert!(instance.overlap().is_none());
        assert!(!instance.is_blocked());
    }

    #[test]
    fn test_visual_state_change_detection() {
        let mut instance = candidate();
        assert!(instance.set_visual_state(VisualState::Valid));
        assert!(!instance.set_visual_state(VisualState::Valid));
        assert!(instance.set_visual_state(VisualState::DeleteFlagged));
        assert!(instance.is_flagged());
    }

    #[test]
    fn test_four_quarter_turns_return_to_start() {
        let mut instance = candidate();
        for _ in 0..4 {
            instance.rotate_yaw(90.0, 1);
        }
        assert!(instance.pose().orientation.abs_diff_eq(Quat::IDENTITY, 1e-5)
            || instance.pose().orientation.abs_diff_eq(-Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn test_clockwise_turns_forward_toward_positive_x() {
        // Seen from above with forward = -Z pointing up, clockwise swings it to +X.
        let forward = yaw_rotation(90.0, 1) * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));
        let back = yaw_rotation(90.0, -1) * Vec3::NEG_Z;
        assert!(back.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }
}
