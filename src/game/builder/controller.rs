//! Placement Controller
//!
//! The build/delete state machine. Each fixed tick it consumes the latched
//! input, casts the aiming ray through the spatial query port, reads the
//! candidate's overlap state and issues visual feedback.
//!
//! ## Invariants
//! - At most one uncommitted candidate exists, and only in Build mode.
//! - At most one delete target exists, only in Delete mode, and it is always
//!   a committed structure. Only the target can carry `DeleteFlagged`.
//! - Latched input is consumed by exactly one tick, whether or not it had
//!   any effect. A confirm while blocked is discarded, not queued.
//! - Nothing here fails a tick: anomalies are logged and the tick carries on
//!   with a well-defined state.

use std::sync::Arc;

use glam::{Quat, Vec3};
use tracing::{debug, info, trace, warn};

use crate::game::builder::instance::{Pose, StructureInstance};
use crate::game::builder::mode::{BuildMode, BuildPhase, DeletePhase, PlacementState};
use crate::game::builder::observer::{
    ObserverRegistry, PlacementEvent, PlacementObserver, Subscription,
};
use crate::game::builder::scene::StructureScene;
use crate::game::catalog::{CatalogPort, DefinitionId, StructureDefinition};
use crate::game::config::BuilderConfig;
use crate::game::error::{PlacementError, PlacementResult};
use crate::handle::InstanceId;
use crate::input::{BuilderInput, InputLatch, TickInputs};
use crate::physics::{CollisionEventPort, Layer, OverlapTracker, Ray, RayHit, SpatialQueryPort};
use crate::render::{RenderFeedbackPort, VisualState};
use crate::world::snap_to_grid;

/// What a single tick changed in the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Candidate committed this tick
    pub committed: Option<InstanceId>,
    /// Structure destroyed this tick
    pub deleted: Option<InstanceId>,
    /// Mode after the tick, if it differs from the mode before it
    pub mode_changed: Option<BuildMode>,
}

/// Build/delete state machine for a single operator.
pub struct PlacementController {
    config: BuilderConfig,
    catalog: Box<dyn CatalogPort>,
    scene: StructureScene,
    mode: BuildMode,
    selected: Option<Arc<StructureDefinition>>,
    active_candidate: Option<InstanceId>,
    delete_target: Option<InstanceId>,
    /// Pose of the last commit; its orientation also tracks every rotation
    /// so the next candidate keeps the operator's facing.
    last_committed_pose: Pose,
    latch: InputLatch,
    observers: ObserverRegistry,
    ticks: u64,
}

impl PlacementController {
    /// Create a controller in `Build` mode with no candidate.
    ///
    /// `config.default_definition` is selected immediately when the catalog knows it.
    pub fn new(config: BuilderConfig, catalog: impl CatalogPort + 'static) -> Self {
        let selected = config.default_definition.as_ref().and_then(|id| {
            let definition = catalog.definition(id);
            if definition.is_none() {
                warn!(definition = %id, "default definition not in catalog");
            }
            definition
        });

        Self {
            config,
            catalog: Box::new(catalog),
            scene: StructureScene::new(),
            mode: BuildMode::Build,
            selected,
            active_candidate: None,
            delete_target: None,
            last_committed_pose: Pose::IDENTITY,
            latch: InputLatch::new(),
            observers: ObserverRegistry::new(),
            ticks: 0,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn active_candidate(&self) -> Option<InstanceId> {
        self.active_candidate
    }

    pub fn delete_target(&self) -> Option<InstanceId> {
        self.delete_target
    }

    pub fn selected_definition(&self) -> Option<&Arc<StructureDefinition>> {
        self.selected.as_ref()
    }

    pub fn last_committed_pose(&self) -> &Pose {
        &self.last_committed_pose
    }

    /// Orientation the next candidate spawns with.
    pub fn last_orientation(&self) -> Quat {
        self.last_committed_pose.orientation
    }

    pub fn scene(&self) -> &StructureScene {
        &self.scene
    }

    /// Mutable scene access for systems that remove structures on their own
    /// (destruction, scripted clears). Handles left dangling by such removals
    /// are dropped at the start of the next tick.
    pub fn scene_mut(&mut self) -> &mut StructureScene {
        &mut self.scene
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mode x sub-state summary.
    pub fn state(&self) -> PlacementState {
        match self.mode {
            BuildMode::Build => {
                let candidate = self.active_candidate.and_then(|id| self.scene.get(id));
                PlacementState::Build(match candidate {
                    None => BuildPhase::NoCandidate,
                    Some(c) if c.visual_state() == VisualState::Valid => BuildPhase::CandidateValid,
                    Some(_) => BuildPhase::CandidateInvalid,
                })
            }
            BuildMode::Delete => {
                let target = self.delete_target.and_then(|id| self.scene.get(id));
                PlacementState::Delete(match target {
                    None => DeletePhase::NoTarget,
                    Some(t) if t.is_flagged() => DeletePhase::TargetFlagged,
                    Some(_) => DeletePhase::TargetHovered,
                })
            }
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlacementObserver>) -> Subscription {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    /// Latch a debounced input event for the next tick.
    pub fn push_input(&mut self, input: BuilderInput) {
        trace!(?input, "latched input");
        self.latch.push(input);
    }

    /// Run one fixed step of the state machine.
    pub fn tick(
        &mut self,
        aim: &Ray,
        query: &dyn SpatialQueryPort,
        feedback: &mut dyn RenderFeedbackPort,
    ) -> TickReport {
        self.ticks += 1;
        let inputs = self.latch.take();
        let mut report = TickReport::default();

        self.revalidate_references();

        let mode_before = self.mode;
        for _ in 0..inputs.toggle_presses {
            self.toggle_mode(feedback);
        }
        if self.mode != mode_before {
            report.mode_changed = Some(self.mode);
        }

        if let Some(id) = &inputs.selection {
            if let Err(err) = self.select_definition(id, feedback) {
                warn!(error = %err, "selection ignored");
            }
        }

        match self.mode {
            BuildMode::Build => self.build_tick(aim, query, feedback, &inputs, &mut report),
            BuildMode::Delete => self.delete_tick(aim, query, feedback, &inputs, &mut report),
        }

        report
    }

    // ------------------------------------------------------------------
    // Mode and selection
    // ------------------------------------------------------------------

    fn toggle_mode(&mut self, feedback: &mut dyn RenderFeedbackPort) {
        let next = self.mode.toggled();

        // Leaving Delete: restore and drop the target before anything else.
        if self.mode == BuildMode::Delete {
            self.clear_delete_target(feedback);
        }
        // Entering Delete: the candidate must be gone before delete logic runs.
        if next == BuildMode::Delete {
            self.dispose_candidate(feedback);
        }

        self.mode = next;
        info!(mode = %next, "mode changed");
        self.observers.notify(&PlacementEvent::ModeChanged(next));
    }

    fn select_definition(
        &mut self,
        id: &DefinitionId,
        feedback: &mut dyn RenderFeedbackPort,
    ) -> PlacementResult<()> {
        let definition = self
            .catalog
            .definition(id)
            .ok_or_else(|| PlacementError::UnknownDefinition(id.clone()))?;

        if self.selected.as_ref().is_some_and(|current| current.id == definition.id) {
            return Ok(());
        }

        self.selected = Some(definition);
        if self.mode == BuildMode::Build {
            // Replaced by a fresh candidate in this tick's build step.
            self.dispose_candidate(feedback);
        }

        info!(definition = %id, "structure selected");
        self.observers.notify(&PlacementEvent::DefinitionSelected(id.clone()));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Build mode
    // ------------------------------------------------------------------

    fn build_tick(
        &mut self,
        aim: &Ray,
        query: &dyn SpatialQueryPort,
        feedback: &mut dyn RenderFeedbackPort,
        inputs: &TickInputs,
        report: &mut TickReport,
    ) {
        let Some(definition) = self.selected.clone() else {
            if inputs.confirm {
                debug!(
                    error = %PlacementError::NoActiveCandidate,
                    "confirm ignored, nothing selected"
                );
            }
            return;
        };

        let id = match self.active_candidate {
            Some(id) => id,
            None => self.spawn_candidate(definition.clone(), feedback),
        };

        let hit = query.cast(aim, self.config.max_ray_distance, self.config.buildable_mask);

        let Some(candidate) = self.scene.get_mut(id) else {
            warn!(error = %PlacementError::StaleReference(id), "candidate vanished mid-tick");
            self.active_candidate = None;
            return;
        };

        let mut moved = false;
        if let Some(RayHit { point, .. }) = hit {
            moved |= candidate.set_position(snap_to_grid(point, definition.cell_size));
        }

        if inputs.rotation_steps != 0 {
            let orientation =
                candidate.rotate_yaw(self.config.rotation_step_degrees, inputs.rotation_steps);
            self.last_committed_pose.orientation = orientation;
            moved = true;
        }

        if moved {
            feedback.sync_pose(id, candidate.pose());
        }

        let placeable = hit.is_some() && !candidate.is_blocked();
        let state = if placeable { VisualState::Valid } else { VisualState::Invalid };
        show(candidate, state, feedback);

        if !inputs.confirm {
            return;
        }
        if !placeable {
            debug!(
                instance = %id,
                blocked = candidate.is_blocked(),
                hit = hit.is_some(),
                "confirm discarded, candidate not placeable"
            );
            return;
        }

        candidate.commit();
        show(candidate, VisualState::Normal, feedback);
        feedback.commit_visual(candidate);
        let pose = *candidate.pose();

        self.last_committed_pose = pose;
        self.active_candidate = None;
        report.committed = Some(id);

        info!(
            instance = %id,
            definition = %definition.id,
            position = %pose.position,
            "placed structure"
        );
        self.observers.notify(&PlacementEvent::Committed {
            instance: id,
            definition: definition.id.clone(),
            pose,
        });
    }

    fn spawn_candidate(
        &mut self,
        definition: Arc<StructureDefinition>,
        feedback: &mut dyn RenderFeedbackPort,
    ) -> InstanceId {
        let pose = self.last_committed_pose;
        let id = self.scene.spawn_candidate(definition, pose, self.config.ground_layer);
        self.active_candidate = Some(id);

        if let Some(candidate) = self.scene.get(id) {
            feedback.spawn_visual(candidate);
            feedback.set_visual_state(id, candidate.visual_state());
        }
        debug!(instance = %id, "candidate spawned");
        id
    }

    fn dispose_candidate(&mut self, feedback: &mut dyn RenderFeedbackPort) {
        let Some(id) = self.active_candidate.take() else {
            return;
        };
        if self.scene.remove(id).is_some() {
            feedback.despawn_visual(id);
            debug!(instance = %id, "candidate disposed");
        }
    }

    // ------------------------------------------------------------------
    // Delete mode
    // ------------------------------------------------------------------

    fn delete_tick(
        &mut self,
        aim: &Ray,
        query: &dyn SpatialQueryPort,
        feedback: &mut dyn RenderFeedbackPort,
        inputs: &TickInputs,
        report: &mut TickReport,
    ) {
        // Normally disposed by the toggle already.
        self.dispose_candidate(feedback);

        match query.cast(aim, self.config.max_ray_distance, self.config.deletable_mask) {
            None => self.clear_delete_target(feedback),
            Some(hit) => match self.resolve_owner(&hit) {
                Ok(resolved) => self.hover(resolved, feedback),
                Err(err) => trace!(error = %err, "delete ray hit ignored"),
            },
        }

        if !inputs.confirm {
            return;
        }
        let Some(target) = self.delete_target.take() else {
            trace!("confirm with no delete target");
            return;
        };
        if self.scene.remove(target).is_none() {
            debug!(error = %PlacementError::StaleReference(target), "delete target already gone");
            return;
        }

        feedback.despawn_visual(target);
        report.deleted = Some(target);
        info!(instance = %target, "removed structure");
        self.observers.notify(&PlacementEvent::Deleted(target));
    }

    /// Committed structure owning a delete-ray hit.
    fn resolve_owner(&self, hit: &RayHit) -> PlacementResult<InstanceId> {
        let owner = hit.owner.ok_or(PlacementError::InvalidHitTarget)?;
        let instance = self.scene.get(owner).ok_or(PlacementError::StaleReference(owner))?;
        if !instance.is_committed() {
            return Err(PlacementError::InvalidHitTarget);
        }
        Ok(owner)
    }

    fn hover(&mut self, resolved: InstanceId, feedback: &mut dyn RenderFeedbackPort) {
        match self.delete_target {
            None => self.delete_target = Some(resolved),
            Some(current) if current != resolved => {
                if let Err(err) = self.unflag(current, feedback) {
                    debug!(error = %err, "previous target already gone");
                }
                self.delete_target = Some(resolved);
            }
            Some(_) => {}
        }

        if let Err(err) = self.flag(resolved, feedback) {
            debug!(error = %err, "could not flag target");
            self.delete_target = None;
        }
    }

    fn clear_delete_target(&mut self, feedback: &mut dyn RenderFeedbackPort) {
        let Some(target) = self.delete_target.take() else {
            return;
        };
        if let Err(err) = self.unflag(target, feedback) {
            debug!(error = %err, "delete target already gone");
        }
    }

    fn flag(
        &mut self,
        id: InstanceId,
        feedback: &mut dyn RenderFeedbackPort,
    ) -> PlacementResult<()> {
        let instance = self.scene.get_mut(id).ok_or(PlacementError::StaleReference(id))?;
        if show(instance, VisualState::DeleteFlagged, feedback) {
            debug!(instance = %id, "flagged for delete");
        }
        Ok(())
    }

    fn unflag(
        &mut self,
        id: InstanceId,
        feedback: &mut dyn RenderFeedbackPort,
    ) -> PlacementResult<()> {
        let instance = self.scene.get_mut(id).ok_or(PlacementError::StaleReference(id))?;
        if instance.is_flagged() {
            show(instance, VisualState::Normal, feedback);
            debug!(instance = %id, "delete flag cleared");
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reference hygiene
    // ------------------------------------------------------------------

    /// Drop handles whose instances were destroyed outside the controller.
    fn revalidate_references(&mut self) {
        if let Some(id) = self.active_candidate {
            if !self.scene.get(id).is_some_and(|c| !c.is_committed()) {
                warn!(error = %PlacementError::StaleReference(id), "dropping candidate handle");
                self.active_candidate = None;
            }
        }
        if let Some(id) = self.delete_target {
            if !self.scene.get(id).is_some_and(StructureInstance::is_committed) {
                warn!(error = %PlacementError::StaleReference(id), "dropping delete target handle");
                self.delete_target = None;
            }
        }
    }

    fn candidate_overlap(&mut self, id: InstanceId) -> Option<&mut OverlapTracker> {
        if self.active_candidate != Some(id) {
            return None;
        }
        self.scene.get_mut(id)?.overlap_mut()
    }
}

impl CollisionEventPort for PlacementController {
    fn on_overlap_enter(&mut self, instance: InstanceId, foreign_layer: Layer) {
        match self.candidate_overlap(instance) {
            Some(overlap) => {
                if overlap.on_enter(foreign_layer) {
                    trace!(
                        instance = %instance,
                        layer = %foreign_layer,
                        count = overlap.count(),
                        "overlap enter"
                    );
                }
            }
            None => trace!(instance = %instance, "overlap enter for non-candidate ignored"),
        }
    }

    fn on_overlap_exit(&mut self, instance: InstanceId) {
        if let Some(overlap) = self.candidate_overlap(instance) {
            overlap.on_exit();
            trace!(instance = %instance, count = overlap.count(), "overlap exit");
        }
    }

    fn on_overlap_exit_from(&mut self, instance: InstanceId, foreign_layer: Layer) {
        if let Some(overlap) = self.candidate_overlap(instance) {
            overlap.on_exit_from(foreign_layer);
            trace!(
                instance = %instance,
                layer = %foreign_layer,
                count = overlap.count(),
                "overlap exit"
            );
        }
    }
}

/// Update an instance's visual state and forward real changes to the renderer.
fn show(
    instance: &mut StructureInstance,
    state: VisualState,
    feedback: &mut dyn RenderFeedbackPort,
) -> bool {
    let changed = instance.set_visual_state(state);
    if changed {
        feedback.set_visual_state(instance.id(), state);
    }
    changed
}

/// Aim straight down from above `target`; convenient for scripted scenes.
pub fn aim_down_at(target: Vec3) -> Ray {
    Ray::new(target + Vec3::Y * 10.0, Vec3::NEG_Y)
}
