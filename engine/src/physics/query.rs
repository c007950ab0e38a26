//! Spatial Query and Collision Ports
//!
//! The builder never owns a physics engine. It asks for ray hits through
//! [`SpatialQueryPort`] and receives overlap notifications through
//! [`CollisionEventPort`].

use glam::Vec3;

use super::layers::{Layer, LayerMask};
use crate::handle::InstanceId;

/// Aiming ray cast from the controllable viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized (zero stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Structure owning the hit collider, if the collider belongs to one
    pub owner: Option<InstanceId>,
}

impl RayHit {
    pub fn ground(point: Vec3) -> Self {
        Self { point, owner: None }
    }

    pub fn structure(point: Vec3, owner: InstanceId) -> Self {
        Self {
            point,
            owner: Some(owner),
        }
    }
}

/// Synchronous ray query against scene geometry. Must not mutate the scene.
pub trait SpatialQueryPort {
    fn cast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

/// Overlap notifications delivered by the collision subsystem between ticks.
///
/// Everything delivered before a tick's overlap read is reflected by that tick.
pub trait CollisionEventPort {
    fn on_overlap_enter(&mut self, instance: InstanceId, foreign_layer: Layer);

    fn on_overlap_exit(&mut self, instance: InstanceId);

    /// Exit notification for backends that report the layer of the leaving volume.
    fn on_overlap_exit_from(&mut self, instance: InstanceId, foreign_layer: Layer) {
        let _ = foreign_layer;
        self.on_overlap_exit(instance);
    }
}

impl<F> SpatialQueryPort for F
where
    F: Fn(&Ray, f32, LayerMask) -> Option<RayHit>,
{
    fn cast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self(ray, max_distance, mask)
    }
}
