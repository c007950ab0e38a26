//! In-Memory Collision World
//!
//! A small reference backend for the builder ports: a horizontal ground
//! plane plus one box per registered instance. Drives the headless sandbox
//! and the integration tests; a real game plugs its own physics engine into
//! the same ports.

use std::collections::BTreeMap;

use glam::Vec3;

use super::bounds::Aabb;
use super::layers::{Layer, LayerMask};
use super::query::{CollisionEventPort, Ray, RayHit, SpatialQueryPort};
use crate::handle::InstanceId;

#[derive(Debug, Clone, Copy)]
struct Body {
    bounds: Aabb,
    layer: Layer,
}

/// Something a subject volume is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Contact {
    Ground,
    Body(InstanceId),
}

/// Live contacts of one subject, with the layer each had when it was made.
type Contacts = BTreeMap<Contact, Layer>;

/// Overlap transition produced by [`InMemoryWorld::update_overlaps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Enter {
        instance: InstanceId,
        foreign_layer: Layer,
    },
    Exit {
        instance: InstanceId,
        foreign_layer: Layer,
    },
}

impl OverlapEvent {
    pub fn deliver(self, port: &mut dyn CollisionEventPort) {
        match self {
            OverlapEvent::Enter {
                instance,
                foreign_layer,
            } => port.on_overlap_enter(instance, foreign_layer),
            OverlapEvent::Exit {
                instance,
                foreign_layer,
            } => port.on_overlap_exit_from(instance, foreign_layer),
        }
    }
}

/// Ground plane plus axis-aligned bodies keyed by instance.
#[derive(Debug, Clone)]
pub struct InMemoryWorld {
    ground_height: f32,
    ground_layer: Layer,
    bodies: BTreeMap<InstanceId, Body>,
    contacts: BTreeMap<InstanceId, Contacts>,
}

impl InMemoryWorld {
    pub fn new(ground_height: f32, ground_layer: Layer) -> Self {
        Self {
            ground_height,
            ground_layer,
            bodies: BTreeMap::new(),
            contacts: BTreeMap::new(),
        }
    }

    /// Insert or replace the body for `id`.
    pub fn insert(&mut self, id: InstanceId, bounds: Aabb, layer: Layer) {
        self.bodies.insert(id, Body { bounds, layer });
    }

    /// Remove a body. Other subjects touching it see an exit on their next
    /// update, reported on the layer the body had when the contact was made.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        self.contacts.remove(&id);
        self.bodies.remove(&id).is_some()
    }

    pub fn set_bounds(&mut self, id: InstanceId, bounds: Aabb) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.bounds = bounds;
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.bodies.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Recompute what `subject` touches and return the enter/exit transitions
    /// since the previous call for the same subject.
    pub fn update_overlaps(&mut self, subject: InstanceId) -> Vec<OverlapEvent> {
        let Some(subject_body) = self.bodies.get(&subject).copied() else {
            self.contacts.remove(&subject);
            return Vec::new();
        };

        let mut current = Contacts::new();
        if subject_body.bounds.min.y < self.ground_height {
            current.insert(Contact::Ground, self.ground_layer);
        }
        for (id, body) in &self.bodies {
            if *id != subject && body.bounds.intersects(&subject_body.bounds) {
                current.insert(Contact::Body(*id), body.layer);
            }
        }

        let previous = self.contacts.remove(&subject).unwrap_or_default();
        let mut events = Vec::new();

        // A contact whose layer changed leaves on the old layer and enters on the new one.
        for (contact, layer) in &previous {
            if current.get(contact) != Some(layer) {
                events.push(OverlapEvent::Exit {
                    instance: subject,
                    foreign_layer: *layer,
                });
            }
        }
        for (contact, layer) in &current {
            if previous.get(contact) != Some(layer) {
                events.push(OverlapEvent::Enter {
                    instance: subject,
                    foreign_layer: *layer,
                });
            }
        }

        self.contacts.insert(subject, current);
        events
    }

    fn cast_ground(&self, ray: &Ray, max_distance: f32) -> Option<(f32, RayHit)> {
        if ray.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (self.ground_height - ray.origin.y) / ray.direction.y;
        (t >= 0.0 && t <= max_distance).then(|| (t, RayHit::ground(ray.point_at(t))))
    }
}

impl SpatialQueryPort for InMemoryWorld {
    fn cast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let mut best: Option<(f32, RayHit)> = None;

        if mask.contains(self.ground_layer) {
            best = self.cast_ground(ray, max_distance);
        }

        for (id, body) in &self.bodies {
            if !mask.contains(body.layer) {
                continue;
            }
            let Some(t) = body.bounds.ray_intersect(ray.origin, ray.direction) else {
                continue;
            };
            if t > max_distance || best.is_some_and(|(best_t, _)| best_t <= t) {
                continue;
            }
            best = Some((t, RayHit::structure(ray.point_at(t), *id)));
        }

        best.map(|(_, hit)| hit)
    }
}

impl Default for InMemoryWorld {
    fn default() -> Self {
        Self::new(0.0, super::layers::GROUND_LAYER)
    }
}
