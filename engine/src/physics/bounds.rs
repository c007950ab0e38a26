//! Axis-Aligned Bounds
//!
//! Collision volumes for structures and the slab ray test used by the
//! in-memory world.

use glam::{Mat3, Quat, Vec3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Envelope of a box with `half_extents` rotated by `rotation` around `center`.
    pub fn from_oriented_box(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        let basis = Mat3::from_quat(rotation).abs();
        Self::from_center_half_extents(center, basis * half_extents.abs())
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Strict overlap test; boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Ray-AABB slab test.
    ///
    /// Returns the distance along `ray_dir` to the nearest non-negative
    /// intersection, or `None` when the ray misses or the box is behind it.
    pub fn ray_intersect(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(
            safe_recip(ray_dir.x),
            safe_recip(ray_dir.y),
            safe_recip(ray_dir.z),
        );

        let t1 = (self.min - ray_origin) * inv_dir;
        let t2 = (self.max - ray_origin) * inv_dir;

        let t_min = t1.min(t2).max_element();
        let t_max = t1.max(t2).min_element();

        if t_max >= t_min && t_max >= 0.0 {
            // Origin inside the box counts as a hit at distance zero
            Some(t_min.max(0.0))
        } else {
            None
        }
    }
}

fn safe_recip(v: f32) -> f32 {
    if v.abs() > 1e-10 {
        1.0 / v
    } else {
        f32::MAX * if v.is_sign_negative() { -1.0 } else { 1.0 }
    }
}
