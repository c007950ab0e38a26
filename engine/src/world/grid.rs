//! Grid Snapping Module
//!
//! Maps world-space points onto the placement grid.
//!
//! ## Tie-break
//! Every axis is rounded half away from zero (`f32::round`), so a point that
//! sits exactly between two cells always moves outward:
//! - `2.5 -> 3.0`
//! - `-2.5 -> -3.0`
//!
//! All three axes are snapped. Structures stack, so Y is grid-aligned too.

use std::num::NonZeroU32;

use glam::Vec3;

/// Snap a world-space point to the nearest grid node.
///
/// For each axis: `round(axis / cell_size) * cell_size`.
/// Deterministic and idempotent: `snap_to_grid(snap_to_grid(p, c), c) == snap_to_grid(p, c)`.
pub fn snap_to_grid(point: Vec3, cell_size: NonZeroU32) -> Vec3 {
    let cell = cell_size.get() as f32;
    Vec3::new(
        snap_axis(point.x, cell),
        snap_axis(point.y, cell),
        snap_axis(point.z, cell),
    )
}

fn snap_axis(value: f32, cell: f32) -> f32 {
    let snapped = (value / cell).round() * cell;
    // Keep -0.0 out of results so snapped poses compare and hash cleanly.
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Grid cell index containing the snapped point (useful for occupancy maps).
pub fn grid_cell(point: Vec3, cell_size: NonZeroU32) -> (i32, i32, i32) {
    let cell = cell_size.get() as f32;
    let snapped = snap_to_grid(point, cell_size);
    (
        (snapped.x / cell) as i32,
        (snapped.y / cell) as i32,
        (snapped.z / cell) as i32,
    )
}
