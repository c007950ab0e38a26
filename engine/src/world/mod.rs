//! World Module
//!
//! World-space utilities shared by the builder: grid snapping.
//! 1 unit = 1 meter.

pub mod grid;

pub use grid::{grid_cell, snap_to_grid};
