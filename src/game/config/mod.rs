//! Config Module
//!
//! Centralized configuration for the placement controller.

pub mod builder_config;

pub use builder_config::{BuilderConfig, DEFAULT_RAY_DISTANCE, DEFAULT_ROTATION_STEP_DEGREES};
