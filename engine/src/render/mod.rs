//! Render Module
//!
//! Visual feedback contract between the builder and whatever renderer
//! draws the scene.

pub mod feedback;

pub use feedback::{FeedbackLog, RenderFeedbackPort, VisualState};
