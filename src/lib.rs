// src/lib.rs
//! Stagehand
//!
//! Scene editing core for a small model viewer: objects loaded from OBJ
//! files, transform groups that distribute edits to their members, and
//! keyframe/Bezier animation played on a fixed 60 Hz virtual clock.

pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;

// Re-export main types for convenience
pub use error::{Result, StagehandError};
pub use gfx::scene::Scene;
