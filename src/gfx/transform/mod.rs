//! # Transform Module
//!
//! Spatial state for scene objects and the group handle used to edit several
//! objects at once.
//!
//! - [`Transform`] / [`Transformable`] - position, rotation, scale and origin
//! - [`TransformableGroup`] - fans edits of one handle out to member objects
//! - [`TransformStore`] - id-based access to transforms owned elsewhere

pub mod group;
pub mod transformable;

pub use group::TransformableGroup;
pub use transformable::{ObjectId, Transform, TransformStore, Transformable};
