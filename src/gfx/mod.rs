//! # Graphics Module
//!
//! Everything the editor knows about 3D content.
//!
//! ## Architecture Overview
//!
//! - **Transforms** ([`transform`]) - per-object transforms and groups
//! - **Animation** ([`animation`]) - keyframe and Bezier playback
//! - **Scene Management** ([`scene`]) - objects, light, selection, JSON loading
//! - **Camera** ([`camera`]) - free-flying view camera
//! - **Picking** ([`picking`]) - mouse ray casting against object bounds

pub mod animation;
pub mod camera;
pub mod picking;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use scene::Scene;
pub use transform::{ObjectId, Transformable, TransformableGroup};
