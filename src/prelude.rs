//! # Stagehand Prelude
//!
//! Commonly used types and traits in one import:
//!
//! ```no_run
//! use stagehand::prelude::*;
//!
//! fn main() -> stagehand::Result<()> {
//!     let mut scene = Scene::load("scene.json", &ObjLoader::new())?;
//!     for id in scene.object_ids() {
//!         scene.select(id, true)?;
//!     }
//!     scene.selection_mut().move_y(1.0);
//!     scene.apply_selection_edits();
//!     Ok(())
//! }
//! ```

// Re-export errors
pub use crate::error::{Result, StagehandError};

// Re-export transform and animation types
pub use crate::gfx::animation::{Animation, Interpolation, Keyframes, Motion};
pub use crate::gfx::transform::{ObjectId, Transform, Transformable, TransformableGroup};

// Re-export scene types
pub use crate::gfx::camera::Camera;
pub use crate::gfx::picking::ObjectPicker;
pub use crate::gfx::scene::{Light, MeshLoader, ObjLoader, Object, Scene};

// Re-export UI panels
pub use crate::ui::{transform_panel, TransformPanelState};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
pub use imgui::Ui;
