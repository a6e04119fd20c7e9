//! # Scene Management Module
//!
//! Owns the objects being edited together with their animations, the light
//! and the editor selection.
//!
//! ## Key Components
//!
//! - [`Scene`] - id-keyed object arena, animations and selection
//! - [`Object`] / [`Mesh`] / [`Material`] - imported geometry with a transform
//! - [`MeshLoader`] / [`ObjLoader`] - where meshes come from
//! - [`SceneFile`] - the JSON scene description
//!
//! ## Usage
//!
//! ```no_run
//! use stagehand::gfx::scene::{ObjLoader, Scene};
//!
//! let mut scene = Scene::load("assets/scene.json", &ObjLoader::new())?;
//! // Each rendered frame:
//! scene.animate(0.0);
//! # Ok::<(), stagehand::StagehandError>(())
//! ```

pub mod description;
pub mod light;
pub mod loader;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;

// Re-export main types
pub use description::{SceneDescription, SceneFile};
pub use light::Light;
pub use loader::{MeshLoader, ObjLoader};
pub use object::{Material, Mesh, Object};
pub use scene::{Scene, SceneStatistics};
