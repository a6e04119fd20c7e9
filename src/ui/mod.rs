//! # User Interface Module
//!
//! Dear ImGui panels for editing a [`Scene`]. Integrating ImGui with a window
//! and a renderer is left to the host application; the panels only need an
//! [`imgui::Ui`] for the current frame.
//!
//! ## Usage
//!
//! ```no_run
//! # use stagehand::ui::TransformPanelState;
//! # fn frame(ui: &imgui::Ui, scene: &mut stagehand::gfx::scene::Scene, state: &mut TransformPanelState) {
//! // `state` lives as long as the panel does
//! if stagehand::ui::transform_panel(ui, scene, state) {
//!     // The selection moved this frame
//! }
//! # }
//! ```
//!
//! [`Scene`]: crate::gfx::scene::Scene

pub mod panel;

// Re-export main types
pub use panel::{click_object, transform_panel, TransformEdit, TransformPanelState};
