pub mod free_camera;

// Re-export main types
pub use free_camera::{Camera, CameraMovement};
