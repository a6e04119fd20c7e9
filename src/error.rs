//! # Error Types
//!
//! All fallible operations in the crate return [`Result<T>`], an alias for
//! `std::result::Result<T, StagehandError>`.
//!
//! Construction-time checks (keyframe validation, scene parsing) fail fast.
//! Per-frame stepping never surfaces errors to the caller: animation and group
//! updates log and skip whatever they cannot apply.

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::transform::ObjectId;

/// The main error type for the editor core.
#[derive(Error, Debug)]
pub enum StagehandError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Keyframe or curve data that cannot be played back.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation referenced an object id that is not registered.
    #[error("Object {0} not found")]
    NotFound(ObjectId),

    /// Numerically degenerate input (equal interpolation bounds, zero scale, ...).
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    // ========================================================================
    // Scene Loading Errors
    // ========================================================================
    /// Failed to read a scene description from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene description is not valid JSON or has the wrong shape.
    #[error("Malformed scene description: {0}")]
    SceneFormat(#[from] serde_json::Error),

    /// The mesh importer rejected a model file.
    #[error("Failed to import mesh {path}: {source}")]
    MeshImport {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
}

/// Alias for `Result<T, StagehandError>`.
pub type Result<T> = std::result::Result<T, StagehandError>;
