//! # Animation Module
//!
//! Keyframed and curve-based object animation, sampled at a fixed virtual
//! frame rate and written into a [`TransformableGroup`].
//!
//! ## Key Components
//!
//! - [`bezier`] - Bezier, linear and inverse-linear interpolation math
//! - [`Keyframes`] / [`Motion`] - validated control-point data to play back
//! - [`PlaybackState`] - the throttled virtual-frame clock
//! - [`Animation`] - ties a motion, a clock and a target group together
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Vector3;
//! use stagehand::gfx::animation::{Animation, Interpolation, Keyframes, Motion};
//! use stagehand::gfx::transform::TransformableGroup;
//!
//! let keyframes = Keyframes::new(
//!     vec![0.0, 1.0, 2.0],
//!     vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 0.0), Vector3::new(2.0, 0.0, 0.0)],
//!     Interpolation::Bezier,
//! )?;
//! let animation = Animation::new(Motion::Keyframes(keyframes), true, TransformableGroup::new())?;
//! // Each rendered frame: animation.animate(elapsed_seconds, &mut objects);
//! # Ok::<(), stagehand::StagehandError>(())
//! ```
//!
//! [`TransformableGroup`]: crate::gfx::transform::TransformableGroup

#[allow(clippy::module_inception)]
pub mod animation;
pub mod bezier;
pub mod keyframes;
pub mod playback;

pub use animation::Animation;
pub use keyframes::{Interpolation, Keyframes, Motion, Sample};
pub use playback::{PlaybackState, FRAME_RATE};
