use cgmath::{Vector3, Zero};
use log::{debug, warn};

use super::keyframes::{Motion, Sample};
use super::playback::{frames_for, PlaybackState};
use crate::error::{Result, StagehandError};
use crate::gfx::transform::{TransformStore, Transformable, TransformableGroup};

/// Time-driven controller that moves a group along a [`Motion`]
///
/// The caller drives it cooperatively by calling [`Animation::animate`] once
/// per rendered frame. Samples are applied as offsets: the target ends up at
/// wherever it stood when playback began, plus the sampled position (and
/// rotation).
#[derive(Debug, Clone)]
pub struct Animation {
    motion: Motion,
    looped: bool,
    /// Virtual frames in one forward pass
    frames: u32,
    target: TransformableGroup,
    state: PlaybackState,
    /// Offset currently applied to the target
    applied: Sample,
}

impl Animation {
    /// Creates an animation for `target`
    ///
    /// Looped animations play forward then backward (ping-pong). Fails with
    /// [`StagehandError::InvalidConfiguration`] unless the motion lasts a
    /// positive, finite number of seconds whose frame count (doubled when
    /// looped) fits a `u32`.
    pub fn new(motion: Motion, looped: bool, target: TransformableGroup) -> Result<Self> {
        let duration = motion.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(StagehandError::InvalidConfiguration(format!(
                "animation duration must be positive, got {duration}"
            )));
        }

        // Saturated frame counts or a doubled count past u32 cannot be played back
        let frames = frames_for(duration);
        let cycle = if looped { frames.checked_mul(2) } else { Some(frames) };
        if frames == u32::MAX || cycle.is_none() {
            return Err(StagehandError::InvalidConfiguration(format!(
                "animation duration of {duration}s is too long to play back"
            )));
        }

        debug!(
            "Animation: {} frames over {}s (looped: {}), {} target members",
            frames,
            duration,
            looped,
            target.size()
        );

        Ok(Self {
            motion,
            looped,
            frames,
            target,
            state: PlaybackState::Idle,
            applied: Sample::at(Vector3::zero()),
        })
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Frames in one full cycle (forward and, when looped, backward)
    pub fn cycle_frames(&self) -> u32 {
        if self.looped {
            self.frames.saturating_mul(2)
        } else {
            self.frames
        }
    }

    pub fn target(&self) -> &TransformableGroup {
        &self.target
    }

    /// Mutable access to the target, e.g. to drop members that are being deleted
    pub fn target_mut(&mut self) -> &mut TransformableGroup {
        &mut self.target
    }

    /// The offset most recently written to the target
    pub fn current_sample(&self) -> &Sample {
        &self.applied
    }

    /// Evaluates the motion at a virtual frame of the cycle
    ///
    /// In the backward half of a looped cycle the frame is mirrored, so
    /// frame `frames + k` samples the same point as `frames - k`.
    pub fn sample(&self, frame: u32) -> Result<Sample> {
        let frame = if self.looped && frame > self.frames {
            self.cycle_frames().saturating_sub(frame)
        } else {
            frame
        };
        let time = self.motion.duration() * frame as f32 / self.frames as f32;
        self.motion.sample(time)
    }

    /// Steps playback to wall-clock time `now` (seconds)
    ///
    /// Does nothing and returns `false` if less than one virtual frame passed
    /// since the last step. Otherwise writes the next sample into the target,
    /// fans it out to the members in `store` and returns `true`. Sampling
    /// failures are logged and skipped rather than returned.
    pub fn animate(&mut self, now: f64, store: &mut impl TransformStore) -> bool {
        let Some((state, frame)) = self.state.step(now, self.cycle_frames()) else {
            return false;
        };
        self.state = state;

        let sample = match self.sample(frame) {
            Ok(sample) => sample,
            Err(err) => {
                warn!("Animation: skipping frame {}: {}", frame, err);
                return false;
            }
        };

        // Members may have been moved by something else since the last step
        self.target.sync(store);

        let handle = self.target.transform_mut();
        handle.position += sample.position - self.applied.position;
        if let Some(rotation) = sample.rotation {
            let previous = self.applied.rotation.unwrap_or_else(Vector3::zero);
            handle.rotation += rotation - previous;
        }
        self.target.update(store);

        self.applied = sample;
        true
    }
}
