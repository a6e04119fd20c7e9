//! Frame-rate throttled playback clock
//!
//! Playback advances in virtual frames at a fixed [`FRAME_RATE`], independent
//! of how often the render loop calls in. [`PlaybackState::step`] is a pure
//! function of the previous state and the current wall-clock time, so it can
//! be driven by a fake clock in tests.
//!
//! The first step is never throttled: it samples frame 0 straight away,
//! whatever the clock reads. Every later step needs at least
//! [`FRAME_INTERVAL`] seconds since the last sampled frame.

/// Virtual frames per second
pub const FRAME_RATE: u32 = 60;

/// Seconds between two virtual frames
pub const FRAME_INTERVAL: f64 = 1.0 / FRAME_RATE as f64;

/// Clock readings this close to a full interval still count as one
const CLOCK_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    /// No frame sampled yet; the first step is never throttled
    #[default]
    Idle,
    Playing {
        /// Next frame to sample
        frame: u32,
        /// Wall-clock time of the last sampled frame (seconds)
        last_sampled: f64,
    },
}

impl PlaybackState {
    /// Advances the clock to `now`
    ///
    /// Returns `None` while less than one [`FRAME_INTERVAL`] has passed since
    /// the last sampled frame. Otherwise returns the new state together with
    /// the frame to sample, wrapping to 0 once `cycle_frames` frames have been
    /// played.
    pub fn step(self, now: f64, cycle_frames: u32) -> Option<(PlaybackState, u32)> {
        let frame = match self {
            PlaybackState::Idle => 0,
            PlaybackState::Playing {
                frame,
                last_sampled,
            } => {
                if now - last_sampled + CLOCK_TOLERANCE < FRAME_INTERVAL {
                    return None;
                }
                if frame >= cycle_frames {
                    0
                } else {
                    frame
                }
            }
        };

        let next = PlaybackState::Playing {
            frame: frame + 1,
            last_sampled: now,
        };
        Some((next, frame))
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing { .. })
    }
}

/// Number of virtual frames covering `duration` seconds (at least one)
pub fn frames_for(duration: f32) -> u32 {
    ((f64::from(duration) * f64::from(FRAME_RATE)).round() as u32).max(1)
}
