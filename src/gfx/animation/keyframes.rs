use cgmath::Vector3;
use serde::Deserialize;

use super::bezier::{self, MAX_CURVE_POINTS};
use crate::error::{Result, StagehandError};

/// How control points between keyframes are blended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Consecutive points form cubic segments, degrading to quadratic/linear at the tail
    #[default]
    Bezier,
    /// Straight lines between consecutive keyframes
    Linear,
}

/// One evaluated point of a motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Vector3<f32>,
    /// Euler angles in radians, only present when the motion animates rotation
    pub rotation: Option<Vector3<f32>>,
}

impl Sample {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: None,
        }
    }
}

/// Timed control points
///
/// Times are in seconds, strictly ascending and index-aligned with positions
/// (and rotations, when present). Before the first time the first point is
/// held; the motion ends at the last time.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    times: Vec<f32>,
    positions: Vec<Vector3<f32>>,
    rotations: Option<Vec<Vector3<f32>>>,
    interpolation: Interpolation,
}

impl Keyframes {
    pub fn new(
        times: Vec<f32>,
        positions: Vec<Vector3<f32>>,
        interpolation: Interpolation,
    ) -> Result<Self> {
        if positions.is_empty() {
            return Err(invalid("keyframe animation has no keyframes"));
        }
        if times.len() != positions.len() {
            return Err(invalid(format!(
                "{} keyframe times for {} positions",
                times.len(),
                positions.len()
            )));
        }
        if times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(invalid("keyframe times must be finite and non-negative"));
        }
        if times.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(invalid("keyframe times must be strictly ascending"));
        }

        Ok(Self {
            times,
            positions,
            rotations: None,
            interpolation,
        })
    }

    /// Adds rotation control points (radians), one per keyframe
    pub fn with_rotations(mut self, rotations: Vec<Vector3<f32>>) -> Result<Self> {
        if rotations.len() != self.positions.len() {
            return Err(invalid(format!(
                "{} rotation keyframes for {} positions",
                rotations.len(),
                self.positions.len()
            )));
        }
        self.rotations = Some(rotations);
        Ok(self)
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn rotations(&self) -> Option<&[Vector3<f32>]> {
        self.rotations.as_deref()
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Time of the last keyframe
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn sample(&self, time: f32) -> Result<Sample> {
        if self.positions.len() == 1 {
            return Ok(Sample {
                position: self.positions[0],
                rotation: self.rotations.as_ref().map(|r| r[0]),
            });
        }

        match self.interpolation {
            Interpolation::Linear => self.sample_linear(time),
            Interpolation::Bezier => self.sample_bezier(time),
        }
    }

    fn sample_linear(&self, time: f32) -> Result<Sample> {
        let last = self.times.len() - 1;
        let index = self
            .times
            .windows(2)
            .position(|pair| time < pair[1])
            .unwrap_or(last - 1);

        let t = bezier::inv_lerp(self.times[index], self.times[index + 1], time)?.clamp(0.0, 1.0);
        let blend = |points: &[Vector3<f32>]| bezier::lerp(points[index], points[index + 1], t);

        Ok(Sample {
            position: blend(&self.positions),
            rotation: self.rotations.as_deref().map(blend),
        })
    }

    fn sample_bezier(&self, time: f32) -> Result<Sample> {
        let segments = bezier::bezier_segments(self.positions.len());
        let segment = segments
            .iter()
            .find(|range| time < self.times[range.end - 1])
            .or(segments.last())
            .cloned()
            .ok_or_else(|| invalid("keyframe animation has no curve segments"))?;

        let start = self.times[segment.start];
        let end = self.times[segment.end - 1];
        let t = bezier::inv_lerp(start, end, time)?.clamp(0.0, 1.0);

        let position = bezier::segment_bezier(&self.positions[segment.clone()], t)?;
        let rotation = match &self.rotations {
            Some(rotations) => Some(bezier::segment_bezier(&rotations[segment], t)?),
            None => None,
        };
        Ok(Sample { position, rotation })
    }
}

/// What an animation plays back
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// A single curve through all points, stretched over `duration` seconds
    Curve {
        points: Vec<Vector3<f32>>,
        duration: f32,
        interpolation: Interpolation,
    },
    /// Independently timed segments
    Keyframes(Keyframes),
}

impl Motion {
    /// Validated single-curve motion
    pub fn curve(points: Vec<Vector3<f32>>, duration: f32, interpolation: Interpolation) -> Result<Self> {
        if points.is_empty() {
            return Err(invalid("curve animation has no control points"));
        }
        if interpolation == Interpolation::Bezier && points.len() > MAX_CURVE_POINTS {
            return Err(invalid(format!(
                "curve animation has {} control points, at most {} are supported; use keyframes instead",
                points.len(),
                MAX_CURVE_POINTS
            )));
        }
        Ok(Motion::Curve {
            points,
            duration,
            interpolation,
        })
    }

    pub fn duration(&self) -> f32 {
        match self {
            Motion::Curve { duration, .. } => *duration,
            Motion::Keyframes(keyframes) => keyframes.duration(),
        }
    }

    /// Evaluates the motion at `time` seconds from its start
    pub fn sample(&self, time: f32) -> Result<Sample> {
        match self {
            Motion::Curve {
                points,
                duration,
                interpolation,
            } => {
                let t = (time / duration).clamp(0.0, 1.0);
                let position = match (interpolation, points.len()) {
                    (_, 1) => points[0],
                    (Interpolation::Bezier, _) => bezier::bezier(points, t)?,
                    (Interpolation::Linear, _) => bezier::piecewise_linear(points, t)?,
                };
                Ok(Sample::at(position))
            }
            Motion::Keyframes(keyframes) => keyframes.sample(time),
        }
    }
}

fn invalid(message: impl Into<String>) -> StagehandError {
    StagehandError::InvalidConfiguration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    fn line() -> Vec<Vector3<f32>> {
        vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)]
    }

    #[test]
    fn test_rejects_malformed_keyframes() {
        assert!(Keyframes::new(vec![], vec![], Interpolation::Bezier).is_err());
        assert!(Keyframes::new(vec![0.0, 1.0], line(), Interpolation::Bezier).is_err());
        assert!(Keyframes::new(vec![0.0, 1.0, 1.0], line(), Interpolation::Bezier).is_err());
        assert!(Keyframes::new(vec![0.0, 2.0, 1.0], line(), Interpolation::Bezier).is_err());
        assert!(Keyframes::new(vec![-1.0, 0.0, 1.0], line(), Interpolation::Linear).is_err());

        let keyframes = Keyframes::new(vec![0.0, 1.0, 2.0], line(), Interpolation::Linear).unwrap();
        assert!(keyframes.with_rotations(vec![v(0.0, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn test_linear_sampling() {
        let keyframes = Keyframes::new(
            vec![0.0, 1.0, 3.0],
            vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 4.0, 0.0)],
            Interpolation::Linear,
        )
        .unwrap();

        assert_relative_eq!(keyframes.sample(0.5).unwrap().position, v(0.5, 0.0, 0.0));
        assert_relative_eq!(keyframes.sample(2.0).unwrap().position, v(1.0, 2.0, 0.0));
        assert_relative_eq!(keyframes.sample(10.0).unwrap().position, v(1.0, 4.0, 0.0));
    }

    #[test]
    fn test_bezier_tail_on_collinear_points() {
        let keyframes = Keyframes::new(vec![0.0, 1.0, 2.0], line(), Interpolation::Bezier).unwrap();
        assert_relative_eq!(keyframes.sample(0.5).unwrap().position, v(0.5, 0.0, 0.0));
        assert_relative_eq!(keyframes.sample(2.0).unwrap().position, v(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_bezier_segments_pass_through_shared_points() {
        let points = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(2.0, 1.0, 0.0),
            v(3.0, 0.0, 0.0),
            v(5.0, 0.0, 0.0),
        ];
        let keyframes =
            Keyframes::new(vec![0.0, 0.5, 1.0, 1.5, 2.5], points, Interpolation::Bezier).unwrap();

        // Point 3 closes the cubic and opens the linear tail
        assert_relative_eq!(keyframes.sample(1.5).unwrap().position, v(3.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(keyframes.sample(2.0).unwrap().position, v(4.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_follows_positions() {
        let keyframes = Keyframes::new(vec![0.0, 2.0], line()[..2].to_vec(), Interpolation::Linear)
            .unwrap()
            .with_rotations(vec![v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0)])
            .unwrap();

        let sample = keyframes.sample(1.0).unwrap();
        assert_relative_eq!(sample.rotation.unwrap(), v(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        let keyframes = Keyframes::new(vec![1.0], vec![v(4.0, 5.0, 6.0)], Interpolation::Bezier).unwrap();
        assert_eq!(keyframes.sample(0.0).unwrap().position, v(4.0, 5.0, 6.0));
        assert_eq!(keyframes.sample(3.0).unwrap().position, v(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_curve_motion() {
        let motion = Motion::curve(line(), 2.0, Interpolation::Bezier).unwrap();
        assert_relative_eq!(motion.sample(1.0).unwrap().position, v(1.0, 0.0, 0.0));
        assert_eq!(motion.duration(), 2.0);

        let linear = Motion::curve(line(), 4.0, Interpolation::Linear).unwrap();
        assert_relative_eq!(linear.sample(1.0).unwrap().position, v(0.5, 0.0, 0.0));

        let constant = Motion::curve(vec![v(1.0, 1.0, 1.0)], 1.0, Interpolation::Linear).unwrap();
        assert_eq!(constant.sample(0.3).unwrap().position, v(1.0, 1.0, 1.0));

        assert!(Motion::curve(vec![], 1.0, Interpolation::Bezier).is_err());
        assert!(Motion::curve(vec![v(0.0, 0.0, 0.0); 20], 1.0, Interpolation::Bezier).is_err());
    }
}
