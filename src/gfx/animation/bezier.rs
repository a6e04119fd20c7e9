//! Bezier and linear interpolation over 3D control points
//!
//! The fixed-order evaluators (`linear_bezier`, `quadratic_bezier`,
//! `cubic_bezier`) do not clamp `t`; values outside `[0, 1]` extrapolate.
//! The general [`bezier`] form uses binomial weights and is limited to
//! [`MAX_CURVE_POINTS`] control points, past which the factorial-based weights
//! lose precision in `f32`.

use std::ops::Range;

use cgmath::{Vector3, Zero};

use crate::error::{Result, StagehandError};

/// Largest control-point count accepted by [`bezier`]
pub const MAX_CURVE_POINTS: usize = 16;

pub fn lerp(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// Maps `x` in `[a, b]` to a fraction in `[0, 1]`
///
/// Equal bounds have no meaningful fraction and are rejected.
pub fn inv_lerp(a: f32, b: f32, x: f32) -> Result<f32> {
    if a == b {
        return Err(StagehandError::DegenerateInput(format!(
            "inverse lerp over empty range [{a}, {b}]"
        )));
    }
    Ok((x - a) / (b - a))
}

pub fn linear_bezier(p0: Vector3<f32>, p1: Vector3<f32>, t: f32) -> Vector3<f32> {
    p0 * (1.0 - t) + p1 * t
}

pub fn quadratic_bezier(p0: Vector3<f32>, p1: Vector3<f32>, p2: Vector3<f32>, t: f32) -> Vector3<f32> {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

pub fn cubic_bezier(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// `n choose k`, computed multiplicatively to stay exact for small `n`
pub fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// General Bezier curve: `sum C(n,i) * t^i * (1-t)^(n-i) * P_i`
///
/// A single point yields that point for every `t`.
pub fn bezier(points: &[Vector3<f32>], t: f32) -> Result<Vector3<f32>> {
    match points.len() {
        0 => Err(StagehandError::InvalidConfiguration(
            "bezier curve needs at least one control point".to_string(),
        )),
        1 => Ok(points[0]),
        len if len > MAX_CURVE_POINTS => Err(StagehandError::DegenerateInput(format!(
            "{len} control points exceed the supported {MAX_CURVE_POINTS}"
        ))),
        len => {
            let n = len - 1;
            let t = f64::from(t);
            let result = points.iter().enumerate().fold(Vector3::zero(), |acc, (i, p)| {
                let weight = binomial_coefficient(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32);
                acc + *p * weight as f32
            });
            Ok(result)
        }
    }
}

/// Evaluates a 2, 3 or 4 point segment with the matching fixed-order curve
pub fn segment_bezier(points: &[Vector3<f32>], t: f32) -> Result<Vector3<f32>> {
    match points {
        [p0] => Ok(*p0),
        [p0, p1] => Ok(linear_bezier(*p0, *p1, t)),
        [p0, p1, p2] => Ok(quadratic_bezier(*p0, *p1, *p2, t)),
        [p0, p1, p2, p3] => Ok(cubic_bezier(*p0, *p1, *p2, *p3, t)),
        _ => Err(StagehandError::DegenerateInput(format!(
            "segment of {} points is not a linear, quadratic or cubic curve",
            points.len()
        ))),
    }
}

/// Splits `len` control points into curve segments
///
/// Segments take four points (cubic) and share their end point with the next
/// segment's start. The tail degrades to a quadratic (3 points) or linear
/// (2 points) segment. Fewer than two points produce no segment.
pub fn bezier_segments(len: usize) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    if len < 2 {
        return segments;
    }

    let mut start = 0;
    while start < len - 1 {
        let end = (start + 3).min(len - 1);
        segments.push(start..end + 1);
        start = end;
    }
    segments
}

/// Piecewise linear interpolation over evenly spaced points
///
/// `t * (len - 1)` selects the segment (integer part) and the blend within it
/// (fractional part). `t` is clamped to `[0, 1]`.
pub fn piecewise_linear(points: &[Vector3<f32>], t: f32) -> Result<Vector3<f32>> {
    if points.len() < 2 {
        return Err(StagehandError::InvalidConfiguration(format!(
            "piecewise interpolation needs at least two points, got {}",
            points.len()
        )));
    }

    let scaled = t.clamp(0.0, 1.0) * (points.len() - 1) as f32;
    let index = (scaled.floor() as usize).min(points.len() - 2);
    let local = scaled - index as f32;
    Ok(lerp(points[index], points[index + 1], local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    #[test]
    fn test_cubic_endpoints() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let mut p = || v(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
            let (p0, p1, p2, p3) = (p(), p(), p(), p());

            assert_eq!(cubic_bezier(p0, p1, p2, p3, 0.0), p0);
            assert_relative_eq!(cubic_bezier(p0, p1, p2, p3, 1.0), p3, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_fixed_order_matches_general_form() {
        let points = [v(0.0, 0.0, 0.0), v(1.0, 2.0, 0.0), v(3.0, 2.0, 1.0), v(4.0, 0.0, 0.0)];
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let general = bezier(&points, t).unwrap();
            let fixed = cubic_bezier(points[0], points[1], points[2], points[3], t);
            assert_relative_eq!(general, fixed, epsilon = 1e-5);

            let quad = bezier(&points[..3], t).unwrap();
            assert_relative_eq!(quad, quadratic_bezier(points[0], points[1], points[2], t), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_linear_bezier_midpoint() {
        assert_relative_eq!(linear_bezier(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), 0.5), v(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_general_bezier_edge_cases() {
        assert!(matches!(bezier(&[], 0.5), Err(StagehandError::InvalidConfiguration(_))));
        assert_eq!(bezier(&[v(1.0, 2.0, 3.0)], 0.7).unwrap(), v(1.0, 2.0, 3.0));

        let too_many = vec![v(0.0, 0.0, 0.0); MAX_CURVE_POINTS + 1];
        assert!(matches!(bezier(&too_many, 0.5), Err(StagehandError::DegenerateInput(_))));
    }

    #[test]
    fn test_binomial_coefficient() {
        assert_eq!(binomial_coefficient(3, 0), 1.0);
        assert_eq!(binomial_coefficient(3, 1), 3.0);
        assert_eq!(binomial_coefficient(4, 2), 6.0);
        assert_eq!(binomial_coefficient(15, 7), 6435.0);
        assert_eq!(binomial_coefficient(2, 3), 0.0);
    }

    #[test]
    fn test_inv_lerp() {
        assert_eq!(inv_lerp(2.0, 6.0, 2.0).unwrap(), 0.0);
        assert_eq!(inv_lerp(2.0, 6.0, 6.0).unwrap(), 1.0);
        assert_eq!(inv_lerp(2.0, 6.0, 3.0).unwrap(), 0.25);
        assert!(matches!(inv_lerp(1.0, 1.0, 1.0), Err(StagehandError::DegenerateInput(_))));
    }

    #[test]
    fn test_segment_layout() {
        assert!(bezier_segments(0).is_empty());
        assert!(bezier_segments(1).is_empty());
        assert_eq!(bezier_segments(2), vec![0..2]);
        assert_eq!(bezier_segments(3), vec![0..3]);
        assert_eq!(bezier_segments(4), vec![0..4]);
        assert_eq!(bezier_segments(5), vec![0..4, 3..5]);
        assert_eq!(bezier_segments(6), vec![0..4, 3..6]);
        assert_eq!(bezier_segments(7), vec![0..4, 3..7]);
    }

    #[test]
    fn test_segment_bezier_orders() {
        let pts = [v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)];
        assert_eq!(segment_bezier(&pts[..1], 0.3).unwrap(), pts[0]);
        assert_relative_eq!(segment_bezier(&pts[..2], 0.5).unwrap(), v(0.5, 0.0, 0.0));
        assert_relative_eq!(segment_bezier(&pts, 0.25).unwrap(), v(0.5, 0.0, 0.0));
        assert!(segment_bezier(&[], 0.5).is_err());
    }

    #[test]
    fn test_piecewise_linear() {
        let pts = [v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 2.0, 0.0)];
        assert_relative_eq!(piecewise_linear(&pts, 0.0).unwrap(), pts[0]);
        assert_relative_eq!(piecewise_linear(&pts, 0.25).unwrap(), v(0.5, 0.0, 0.0));
        assert_relative_eq!(piecewise_linear(&pts, 0.75).unwrap(), v(1.0, 1.0, 0.0));
        assert_relative_eq!(piecewise_linear(&pts, 1.0).unwrap(), pts[2]);
        assert!(piecewise_linear(&pts[..1], 0.5).is_err());
    }
}
