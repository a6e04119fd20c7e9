//! # Scene Description
//!
//! Typed form of the JSON scene file:
//!
//! ```json
//! {
//!   "scene": {
//!     "objects": [
//!       {
//!         "path": "assets/models/cube.obj",
//!         "initialPosition": [0, 0, 0],
//!         "initialRotation": [0, 45, 0],
//!         "initialScale": [1, 1, 1],
//!         "interpolation": "bezier",
//!         "loopedAnimation": [
//!           { "time": 0, "position": [0, 0, 0] },
//!           { "time": 1, "position": [1, 2, 0], "rotation": [0, 90, 0] }
//!         ]
//!       }
//!     ],
//!     "light": { "position": [1.2, 2, 4], "color": [1, 1, 1], "ambientStrength": 0.3 }
//!   }
//! }
//! ```
//!
//! Rotations are written in degrees and converted to radians here. An
//! animation may also use the single-curve form
//! `{"positions": [[x, y, z], ...], "duration": seconds}`.

use cgmath::{Deg, Rad, Vector3};
use serde::Deserialize;

use super::light::Light;
use crate::error::{Result, StagehandError};
use crate::gfx::animation::{Interpolation, Keyframes, Motion};
use crate::gfx::transform::Transform;

/// Root of a scene file
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    pub scene: SceneDescription,
}

impl SceneFile {
    /// Parses a scene file and returns its `"scene"` member
    pub fn parse(json: &str) -> Result<SceneDescription> {
        let file: SceneFile = serde_json::from_str(json)?;
        Ok(file.scene)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub light: Option<LightDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescription {
    /// Model file; objects without one are skipped when the scene is built
    pub path: Option<String>,
    pub name: Option<String>,
    pub initial_position: Option<[f32; 3]>,
    /// Degrees
    pub initial_rotation: Option<[f32; 3]>,
    pub initial_scale: Option<[f32; 3]>,
    #[serde(default)]
    pub interpolation: Interpolation,
    pub animation: Option<AnimationDescription>,
    pub looped_animation: Option<AnimationDescription>,
}

impl ObjectDescription {
    pub fn initial_transform(&self) -> Transform {
        let mut transform = Transform::identity();
        if let Some(position) = self.initial_position {
            transform.position = Vector3::from(position);
        }
        if let Some(rotation) = self.initial_rotation {
            transform.rotation = degrees_to_radians(rotation);
        }
        if let Some(scale) = self.initial_scale {
            transform.scale = Vector3::from(scale);
        }
        transform
    }

    /// The motion to play and whether it loops, if the object is animated
    pub fn motion(&self) -> Result<Option<(Motion, bool)>> {
        match (&self.animation, &self.looped_animation) {
            (Some(_), Some(_)) => Err(StagehandError::InvalidConfiguration(
                "object declares both \"animation\" and \"loopedAnimation\"".to_string(),
            )),
            (Some(animation), None) => Ok(Some((animation.to_motion(self.interpolation)?, false))),
            (None, Some(animation)) => Ok(Some((animation.to_motion(self.interpolation)?, true))),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnimationDescription {
    Keyframes(Vec<KeyframeDescription>),
    Curve(CurveDescription),
}

impl AnimationDescription {
    pub fn to_motion(&self, interpolation: Interpolation) -> Result<Motion> {
        match self {
            AnimationDescription::Curve(curve) => Motion::curve(
                curve.positions.iter().copied().map(Vector3::from).collect(),
                curve.duration,
                interpolation,
            ),
            AnimationDescription::Keyframes(frames) => {
                let times = frames.iter().map(|k| k.time).collect();
                let positions = frames.iter().map(|k| Vector3::from(k.position)).collect();
                let keyframes = Keyframes::new(times, positions, interpolation)?;

                let rotations: Vec<_> = frames.iter().filter_map(|k| k.rotation).collect();
                if rotations.is_empty() {
                    Ok(Motion::Keyframes(keyframes))
                } else if rotations.len() == frames.len() {
                    let rotations = rotations.into_iter().map(degrees_to_radians).collect();
                    Ok(Motion::Keyframes(keyframes.with_rotations(rotations)?))
                } else {
                    Err(StagehandError::InvalidConfiguration(format!(
                        "{} of {} keyframes have a rotation; all or none must",
                        rotations.len(),
                        frames.len()
                    )))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyframeDescription {
    pub time: f32,
    pub position: [f32; 3],
    /// Degrees
    pub rotation: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurveDescription {
    pub positions: Vec<[f32; 3]>,
    #[serde(default = "default_curve_duration")]
    pub duration: f32,
}

fn default_curve_duration() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightDescription {
    pub position: Option<[f32; 3]>,
    pub color: Option<[f32; 3]>,
    pub ambient_strength: Option<f32>,
    pub diffuse_strength: Option<f32>,
    pub specular_strength: Option<f32>,
}

impl LightDescription {
    /// Overrides the fields of `light` that the description sets
    pub fn apply(&self, light: &mut Light) {
        if let Some(position) = self.position {
            light.position = Vector3::from(position);
        }
        if let Some(color) = self.color {
            light.color = Vector3::from(color);
        }
        if let Some(ambient) = self.ambient_strength {
            light.ambient_strength = ambient;
        }
        if let Some(diffuse) = self.diffuse_strength {
            light.diffuse_strength = diffuse;
        }
        if let Some(specular) = self.specular_strength {
            light.specular_strength = specular;
        }
    }
}

fn degrees_to_radians(degrees: [f32; 3]) -> Vector3<f32> {
    let [x, y, z] = degrees.map(|d| Rad::from(Deg(d)).0);
    Vector3::new(x, y, z)
}
