use std::collections::BTreeMap;
use std::fmt;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Zero};

use crate::error::{Result, StagehandError};

/// Identifier of an object in the scene arena.
///
/// Ids are handed out by the owner of the objects and are never reused while
/// the owner is alive, so a stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Spatial state of a single entity
///
/// Rotation is stored as Euler angles in radians and accumulates without
/// wrapping. No validation is performed on any field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Euler angles (radians), applied X then Y then Z
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Pivot point for rotation and scale, in local space
    pub origin: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform: no translation, no rotation, unit scale
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            origin: Vector3::zero(),
        }
    }

    /// Builds a transform from position, rotation (radians) and scale
    pub fn from_prs(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
            origin: Vector3::zero(),
        }
    }

    /// A zero scale component collapses the model matrix
    pub fn is_degenerate(&self) -> bool {
        self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0
    }

    /// Model matrix: `T(position) * T(origin) * Rx * Ry * Rz * S * T(-origin)`
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let pivot = Matrix4::from_translation(self.origin);
        let unpivot = Matrix4::from_translation(-self.origin);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * pivot * r * s * unpivot // Order matters
    }

    /// Inverse of [`Transform::model_matrix`]
    ///
    /// Used to bring world-space quantities (light position, pick rays) into
    /// object space. Fails on degenerate scale instead of producing NaNs.
    pub fn inverse_model_matrix(&self) -> Result<Matrix4<f32>> {
        if self.is_degenerate() {
            return Err(StagehandError::DegenerateInput(format!(
                "scale {:?} has a zero component",
                self.scale
            )));
        }
        self.model_matrix().invert().ok_or_else(|| {
            StagehandError::DegenerateInput("model matrix is not invertible".to_string())
        })
    }
}

/// An entity with position, rotation, scale and origin
///
/// Implementors only expose their [`Transform`]; every getter, setter and
/// incremental mutator is provided on top of that.
pub trait Transformable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn position(&self) -> Vector3<f32> {
        self.transform().position
    }

    fn rotation(&self) -> Vector3<f32> {
        self.transform().rotation
    }

    fn scale(&self) -> Vector3<f32> {
        self.transform().scale
    }

    fn origin(&self) -> Vector3<f32> {
        self.transform().origin
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.transform_mut().position = position;
    }

    /// Sets the Euler rotation in radians
    fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.transform_mut().rotation = rotation;
    }

    fn set_scale(&mut self, scale: Vector3<f32>) {
        self.transform_mut().scale = scale;
    }

    fn set_origin(&mut self, origin: Vector3<f32>) {
        self.transform_mut().origin = origin;
    }

    /// Adds a translation delta on every axis
    fn move_by(&mut self, x: f32, y: f32, z: f32) {
        self.move_x(x);
        self.move_y(y);
        self.move_z(z);
    }

    fn move_x(&mut self, movement: f32) {
        self.transform_mut().position.x += movement;
    }

    fn move_y(&mut self, movement: f32) {
        self.transform_mut().position.y += movement;
    }

    fn move_z(&mut self, movement: f32) {
        self.transform_mut().position.z += movement;
    }

    /// Adds a rotation delta (radians) on every axis
    fn rotate(&mut self, x: f32, y: f32, z: f32) {
        self.rotate_x(x);
        self.rotate_y(y);
        self.rotate_z(z);
    }

    fn rotate_x(&mut self, angle: f32) {
        self.transform_mut().rotation.x += angle;
    }

    fn rotate_y(&mut self, angle: f32) {
        self.transform_mut().rotation.y += angle;
    }

    fn rotate_z(&mut self, angle: f32) {
        self.transform_mut().rotation.z += angle;
    }
}

impl Transformable for Transform {
    fn transform(&self) -> &Transform {
        self
    }

    fn transform_mut(&mut self) -> &mut Transform {
        self
    }
}

/// Non-owning access to transforms by object id
///
/// A [`TransformableGroup`](super::TransformableGroup) only remembers ids; the
/// store that owns the objects is handed in whenever the group needs to read
/// or write a member.
pub trait TransformStore {
    fn transform(&self, id: ObjectId) -> Option<&Transform>;
    fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform>;
}

impl<T: Transformable> TransformStore for BTreeMap<ObjectId, T> {
    fn transform(&self, id: ObjectId) -> Option<&Transform> {
        self.get(&id).map(Transformable::transform)
    }

    fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.get_mut(&id).map(Transformable::transform_mut)
    }
}
