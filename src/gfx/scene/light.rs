use cgmath::Vector3;

use crate::error::Result;
use crate::gfx::transform::Transform;

/// Point light feeding the Phong shading terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub specular_strength: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector3::new(1.2, 2.0, 4.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            ambient_strength: 0.3,
            diffuse_strength: 0.5,
            specular_strength: 0.5,
        }
    }
}

impl Light {
    pub fn ambient(&self) -> Vector3<f32> {
        self.color * self.ambient_strength
    }

    pub fn diffuse(&self) -> Vector3<f32> {
        self.color * self.diffuse_strength
    }

    pub fn specular(&self) -> Vector3<f32> {
        self.color * self.specular_strength
    }

    /// Light position expressed in the local space of an object
    ///
    /// Fails for objects with a degenerate (zero) scale.
    pub fn position_in(&self, transform: &Transform) -> Result<Vector3<f32>> {
        let inverse = transform.inverse_model_matrix()?;
        let local = inverse * self.position.extend(1.0);
        Ok(local.truncate() / local.w)
    }
}
