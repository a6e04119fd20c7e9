//! # Object Picking System
//!
//! Mouse selection by ray casting against object bounding boxes.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert mouse coordinates to a world-space ray
//! 2. **Ray-Box Intersection**: Test the ray against each object's world bounds
//! 3. **Selection**: Return the closest hit object
//!
//! ## Usage
//!
//! ```no_run
//! use stagehand::gfx::camera::Camera;
//! use stagehand::gfx::picking::ObjectPicker;
//! use stagehand::gfx::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let camera = Camera::default();
//! let mut picker = ObjectPicker::new();
//! if let Some(hit) = picker.pick_object((400.0, 300.0), (800.0, 600.0), &camera, &scene)? {
//!     scene.select(hit.object, false)?;
//! }
//! # Ok::<(), stagehand::StagehandError>(())
//! ```

use std::collections::BTreeMap;

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::error::{Result, StagehandError};
use crate::gfx::camera::Camera;
use crate::gfx::scene::{Object, Scene};
use crate::gfx::transform::ObjectId;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of a set of points, or `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Option<Self> {
        let mut points = points.into_iter().map(Vector3::from);
        let first = points.next()?;

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(Self::new(min, max))
    }

    /// Distance along the ray to the first hit, or `None` if the ray misses
    ///
    /// A ray starting inside the box hits its far side.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of this box after applying `matrix` to its eight corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            [lo.x, lo.y, lo.z],
            [hi.x, lo.y, lo.z],
            [lo.x, hi.y, lo.z],
            [lo.x, lo.y, hi.z],
            [hi.x, hi.y, lo.z],
            [hi.x, lo.y, hi.z],
            [lo.x, hi.y, hi.z],
            [hi.x, hi.y, hi.z],
        ];

        let transformed = corners.iter().map(|&[x, y, z]| {
            let p = matrix * Vector4::new(x, y, z, 1.0);
            [p.x / p.w, p.y / p.w, p.z / p.w]
        });
        // Eight corners are never empty
        Self::from_points(transformed).unwrap_or(*self)
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy)]
pub struct PickResult {
    pub object: ObjectId,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Object picker for 3D mouse selection
///
/// Object-space bounds are cached per object; call
/// [`ObjectPicker::invalidate_object`] when an object's meshes change.
/// Transforms are applied fresh on every pick.
#[derive(Debug, Default)]
pub struct ObjectPicker {
    cached_bounds: BTreeMap<ObjectId, Aabb>,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert screen coordinates (pixels, origin top-left) to a world-space ray
    pub fn screen_to_ray(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &Camera,
    ) -> Result<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return Err(StagehandError::DegenerateInput(format!(
                "screen size {}x{}",
                screen_width, screen_height
            )));
        }

        // Normalized device coordinates (-1 to 1), Y flipped
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

        let inv_view_proj = camera.view_projection_matrix().invert().ok_or_else(|| {
            StagehandError::DegenerateInput("camera view-projection is singular".to_string())
        })?;

        let unproject = |depth: f32| {
            let p = inv_view_proj * Vector4::new(ndc_x, ndc_y, depth, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        Ok(Ray::new(near, far - near))
    }

    /// Closest visible object hit by `ray`
    pub fn pick(&mut self, ray: &Ray, scene: &Scene) -> Option<PickResult> {
        let mut closest: Option<PickResult> = None;

        for (id, object) in scene.objects() {
            if !object.visible {
                continue;
            }
            let Some(bounds) = self.object_bounds(id, object) else {
                continue;
            };

            let world_bounds = bounds.transform(&object.transform.model_matrix());
            if let Some(distance) = world_bounds.intersect_ray(ray) {
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(PickResult {
                        object: id,
                        distance,
                        intersection_point: ray.point_at(distance),
                    });
                }
            }
        }

        closest
    }

    /// Pick an object from the scene using mouse coordinates
    pub fn pick_object(
        &mut self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &Camera,
        scene: &Scene,
    ) -> Result<Option<PickResult>> {
        let ray = self.screen_to_ray(screen_pos, screen_size, camera)?;
        Ok(self.pick(&ray, scene))
    }

    fn object_bounds(&mut self, id: ObjectId, object: &Object) -> Option<Aabb> {
        if let Some(bounds) = self.cached_bounds.get(&id) {
            return Some(*bounds);
        }
        let bounds = Aabb::from_points(object.vertices())?;
        self.cached_bounds.insert(id, bounds);
        Some(bounds)
    }

    /// Invalidate all cached bounds
    pub fn invalidate_cache(&mut self) {
        self.cached_bounds.clear();
    }

    pub fn invalidate_object(&mut self, id: ObjectId) {
        self.cached_bounds.remove(&id);
    }
}
