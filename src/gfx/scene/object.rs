use crate::gfx::transform::{Transform, Transformable};

/// Phong surface parameters of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            ambient: [1.0, 1.0, 1.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            shininess: 1.0,
            opacity: 1.0,
        }
    }
}

impl From<&tobj::Material> for Material {
    fn from(mtl: &tobj::Material) -> Self {
        let defaults = Material::default();
        Self {
            name: mtl.name.clone(),
            ambient: mtl.ambient.unwrap_or(defaults.ambient),
            diffuse: mtl.diffuse.unwrap_or(defaults.diffuse),
            specular: mtl.specular.unwrap_or(defaults.specular),
            shininess: mtl.shininess.unwrap_or(defaults.shininess),
            opacity: mtl.dissolve.unwrap_or(defaults.opacity), // Alpha from dissolve
        }
    }
}

/// Triangle mesh imported from a model file
///
/// Only what the editor needs is kept: vertex positions for picking bounds,
/// triangle indices for statistics, and the surface material.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    /// Builds a mesh from flat `xyz` position triples
    pub fn new(name: impl Into<String>, positions: &[f32], indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions: positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect(),
            indices,
            material: Material::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A named, transformable set of meshes in the scene
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    pub visible: bool,
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            transform: Transform::identity(),
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// All vertex positions in object space
    pub fn vertices(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.meshes.iter().flat_map(|m| m.positions.iter().copied())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }
}

impl Transformable for Object {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
