//! Mesh import
//!
//! The scene only needs "a list of meshes per model path". [`MeshLoader`] is
//! that seam; [`ObjLoader`] fills it from Wavefront OBJ/MTL files via `tobj`.

use log::{debug, warn};

use super::object::{Material, Mesh};
use crate::error::{Result, StagehandError};

/// Source of meshes for a model path
pub trait MeshLoader {
    /// Loads every sub-mesh of the model at `path`
    fn load(&self, path: &str) -> Result<Vec<Mesh>>;
}

/// Loads triangulated meshes and their materials from OBJ files
pub struct ObjLoader {
    options: tobj::LoadOptions,
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self {
            options: tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        }
    }
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshLoader for ObjLoader {
    fn load(&self, path: &str) -> Result<Vec<Mesh>> {
        let (models, materials) =
            tobj::load_obj(path, &self.options).map_err(|source| StagehandError::MeshImport {
                path: path.to_string(),
                source,
            })?;

        let materials: Vec<Material> = match materials {
            Ok(materials) => materials.iter().map(Material::from).collect(),
            Err(err) => {
                warn!("No usable MTL file for {}: {}, using default materials", path, err);
                Vec::new()
            }
        };

        debug!(
            "Loaded {}: {} models, {} materials",
            path,
            models.len(),
            materials.len()
        );

        let meshes = models
            .iter()
            .map(|model| {
                let mut mesh = Mesh::new(
                    model.name.clone(),
                    &model.mesh.positions,
                    model.mesh.indices.clone(),
                );
                if let Some(material) = model.mesh.material_id.and_then(|id| materials.get(id)) {
                    mesh.material = material.clone();
                }
                mesh
            })
            .collect();

        Ok(meshes)
    }
}
