use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, error, info, warn};

use super::description::{ObjectDescription, SceneDescription, SceneFile};
use super::light::Light;
use super::loader::MeshLoader;
use super::object::Object;
use crate::error::{Result, StagehandError};
use crate::gfx::animation::{Animation, Motion};
use crate::gfx::transform::{ObjectId, Transform, TransformableGroup};

/// Objects, their animations, the light and the editor selection
///
/// Objects live in an id-keyed arena. Groups (the selection and every
/// animation target) refer to objects by [`ObjectId`] only, and
/// [`Scene::remove_object`] prunes those references before the object goes
/// away.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, Object>,
    next_id: u32,
    animations: Vec<Animation>,
    pub light: Light,
    selection: TransformableGroup,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON scene file and builds it with `loader`
    pub fn load(path: impl AsRef<Path>, loader: &impl MeshLoader) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StagehandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loading scene {}", path.display());
        Self::from_json(&json, loader)
    }

    pub fn from_json(json: &str, loader: &impl MeshLoader) -> Result<Self> {
        let description = SceneFile::parse(json)?;
        Ok(Self::from_description(&description, loader))
    }

    /// Builds a scene from an already parsed description
    ///
    /// Objects without a path or whose model fails to load are skipped.
    /// Objects with an invalid animation are kept, but stay static.
    pub fn from_description(description: &SceneDescription, loader: &impl MeshLoader) -> Self {
        let mut scene = Self::new();
        if let Some(light) = &description.light {
            light.apply(&mut scene.light);
        }

        for (index, object) in description.objects.iter().enumerate() {
            if let Err(err) = scene.add_described(object, loader) {
                error!("Skipping scene object {}: {}", index, err);
            }
        }

        info!(
            "Scene ready: {} objects, {} animations",
            scene.object_count(),
            scene.animations.len()
        );
        scene
    }

    fn add_described(&mut self, object: &ObjectDescription, loader: &impl MeshLoader) -> Result<()> {
        let path = object.path.as_deref().ok_or_else(|| {
            StagehandError::InvalidConfiguration("object has no \"path\"".to_string())
        })?;
        let name = object.name.clone().unwrap_or_else(|| file_stem(path));
        let ids = self.add_model(path, &name, object.initial_transform(), loader)?;

        let animated = object.motion().and_then(|motion| match motion {
            Some((motion, looped)) => self.animate_objects(&ids, motion, looped),
            None => Ok(()),
        });
        if let Err(err) = animated {
            error!("Animation for {} ignored: {}", path, err);
        }
        Ok(())
    }

    /// Adds an object and returns its id, renaming it if the name is taken
    pub fn add_object(&mut self, mut object: Object) -> ObjectId {
        object.name = self.ensure_unique_name(&object.name);

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        debug!("Added object {} as {}", object.name, id);
        self.objects.insert(id, object);
        id
    }

    /// Loads a model through `loader` with an identity transform
    ///
    /// Every sub-mesh becomes its own object; their ids are returned in
    /// load order.
    pub fn load_model(&mut self, path: &str, loader: &impl MeshLoader) -> Result<Vec<ObjectId>> {
        self.add_model(path, &file_stem(path), Transform::identity(), loader)
    }

    /// One object per sub-mesh, named `name` for a single mesh and
    /// `name/mesh` otherwise
    fn add_model(
        &mut self,
        path: &str,
        name: &str,
        transform: Transform,
        loader: &impl MeshLoader,
    ) -> Result<Vec<ObjectId>> {
        let meshes = loader.load(path)?;
        if meshes.is_empty() {
            return Err(StagehandError::InvalidConfiguration(format!(
                "{path} contains no meshes"
            )));
        }

        let single = meshes.len() == 1;
        let ids = meshes
            .into_iter()
            .enumerate()
            .map(|(index, mesh)| {
                let object_name = match (single, mesh.name.is_empty()) {
                    (true, _) => name.to_string(),
                    (false, false) => format!("{}/{}", name, mesh.name),
                    (false, true) => format!("{}/{}", name, index),
                };
                self.add_object(Object::new(object_name, vec![mesh]).with_transform(transform))
            })
            .collect();
        Ok(ids)
    }

    /// Plays `motion` on a single object
    pub fn animate_object(&mut self, id: ObjectId, motion: Motion, looped: bool) -> Result<()> {
        self.animate_objects(&[id], motion, looped)
    }

    /// Plays `motion` on several objects moving together as one group
    pub fn animate_objects(&mut self, ids: &[ObjectId], motion: Motion, looped: bool) -> Result<()> {
        let mut target = TransformableGroup::new();
        for &id in ids {
            target.add(id, &self.objects)?;
        }
        self.add_animation(Animation::new(motion, looped, target)?)
    }

    /// Registers an animation whose target members all exist in this scene
    pub fn add_animation(&mut self, animation: Animation) -> Result<()> {
        if let Some(missing) = animation
            .target()
            .ids()
            .find(|id| !self.objects.contains_key(id))
        {
            return Err(StagehandError::NotFound(missing));
        }
        self.animations.push(animation);
        Ok(())
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Mutable access to an object
    ///
    /// Edits made here bypass the selection handle; call
    /// [`TransformableGroup::sync`] on [`Scene::selection_mut`] afterwards if
    /// the object is selected.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> + '_ {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects.values().map(|obj| obj.name.clone()).collect()
    }

    /// Removes an object after dropping it from the selection and from
    /// every animation target
    ///
    /// Animations left without members are discarded.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Object> {
        if !self.objects.contains_key(&id) {
            return Err(StagehandError::NotFound(id));
        }

        if self.selection.contains(id) {
            self.selection.remove(id, &self.objects)?;
        }
        for animation in &mut self.animations {
            if animation.target().contains(id) {
                animation.target_mut().remove(id, &self.objects)?;
            }
        }
        let before = self.animations.len();
        self.animations.retain(|animation| !animation.target().empty());
        if self.animations.len() != before {
            debug!("Dropped {} animations without targets", before - self.animations.len());
        }

        self.objects.remove(&id).ok_or(StagehandError::NotFound(id))
    }

    pub fn selection(&self) -> &TransformableGroup {
        &self.selection
    }

    /// The selection handle, for editing
    ///
    /// Follow edits with [`Scene::apply_selection_edits`].
    pub fn selection_mut(&mut self) -> &mut TransformableGroup {
        &mut self.selection
    }

    /// Selects an object, replacing the selection unless `additive`
    pub fn select(&mut self, id: ObjectId, additive: bool) -> Result<()> {
        if !additive {
            self.selection.clear();
        }
        self.selection.add(id, &self.objects)
    }

    pub fn deselect(&mut self, id: ObjectId) -> Result<()> {
        self.selection.remove(id, &self.objects)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes every selected object and returns how many were removed
    pub fn delete_selected_objects(&mut self) -> Result<usize> {
        let selected: Vec<ObjectId> = self.selection.ids().collect();
        for &id in &selected {
            let object = self.remove_object(id)?;
            info!("Deleted object {}", object.name);
        }
        Ok(selected.len())
    }

    /// Pushes a pending edit of the selection handle into the selected objects
    pub fn apply_selection_edits(&mut self) -> usize {
        self.selection.update(&mut self.objects)
    }

    /// Steps every animation to wall-clock time `now` (in seconds)
    ///
    /// Returns how many animations advanced a frame.
    pub fn animate(&mut self, now: f64) -> usize {
        let mut stepped = 0;
        for animation in &mut self.animations {
            if animation.animate(now, &mut self.objects) {
                stepped += 1;
            }
        }

        if stepped > 0 && !self.selection.has_pending_edit() {
            self.selection.sync(&self.objects);
        }
        stepped
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            animation_count: self.animations.len(),
            total_triangles: self.objects.values().map(Object::triangle_count).sum(),
            total_vertices: self.objects.values().map(Object::vertex_count).sum(),
        }
    }

    fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.values().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        if counter > 0 {
            warn!("Object name {} already used, renamed to {}", desired_name, test_name);
        }
        test_name
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub animation_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
