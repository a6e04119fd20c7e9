//! Editor panels
//!
//! The transform panel edits the scene selection through its group handle.
//! Slider values persist across frames in a caller-owned
//! [`TransformPanelState`]; each frame only their change since the previous
//! frame is pushed to the selected objects, at most once.

use cgmath::{Deg, Rad, Vector3};
use log::error;

use crate::gfx::scene::Scene;
use crate::gfx::transform::{ObjectId, Transform, Transformable};

/// Slider state for the selection handle; rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEdit {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl From<&Transform> for TransformEdit {
    fn from(transform: &Transform) -> Self {
        let degrees = |r: f32| Deg::from(Rad(r)).0;
        let (p, r, s) = (transform.position, transform.rotation, transform.scale);
        Self {
            position: [p.x, p.y, p.z],
            rotation: [degrees(r.x), degrees(r.y), degrees(r.z)],
            scale: [s.x, s.y, s.z],
        }
    }
}

impl TransformEdit {
    /// Adds the change from `previous` to these values onto the selection
    /// handle and applies it
    ///
    /// Returns how many objects were written.
    pub fn apply_change(&self, previous: &TransformEdit, scene: &mut Scene) -> usize {
        let delta = |now: [f32; 3], before: [f32; 3]| Vector3::from(now) - Vector3::from(before);
        let radians = |d: f32| Rad::from(Deg(d)).0;
        let turn = delta(self.rotation, previous.rotation);

        let handle = scene.selection_mut().transform_mut();
        handle.position += delta(self.position, previous.position);
        handle.rotation += Vector3::new(radians(turn.x), radians(turn.y), radians(turn.z));
        handle.scale += delta(self.scale, previous.scale);
        scene.apply_selection_edits()
    }
}

/// Slider values of the transform panel, kept between frames
///
/// A held slider reports the same value every frame. Only the difference to
/// the values of the previous frame reaches the selection.
#[derive(Debug, Clone, Default)]
pub struct TransformPanelState {
    values: Option<TransformEdit>,
    /// Selection the values were read for
    selection: Vec<ObjectId>,
    dragging: bool,
}

impl TransformPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slider values to show this frame
    ///
    /// Kept from the previous frame while a drag on the same selection is in
    /// progress, otherwise re-read from the selection handle.
    pub fn values(&mut self, scene: &Scene) -> TransformEdit {
        let selection: Vec<ObjectId> = scene.selection().ids().collect();
        if selection != self.selection {
            self.selection = selection;
            self.dragging = false;
        }

        match self.values {
            Some(values) if self.dragging => values,
            _ => {
                let values = TransformEdit::from(scene.selection().transform());
                self.values = Some(values);
                values
            }
        }
    }

    /// Applies what changed between the previous values and `edited`
    ///
    /// Returns how many objects were written.
    pub fn commit(&mut self, edited: TransformEdit, scene: &mut Scene) -> usize {
        let previous = self
            .values
            .unwrap_or_else(|| TransformEdit::from(scene.selection().transform()));
        self.values = Some(edited);
        if edited == previous {
            return 0;
        }
        edited.apply_change(&previous, scene)
    }

    /// Records whether a slider is still held once this frame's widgets ran
    pub fn end_frame(&mut self, dragging: bool) {
        self.dragging = dragging;
    }
}

/// Handles a click on an object in the list
///
/// A plain click replaces the selection; with `toggle` the object is added
/// to or removed from it.
pub fn click_object(scene: &mut Scene, id: ObjectId, toggle: bool) {
    let result = if toggle && scene.selection().contains(id) {
        scene.deselect(id)
    } else {
        scene.select(id, toggle)
    };
    if let Err(err) = result {
        error!("Selection failed: {}", err);
    }
}

/// Default transform panel for the scene selection
///
/// `state` must be the same value every frame. Returns `true` if a slider
/// edit was applied to the selected objects this frame.
pub fn transform_panel(ui: &imgui::Ui, scene: &mut Scene, state: &mut TransformPanelState) -> bool {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }
    let panel_width = (display_size[0] * 0.3).clamp(300.0, 450.0);
    let panel_height = (display_size[1] * 0.85).max(400.0);

    ui.window("Transform Studio")
        .size([panel_width, panel_height], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            render_object_list(ui, scene);
            ui.separator();
            let applied = render_transform_controls(ui, scene, state);
            render_scene_info(ui, scene);
            applied
        })
        .unwrap_or(false)
}

fn render_object_list(ui: &imgui::Ui, scene: &mut Scene) {
    ui.text("Scene Objects");
    ui.separator();

    if scene.object_count() == 0 {
        ui.text("No Objects");
        return;
    }

    let entries: Vec<(ObjectId, String, bool)> = scene
        .objects()
        .map(|(id, object)| (id, object.name.clone(), scene.selection().contains(id)))
        .collect();
    let toggle = ui.io().key_ctrl;

    ui.child_window("object_list")
        .size([0.0, 150.0])
        .border(true)
        .build(|| {
            for (id, name, selected) in &entries {
                if ui
                    .selectable_config(format!("{}##{}", name, id.0))
                    .selected(*selected)
                    .build()
                {
                    click_object(scene, *id, toggle);
                }
            }
        });
}

fn render_transform_controls(
    ui: &imgui::Ui,
    scene: &mut Scene,
    state: &mut TransformPanelState,
) -> bool {
    let selection = scene.selection();
    if selection.empty() {
        ui.text("Click an object to select it");
        return false;
    }

    let single = (selection.size() == 1)
        .then(|| selection.ids().next())
        .flatten();
    match single.and_then(|id| scene.object(id)) {
        Some(object) => ui.text(format!("Selected: {}", object.name)),
        None => ui.text(format!("Selected: {} objects", selection.size())),
    }

    let mut edit = state.values(scene);
    let mut changed = false;
    changed |= axis_sliders(ui, "Position", "pos", -10.0, 10.0, &mut edit.position);
    changed |= axis_sliders(ui, "Rotation", "rot", -180.0, 180.0, &mut edit.rotation);
    changed |= axis_sliders(ui, "Scale", "scale", 0.1, 5.0, &mut edit.scale);

    let applied = changed && state.commit(edit, scene) > 0;
    state.end_frame(ui.is_any_item_active());

    ui.spacing();
    ui.separator();
    if let Some(object) = single.and_then(|id| scene.object_mut(id)) {
        ui.checkbox("Visible in Scene", &mut object.visible);
    }
    if ui.button("Delete Selected") {
        if let Err(err) = scene.delete_selected_objects() {
            error!("Delete failed: {}", err);
        }
    }
    ui.same_line();
    if ui.button("Deselect") {
        scene.clear_selection();
    }

    applied
}

/// One slider per axis under a collapsing header; true if any moved
fn axis_sliders(
    ui: &imgui::Ui,
    header: &str,
    id: &str,
    min: f32,
    max: f32,
    values: &mut [f32; 3],
) -> bool {
    if !ui.collapsing_header(header, imgui::TreeNodeFlags::DEFAULT_OPEN) {
        return false;
    }

    let mut changed = false;
    for (axis, value) in ["X", "Y", "Z"].iter().zip(values.iter_mut()) {
        changed |= ui.slider(format!("{}##{}_{}", axis, id, axis), min, max, value);
    }
    changed
}

fn render_scene_info(ui: &imgui::Ui, scene: &Scene) {
    let stats = scene.statistics();
    ui.separator();
    ui.text("Scene Statistics");
    ui.text(format!("Objects: {}", stats.object_count));
    ui.text(format!("Animations: {}", stats.animation_count));
    ui.text(format!("Triangles: {}", stats.total_triangles));
    ui.text(format!("Vertices: {}", stats.total_vertices));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Object;
    use approx::assert_relative_eq;

    fn scene_with(count: usize) -> (Scene, Vec<ObjectId>) {
        let mut scene = Scene::new();
        let ids = (0..count)
            .map(|i| scene.add_object(Object::new(format!("object {}", i), vec![])))
            .collect();
        (scene, ids)
    }

    #[test]
    fn test_click_replaces_or_toggles() {
        let (mut scene, ids) = scene_with(3);

        click_object(&mut scene, ids[0], false);
        click_object(&mut scene, ids[1], false);
        assert_eq!(scene.selection().ids().collect::<Vec<_>>(), vec![ids[1]]);

        click_object(&mut scene, ids[2], true);
        assert_eq!(scene.selection().size(), 2);

        click_object(&mut scene, ids[1], true);
        assert_eq!(scene.selection().ids().collect::<Vec<_>>(), vec![ids[2]]);
    }

    #[test]
    fn test_edit_on_single_selection_sets_object() {
        let (mut scene, ids) = scene_with(1);
        click_object(&mut scene, ids[0], false);

        let before = TransformEdit::from(scene.selection().transform());
        assert_eq!(before.scale, [1.0, 1.0, 1.0]);
        let mut edit = before;
        edit.position = [1.0, 2.0, 3.0];
        edit.rotation = [0.0, 90.0, 0.0];

        assert_eq!(edit.apply_change(&before, &mut scene), 1);
        let object = scene.object(ids[0]).unwrap();
        assert_eq!(object.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(object.rotation().y, std::f32::consts::FRAC_PI_2);

        // Reading the handle back yields the same slider values
        let round_trip = TransformEdit::from(scene.selection().transform());
        assert_relative_eq!(round_trip.rotation[1], 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_edit_on_multi_selection_is_relative() {
        let (mut scene, ids) = scene_with(2);
        scene.object_mut(ids[1]).unwrap().set_position(Vector3::new(5.0, 0.0, 0.0));
        click_object(&mut scene, ids[0], false);
        click_object(&mut scene, ids[1], true);

        let before = TransformEdit::from(scene.selection().transform());
        let mut edit = before;
        edit.position[1] = 1.0;
        edit.scale[0] = 2.0;
        assert_eq!(edit.apply_change(&before, &mut scene), 2);

        assert_eq!(scene.object(ids[0]).unwrap().position(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(scene.object(ids[1]).unwrap().position(), Vector3::new(5.0, 1.0, 0.0));
        assert_eq!(scene.object(ids[1]).unwrap().scale(), Vector3::new(2.0, 1.0, 1.0));
        assert_eq!(
            TransformEdit::from(scene.selection().transform()).position,
            [0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_held_slider_moves_selection_once() {
        let (mut scene, ids) = scene_with(2);
        click_object(&mut scene, ids[0], false);
        click_object(&mut scene, ids[1], true);
        let mut state = TransformPanelState::new();

        // Two frames of a drag holding X at 0.5
        let mut written = Vec::new();
        for _ in 0..2 {
            let mut values = state.values(&scene);
            values.position[0] = 0.5;
            written.push(state.commit(values, &mut scene));
            state.end_frame(true);
        }
        assert_eq!(written, vec![2, 0]);
        for id in &ids {
            assert_eq!(scene.object(*id).unwrap().position(), Vector3::new(0.5, 0.0, 0.0));
        }

        // Dragging further applies only the extra distance
        let mut values = state.values(&scene);
        assert_eq!(values.position[0], 0.5);
        values.position[0] = 0.75;
        assert_eq!(state.commit(values, &mut scene), 2);
        assert_eq!(scene.object(ids[1]).unwrap().position(), Vector3::new(0.75, 0.0, 0.0));

        // Once released the sliders rest at the handle again
        state.end_frame(false);
        assert_eq!(state.values(&scene).position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_selection_change_rereads_slider_values() {
        let (mut scene, ids) = scene_with(2);
        scene.object_mut(ids[1]).unwrap().set_position(Vector3::new(3.0, 0.0, 0.0));
        click_object(&mut scene, ids[0], false);
        let mut state = TransformPanelState::new();

        let mut values = state.values(&scene);
        values.position[2] = 1.0;
        assert_eq!(state.commit(values, &mut scene), 1);
        state.end_frame(true);

        click_object(&mut scene, ids[1], false);
        assert_eq!(state.values(&scene).position, [3.0, 0.0, 0.0]);
        assert_eq!(scene.object(ids[1]).unwrap().position(), Vector3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_panel_renders_headless_without_edits() {
        let (mut scene, ids) = scene_with(2);
        click_object(&mut scene, ids[0], false);
        let mut state = TransformPanelState::new();

        let mut ctx = imgui::Context::create();
        ctx.set_ini_filename(None);
        ctx.io_mut().display_size = [1280.0, 720.0];
        ctx.fonts().build_rgba32_texture();

        let ui = ctx.new_frame();
        let applied = transform_panel(ui, &mut scene, &mut state);
        ctx.render();

        assert!(!applied);
        assert_eq!(scene.object(ids[0]).unwrap().position(), Vector3::new(0.0, 0.0, 0.0));
        assert!(scene.selection().contains(ids[0]));
    }
}
