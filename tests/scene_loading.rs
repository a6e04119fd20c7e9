use std::cell::RefCell;

use approx::assert_relative_eq;
use cgmath::Vector3;
use stagehand::gfx::scene::{Mesh, MeshLoader, ObjLoader, Scene};
use stagehand::gfx::transform::Transformable;
use stagehand::StagehandError;

/// Serves a single triangle for every path except those containing "broken"
#[derive(Default)]
struct StubLoader {
    requested: RefCell<Vec<String>>,
}

impl MeshLoader for StubLoader {
    fn load(&self, path: &str) -> stagehand::Result<Vec<Mesh>> {
        self.requested.borrow_mut().push(path.to_string());
        if path.contains("broken") {
            return Err(StagehandError::InvalidConfiguration(format!("cannot read {}", path)));
        }
        Ok(vec![Mesh::new(
            "triangle",
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        )])
    }
}

/// Serves a model made of two sub-meshes
struct TwoMeshLoader;

impl MeshLoader for TwoMeshLoader {
    fn load(&self, _path: &str) -> stagehand::Result<Vec<Mesh>> {
        let triangle = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        Ok(vec![
            Mesh::new("body", &triangle, vec![0, 1, 2]),
            Mesh::new("wheel", &triangle, vec![0, 1, 2]),
        ])
    }
}

const SCENE: &str = r#"{
    "scene": {
        "objects": [
            {
                "path": "models/cube.obj",
                "initialPosition": [1, 0, 0],
                "initialRotation": [90, 0, 0],
                "loopedAnimation": [
                    {"time": 0, "position": [0, 0, 0]},
                    {"time": 1, "position": [0, 3, 0]}
                ]
            },
            { "initialPosition": [5, 5, 5] },
            { "path": "models/broken.obj" },
            {
                "path": "models/cube.obj",
                "animation": [
                    {"time": 1, "position": [0, 0, 0]},
                    {"time": 0, "position": [1, 0, 0]}
                ]
            },
            { "path": "models/plane.obj", "name": "floor", "initialScale": [10, 1, 10] }
        ],
        "light": { "position": [0, 10, 0], "diffuseStrength": 0.8 }
    }
}"#;

#[test]
fn test_scene_from_json_skips_unloadable_objects() {
    let loader = StubLoader::default();
    let scene = Scene::from_json(SCENE, &loader).unwrap();

    // The path-less object never reaches the loader
    assert_eq!(
        *loader.requested.borrow(),
        vec!["models/cube.obj", "models/broken.obj", "models/cube.obj", "models/plane.obj"]
    );
    assert_eq!(scene.object_names(), vec!["cube", "cube (1)", "floor"]);

    let ids = scene.object_ids();
    let first = scene.object(ids[0]).unwrap();
    assert_eq!(first.position(), Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(first.rotation().x, std::f32::consts::FRAC_PI_2);
    assert_eq!(scene.object(ids[2]).unwrap().scale(), Vector3::new(10.0, 1.0, 10.0));

    // Out-of-order keyframes leave the second cube static
    assert_eq!(scene.animations().len(), 1);
    assert!(scene.animations()[0].is_looped());
    assert!(scene.animations()[0].target().contains(ids[0]));

    assert_eq!(scene.light.position, Vector3::new(0.0, 10.0, 0.0));
    assert_eq!(scene.light.diffuse_strength, 0.8);
    assert_eq!(scene.light.ambient_strength, 0.3);
}

#[test]
fn test_loaded_animation_plays_from_initial_position() {
    let mut scene = Scene::from_json(SCENE, &StubLoader::default()).unwrap();
    let id = scene.object_ids()[0];

    for tick in 0..=30 {
        scene.animate(f64::from(tick) / 60.0);
    }
    assert_relative_eq!(
        scene.object(id).unwrap().position(),
        Vector3::new(1.0, 1.5, 0.0),
        epsilon = 1e-4
    );
}

#[test]
fn test_sub_meshes_become_objects_animated_together() {
    let json = r#"{
        "scene": {
            "objects": [{
                "path": "models/car.obj",
                "initialPosition": [1, 0, 0],
                "animation": [
                    {"time": 0, "position": [0, 0, 0]},
                    {"time": 1, "position": [0, 3, 0]}
                ]
            }]
        }
    }"#;
    let mut scene = Scene::from_json(json, &TwoMeshLoader).unwrap();

    assert_eq!(scene.object_count(), 2);
    assert_eq!(scene.object_names(), vec!["car/body", "car/wheel"]);
    assert_eq!(scene.animations().len(), 1);
    assert_eq!(scene.animations()[0].target().size(), 2);

    let ids = scene.object_ids();
    scene
        .object_mut(ids[1])
        .unwrap()
        .set_position(Vector3::new(-4.0, 0.0, 2.0));
    let start: Vec<_> = ids.iter().map(|id| scene.object(*id).unwrap().position()).collect();

    for tick in 0..=30 {
        scene.animate(f64::from(tick) / 60.0);
    }
    for (id, start) in ids.iter().zip(start) {
        assert_relative_eq!(
            scene.object(*id).unwrap().position() - start,
            Vector3::new(0.0, 1.5, 0.0),
            epsilon = 1e-4
        );
    }
}

#[test]
fn test_load_model_adds_one_object_per_mesh() {
    let mut scene = Scene::new();
    let ids = scene.load_model("models/car.obj", &TwoMeshLoader).unwrap();

    assert_eq!(ids, scene.object_ids());
    assert_eq!(scene.object(ids[1]).unwrap().name, "car/wheel");
    assert_eq!(scene.object(ids[0]).unwrap().meshes.len(), 1);
}

#[test]
fn test_invalid_documents_are_rejected() {
    let loader = StubLoader::default();
    assert!(matches!(
        Scene::from_json("{\"scene\": {\"objects\": 3}}", &loader),
        Err(StagehandError::SceneFormat(_))
    ));
    assert!(matches!(
        Scene::load("no/such/scene.json", &loader),
        Err(StagehandError::Io { .. })
    ));
}

#[test]
fn test_obj_loader_reads_cube_with_material() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/assets/cube.obj");
    let meshes = ObjLoader::new().load(path).unwrap();

    assert_eq!(meshes.len(), 1);
    let cube = &meshes[0];
    assert_eq!(cube.vertex_count(), 8);
    assert_eq!(cube.triangle_count(), 12);
    assert_eq!(cube.material.name, "orange");
    assert_relative_eq!(cube.material.shininess, 32.0);
}

#[test]
fn test_demo_scene_loads() {
    let json = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/assets/scene.json")).unwrap();
    let scene = Scene::from_json(&json, &StubLoader::default()).unwrap();

    assert_eq!(scene.object_count(), 4);
    assert_eq!(scene.animations().len(), 3);
}
