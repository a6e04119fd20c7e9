//! # Stagehand Playback Example
//!
//! Loads a scene description and plays its animations on a simulated clock,
//! logging where every object ends up.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example playback -- demos/assets/scene.json 3
//! ```
//!
//! The first argument is the scene file, the second how many seconds to play.

use anyhow::{Context, Result};
use log::info;
use stagehand::gfx::animation::FRAME_RATE;
use stagehand::prelude::*;

const DEFAULT_SCENE: &str = "demos/assets/scene.json";
const DEFAULT_SECONDS: f64 = 3.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let seconds = match args.next() {
        Some(arg) => arg
            .parse::<f64>()
            .with_context(|| format!("invalid duration {:?}", arg))?,
        None => DEFAULT_SECONDS,
    };

    let mut scene = Scene::load(&scene_path, &ObjLoader::new())
        .with_context(|| format!("failed to load scene {}", scene_path))?;
    let stats = scene.statistics();
    info!(
        "{} objects, {} animations, {} triangles",
        stats.object_count, stats.animation_count, stats.total_triangles
    );

    // Render loop stand-in: one tick per virtual frame, logging twice a second
    let ticks = (seconds * f64::from(FRAME_RATE)).round() as u32;
    for tick in 0..=ticks {
        let now = f64::from(tick) / f64::from(FRAME_RATE);
        scene.animate(now);

        if tick % (FRAME_RATE / 2) == 0 {
            for (_, object) in scene.objects() {
                let p = object.position();
                info!("t={:5.2}s {:<12} ({:7.3}, {:7.3}, {:7.3})", now, object.name, p.x, p.y, p.z);
            }
        }
    }

    // Nudge everything up through the selection handle, as the editor would
    for id in scene.object_ids() {
        scene.select(id, true)?;
    }
    scene.selection_mut().move_y(1.0);
    let moved = scene.apply_selection_edits();
    info!("Moved {} objects up by one unit", moved);

    Ok(())
}
