//! Scene bridge - particle field lifecycle and the per-frame tick
//!
//! Owns the particle cloud, the morph engine, and the precomputed
//! heart target. JavaScript only sequences: init once, trigger the
//! morph when the intro finishes, and call `frame_update` from its
//! requestAnimationFrame loop.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::particles::{
    generate_heart_points, spawn_base_cloud, HeartConfig, MorphEngine, ParticleCloud,
    RandomSource, RegionConfig, PARTICLE_COUNT,
};
use crate::renderer;

/// Default morph duration, matching the original choreography
const MORPH_DURATION_MS: f32 = 3000.0;

/// `Math.random` as a RandomSource
struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f32(&mut self) -> f32 {
        js_sys::Math::random() as f32
    }
}

struct SceneState {
    cloud: ParticleCloud,
    engine: MorphEngine,
    /// Precomputed at init so the morph trigger never stalls a frame
    heart_target: Vec<f32>,
    last_time: Option<f64>,
}

thread_local! {
    static SCENE: RefCell<Option<SceneState>> = RefCell::new(None);
}

/// Pad a short sample by cycling the accepted points so the target
/// always matches the cloud's cardinality. Returns None when nothing
/// was accepted at all.
fn pad_by_cycling(mut points: Vec<f32>, expected: usize) -> Option<Vec<f32>> {
    if points.is_empty() {
        return None;
    }
    let mut i = 0;
    while points.len() < expected {
        points.push(points[i]);
        i += 1;
    }
    points.truncate(expected);
    Some(points)
}

/// Build the base cloud, precompute the heart target, and upload the
/// static particle attributes. Call once after `init`.
#[wasm_bindgen]
pub fn init_scene() {
    let mut rng = JsRandom;
    let cloud = spawn_base_cloud(PARTICLE_COUNT, &RegionConfig::default(), &mut rng);

    let sampled = generate_heart_points(PARTICLE_COUNT, &HeartConfig::default(), &mut rng);
    let heart_target = match pad_by_cycling(sampled, cloud.positions.len()) {
        Some(target) => target,
        None => {
            // Degenerate sampler output: hold the sphere instead
            web_sys::console::warn_1(&"Heart sampling yielded no points; morph disabled".into());
            cloud.positions.clone()
        }
    };
    if heart_target.len() != PARTICLE_COUNT * 3 {
        web_sys::console::warn_1(&"Heart sampling fell short; padded by cycling".into());
    }

    renderer::upload_static_attributes(&cloud.colors, &cloud.sizes);
    renderer::upload_positions(&cloud.positions);

    SCENE.with(|scene_cell| {
        *scene_cell.borrow_mut() = Some(SceneState {
            cloud,
            engine: MorphEngine::new(),
            heart_target,
            last_time: None,
        });
    });
}

/// External morph trigger. Duration <= 0 falls back to the default.
/// Dropped silently while a morph is already animating.
#[wasm_bindgen]
pub fn start_heart_morph(duration_ms: f64) -> Result<(), JsValue> {
    SCENE.with(|scene_cell| {
        let mut scene_ref = scene_cell.borrow_mut();
        let scene = scene_ref
            .as_mut()
            .ok_or_else(|| JsValue::from_str("init_scene has not been called"))?;

        let duration = if duration_ms > 0.0 {
            duration_ms as f32
        } else {
            MORPH_DURATION_MS
        };

        scene
            .engine
            .start_morph(&scene.cloud, scene.heart_target.clone(), duration)
            .map_err(|e| JsValue::from_str(&format!("{:?}", e)))
    })
}

/// One cooperative tick per rendered frame: advance any in-flight
/// morph, derive the pulse/drift uniforms, and draw.
#[wasm_bindgen]
pub fn frame_update(time_seconds: f64) {
    SCENE.with(|scene_cell| {
        let mut scene_ref = scene_cell.borrow_mut();
        let scene = match scene_ref.as_mut() {
            Some(s) => s,
            None => return,
        };

        let dt_ms = match scene.last_time {
            Some(last) => ((time_seconds - last) * 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        scene.last_time = Some(time_seconds);

        if scene.engine.advance(&mut scene.cloud, dt_ms) {
            renderer::upload_positions(&scene.cloud.positions);
        }

        let uniforms = scene.engine.tick(time_seconds as f32);
        renderer::render_frame(uniforms);
    });
}
