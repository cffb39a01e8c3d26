// Ici on importe depuis la crate lib complète
use anyhow::Result;
use log::{info, warn};
use std::{env, fs, path::PathBuf};

use fireworks_canvas::audio_engine::SilentAudio;
use fireworks_canvas::fireworks::DrainOutcome;
use fireworks_canvas::physic_engine::config::FireworksOptions;
use fireworks_canvas::renderer_engine::RasterCanvas;
use fireworks_canvas::utils::show_rust_core_dependencies;
use fireworks_canvas::Fireworks;

const CONFIG_PATH: &str = "assets/config/fireworks.toml";
/// Horloge synthétique de l'hôte (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Une image PNG toutes les N frames rendues
const SAVE_EVERY: u32 = 10;
/// Garde-fou pour l'attente de fin d'animation
const MAX_DRAIN_FRAMES: u32 = 10_000;

/// Rendu headless : l'animation tourne sur un canvas logiciel et les frames sont exportées en PNG.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Fireworks (headless)...");

    show_rust_core_dependencies();

    let options = FireworksOptions::from_file(CONFIG_PATH).unwrap_or_else(|e| {
        warn!("⚠️ Config {} not loaded ({}), using defaults", CONFIG_PATH, e);
        FireworksOptions::default()
    });
    info!("Fireworks options loaded:\n{:#?}", options);

    // --------------------------
    // Arguments : dossier de sortie, nombre de frames
    // --------------------------
    let output_dir = env::args()
        .nth(1) // priorité à l'argument CLI
        .map(PathBuf::from)
        .or_else(|| env::var("FIREWORKS_OUTPUT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("frames"));
    let frames: u32 = env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(300);

    fs::create_dir_all(&output_dir)?;
    info!("Output directory: {}", output_dir.display());

    let canvas = RasterCanvas::new(1024, 768);
    let mut fireworks = Fireworks::new(canvas, SilentAudio, options);
    fireworks.start();

    let mut clock = 0.0;
    let mut rendered = 0;
    while rendered < frames {
        clock += FRAME_MS;
        if !fireworks.on_animation_frame(clock) {
            continue;
        }
        rendered += 1;

        if rendered % SAVE_EVERY == 0 {
            if let Some(canvas) = fireworks.canvas() {
                canvas.save_png(output_dir.join(format!("frame_{:05}.png", rendered)))?;
            }
        }
    }

    info!(
        "🎆 {} frames rendered ({} traces, {} fragments alive)",
        rendered,
        fireworks.engine().traces_count(),
        fireworks.engine().explosions_count()
    );

    // Fin propre : on laisse les gerbes en cours s'éteindre
    let stopped = fireworks.wait_stop(false);
    let mut drain_frames = 0;
    while stopped.is_empty() && drain_frames < MAX_DRAIN_FRAMES {
        clock += FRAME_MS;
        fireworks.on_animation_frame(clock);
        drain_frames += 1;
    }

    match stopped.try_recv() {
        Ok(DrainOutcome::Drained) => info!("✅ Drained after {} frames", drain_frames),
        Ok(DrainOutcome::Cancelled) => warn!("Drain cancelled"),
        Err(_) => {
            warn!("⚠️ Drain timeout, forcing stop");
            fireworks.stop(false);
        }
    }

    Ok(())
}
