//! Headless sparkle replay.
//!
//! Drives the engine with a scripted pointer session on a fixed 60 fps
//! clock, rasterises both layers on the CPU and writes composited PNG
//! snapshots.
//!
//! Usage:
//!   cargo run -p sparkle-native -- --frames 240 --out sparkle-frames --seed 7

mod script;

use anyhow::{Context, Result};
use clap::Parser;
use sparkle_core::{
    Clock, Color, FrameDriver, LayerRole, ManualClock, Pixmap, SparkleConfig,
    SparkleEngine,
};
use std::path::{Path, PathBuf};

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(about = "Replay a scripted sparkle session and save PNG snapshots", version)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Number of 60 fps frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// RNG seed; omit for a different run every time.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "sparkle-frames")]
    out: PathBuf,
    /// Save every n-th frame (the last frame is always saved).
    #[arg(long, default_value_t = 30)]
    snapshot_every: u32,
}

/// Dark wood, roughly the page the effect was made for.
fn backdrop() -> Color {
    Color::rgba(58, 40, 28, 1.0)
}

fn compose(highlight: &Pixmap, sparkle: &Pixmap) -> Pixmap {
    let mut out = Pixmap::filled(sparkle.width(), sparkle.height(), backdrop());
    for role in LayerRole::STACK {
        let layer = match role {
            LayerRole::Highlight => highlight,
            LayerRole::Sparkle => sparkle,
        };
        out.composite(layer, role.blend_mode());
    }
    out
}

fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.to_rgba8())
        .context("Failed to create image from pixel data")?;
    img.save(path)
        .with_context(|| format!("Failed to save image to {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SparkleConfig::default();
    let engine = match args.seed {
        Some(seed) => SparkleEngine::seeded(config, seed)?,
        None => SparkleEngine::new(config)?,
    };
    let (w, h) = (args.width.max(1), args.height.max(1));
    let mut driver = FrameDriver::new(engine, Pixmap::new(w, h), Pixmap::new(w, h));
    driver.resize(w as f64, h as f64);
    driver.start();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let steps = script::session(w as f64, h as f64);
    let mut next_step = 0;
    let clock = ManualClock::default();
    let every = args.snapshot_every.max(1);
    let mut saved = 0u32;

    for i in 0..args.frames {
        let now = clock.now_ms();
        while let Some(step) = steps.get(next_step).filter(|s| s.at_ms <= now) {
            let reaction = step.input.apply(driver.engine_mut(), step.at_ms);
            log::debug!("[input] {:?} -> {:?}", step.input, reaction);
            next_step += 1;
        }

        driver.frame(now);

        let last = i + 1 == args.frames;
        if i % every == 0 || last {
            let image = compose(driver.highlight_surface(), driver.sparkle_surface());
            let path = args.out.join(format!("frame_{:04}.png", i));
            save_png(&image, &path)?;
            saved += 1;
            let stats = driver.stats();
            log::info!(
                "[frame] {} free={} orbital={} -> {}",
                i,
                stats.free,
                stats.orbital,
                path.display()
            );
        }
        clock.advance(FRAME_MS);
    }

    log::info!(
        "Rendered {} frames ({} snapshots) at {}x{} to {}",
        args.frames,
        saved,
        w,
        h,
        args.out.display()
    );
    Ok(())
}
