//! PNG output for still images and animation frame sequences

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::core::{Canvas, DisplayContext, FrameInfo};
use crate::plot::OrbitCamera;
use crate::sketches::{Figure, Sketch};

/// `<sketch>_<YYYYmmdd-HHMMSS>.png`
pub fn default_file_name(sketch: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.png", sketch, at.format("%Y%m%d-%H%M%S"))
}

pub fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{:05}.png", frame))
}

/// Write `canvas` as an RGBA PNG, creating parent directories
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let (width, height) = canvas.dimensions();
    image::save_buffer(
        path,
        canvas.pixels(),
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

/// Render the first frame of `sketch` to `path`
pub fn export_still(sketch: &dyn Sketch, figure: &Figure, ctx: &DisplayContext, path: &Path) -> Result<()> {
    let frame = FrameInfo::still();
    let canvas = figure.render(ctx, sketch.view_at(&frame), &OrbitCamera::new());
    save_png(&canvas, path)?;
    log::info!("Saved {} to {}", sketch.name(), path.display());
    Ok(())
}

/// Render every animation frame (one for still sketches) into `dir`; returns the frame count
pub fn export_frames(sketch: &dyn Sketch, figure: &Figure, ctx: &DisplayContext, dir: &Path) -> Result<u64> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let camera = OrbitCamera::new();
    let frames: Vec<FrameInfo> = match sketch.animation() {
        Some(animation) => animation.frames().collect(),
        None => vec![FrameInfo::still()],
    };

    for frame in &frames {
        let canvas = figure.render(ctx, sketch.view_at(frame), &camera);
        save_png(&canvas, &frame_path(dir, frame.number))?;
        if frame.number % 50 == 0 {
            log::debug!("Wrote frame {}/{}", frame.number + 1, frames.len());
        }
    }

    log::info!("Wrote {} frames of {} to {}", frames.len(), sketch.name(), dir.display());
    Ok(frames.len() as u64)
}
