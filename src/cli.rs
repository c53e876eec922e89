use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::SketchApp;
use crate::config::{ConfigOverrides, RenderConfig};
use crate::export;
use crate::sketches::SketchKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "golden-spirals", version)]
#[command(about = "Golden ratio drawings: Fibonacci tilings and golden spirals in 2D and 3D")]
pub struct Cli {
    /// Sketch to draw [env: GOLDEN_SKETCH]
    #[arg(value_enum)]
    pub sketch: Option<SketchKind>,

    /// Canvas width in pixels [env: GOLDEN_WIDTH]
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels [env: GOLDEN_HEIGHT]
    #[arg(long)]
    pub height: Option<u32>,

    /// JSON file with `sketch`, `width`, `height` and `background`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a PNG instead of opening a window; the name defaults to `<sketch>_<timestamp>.png`
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub save: Option<Option<PathBuf>>,

    /// Write every animation frame as `frame_NNNNN.png` into DIR
    #[arg(long, value_name = "DIR", conflicts_with = "save")]
    pub frames_dir: Option<PathBuf>,

    /// Print the available sketches and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sketch: self.sketch,
            width: self.width,
            height: self.height,
        }
    }

    pub fn resolve_config(&self) -> Result<RenderConfig> {
        let env = ConfigOverrides::from_env()?;
        RenderConfig::resolve(self.config.as_deref(), &[env, self.overrides()])
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for kind in SketchKind::ALL {
            let sketch = kind.sketch();
            println!("{:<18} {}", sketch.name(), sketch.title());
        }
        return Ok(());
    }

    let config = cli.resolve_config()?;
    let ctx = config.display_context();
    let sketch = config.sketch.sketch();
    log::info!("Sketch {} at {}x{}", sketch.name(), ctx.width, ctx.height);

    let mut figure = sketch
        .build(&ctx)
        .with_context(|| format!("Failed to build {}", sketch.name()))?;
    if let Some(background) = config.background {
        figure = figure.with_background(background);
    }

    if let Some(dir) = &cli.frames_dir {
        export::export_frames(sketch.as_ref(), &figure, &ctx, dir)?;
    } else if let Some(path) = &cli.save {
        let path = path.clone().unwrap_or_else(|| {
            PathBuf::from(export::default_file_name(sketch.name(), chrono::Local::now()))
        });
        export::export_still(sketch.as_ref(), &figure, &ctx, &path)?;
    } else {
        SketchApp::new(sketch, figure, ctx).run()?;
    }

    Ok(())
}
