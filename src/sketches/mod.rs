//! The drawings, one per module, behind a common [`Sketch`] trait

mod calendar_360;
mod cycles_360;
mod fib_classic;
mod fib_squares;
mod golden_helix;
mod golden_rectangles;
mod golden_spiral;
mod helix;
mod hijri;

use anyhow::Result;
use clap::ValueEnum;
use serde::Deserialize;

use crate::core::{Animation, Canvas, DisplayContext, FrameInfo, TurtleDrawing};
use crate::math::Color;
use crate::plot::{Axes2D, Axes3D, OrbitCamera, View};

pub use calendar_360::Calendar360;
pub use cycles_360::Cycles360;
pub use fib_classic::FibClassic;
pub use fib_squares::FibSquares;
pub use golden_helix::GoldenHelix;
pub use golden_rectangles::GoldenRectangles;
pub use golden_spiral::GoldenSpiral;
pub use helix::Helix;
pub use hijri::{hijri_view, Hijri};

/// Geometry of a sketch, built once and rendered per frame
#[derive(Debug, Clone)]
pub enum Figure {
    Turtle(TurtleDrawing),
    Plot2D(Axes2D),
    Plot3D(Axes3D),
}

impl Figure {
    pub fn is_3d(&self) -> bool {
        matches!(self, Figure::Plot3D(_))
    }

    pub fn with_background(self, color: Color) -> Self {
        match self {
            Figure::Turtle(mut drawing) => {
                drawing.background = color;
                Figure::Turtle(drawing)
            }
            Figure::Plot2D(axes) => Figure::Plot2D(axes.facecolor(color)),
            Figure::Plot3D(mut axes) => {
                axes.set_facecolor(color);
                Figure::Plot3D(axes)
            }
        }
    }

    /// Rasterise with `view` (or the figure's own view) offset by the user's orbit
    pub fn render(&self, ctx: &DisplayContext, view: Option<View>, camera: &OrbitCamera) -> Canvas {
        match self {
            Figure::Turtle(drawing) => drawing.render(ctx),
            Figure::Plot2D(axes) => axes.render(ctx),
            Figure::Plot3D(axes) => axes.render(ctx, camera.apply(view.unwrap_or(axes.view()))),
        }
    }
}

/// One self-contained drawing
pub trait Sketch {
    /// Command-line name
    fn name(&self) -> &'static str;

    /// Human readable description for `--list`
    fn title(&self) -> &'static str;

    /// Generate the figure; may size text and markers from `ctx`
    fn build(&self, ctx: &DisplayContext) -> Result<Figure>;

    /// Frame count and pacing for animated sketches
    fn animation(&self) -> Option<Animation> {
        None
    }

    /// Camera for `frame`; `None` keeps the figure's own view
    fn view_at(&self, _frame: &FrameInfo) -> Option<View> {
        None
    }
}

/// Every sketch selectable from the command line or a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SketchKind {
    FibSquares,
    GoldenRectangles,
    FibClassic,
    #[default]
    GoldenSpiral,
    GoldenHelix,
    Helix,
    #[value(name = "cycles-360")]
    #[serde(rename = "cycles-360")]
    Cycles360,
    #[value(name = "calendar-360")]
    #[serde(rename = "calendar-360")]
    Calendar360,
    Hijri,
}

impl SketchKind {
    pub const ALL: [SketchKind; 9] = [
        SketchKind::FibSquares,
        SketchKind::GoldenRectangles,
        SketchKind::FibClassic,
        SketchKind::GoldenSpiral,
        SketchKind::GoldenHelix,
        SketchKind::Helix,
        SketchKind::Cycles360,
        SketchKind::Calendar360,
        SketchKind::Hijri,
    ];

    pub fn sketch(self) -> Box<dyn Sketch> {
        match self {
            SketchKind::FibSquares => Box::new(FibSquares),
            SketchKind::GoldenRectangles => Box::new(GoldenRectangles),
            SketchKind::FibClassic => Box::new(FibClassic),
            SketchKind::GoldenSpiral => Box::new(GoldenSpiral),
            SketchKind::GoldenHelix => Box::new(GoldenHelix),
            SketchKind::Helix => Box::new(Helix),
            SketchKind::Cycles360 => Box::new(Cycles360),
            SketchKind::Calendar360 => Box::new(Calendar360),
            SketchKind::Hijri => Box::new(Hijri),
        }
    }
}
