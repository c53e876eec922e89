pub mod canvas;
pub mod clock;
pub mod display_context;
pub mod font;
pub mod frame;
pub mod gpu_context;
pub mod surface_renderer;
pub mod turtle;

pub use canvas::{Canvas, DrawOp};
pub use clock::{Clock, FramePacer};
pub use display_context::DisplayContext;
pub use frame::{Animation, FrameInfo};
pub use gpu_context::GpuContext;
pub use surface_renderer::SurfaceRenderer;
pub use turtle::{Turtle, TurtleCommand, TurtleDrawing};
