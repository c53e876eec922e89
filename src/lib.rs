//! Golden ratio drawings rendered on a CPU canvas: Fibonacci tilings with a
//! turtle cursor and golden spirals on small 2D/3D plotting axes.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod math;
pub mod plot;
pub mod sketches;
