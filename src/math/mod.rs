pub mod angles;
pub mod color;
pub mod fibonacci;
pub mod golden;
pub mod spiral;

pub use angles::{linspace, nearest_index, segmented_angles, AngleSegment, SegmentedAngles};
pub use color::{plasma, plasma_gradient, tab20, tab20_sample, Color, Palette};
pub use fibonacci::{classic_fibonacci, extend_fibonacci};
pub use golden::{growth_per_radian, revolutions, PHI};
pub use spiral::{SafetyLimits, SpiralGenerator, SpiralParams};
