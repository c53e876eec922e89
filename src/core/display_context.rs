/// Render target dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl DisplayContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total size in bytes for RGBA buffer
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Shorter side, used to size figure elements
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Glyph scale that keeps labels readable as the canvas grows
    pub fn text_scale(&self) -> u32 {
        (self.min_side() / 400).clamp(1, 4)
    }
}
