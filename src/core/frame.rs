use std::time::Duration;

/// Frame metadata - carries the animation frame number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub number: u64,
}

impl FrameInfo {
    pub fn new(number: u64) -> Self {
        Self { number }
    }

    /// The single frame of a still sketch
    pub fn still() -> Self {
        Self::new(0)
    }
}

/// Frame count and pacing of an animated sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub frames: u64,
    pub interval_ms: u64,
    /// Restart from frame 0 after the last frame
    pub repeat: bool,
}

impl Animation {
    pub fn new(frames: u64, interval_ms: u64) -> Self {
        Self {
            frames,
            interval_ms,
            repeat: true,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Frame index shown after `step` ticks
    pub fn frame_at(&self, step: u64) -> u64 {
        match (self.frames, self.repeat) {
            (0, _) => 0,
            (n, true) => step % n,
            (n, false) => step.min(n - 1),
        }
    }

    /// Every frame once, in order
    pub fn frames(&self) -> impl Iterator<Item = FrameInfo> {
        (0..self.frames).map(FrameInfo::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_animation_wraps() {
        let anim = Animation::new(400, 40);
        assert_eq!(anim.frame_at(0), 0);
        assert_eq!(anim.frame_at(399), 399);
        assert_eq!(anim.frame_at(400), 0);
        assert_eq!(anim.interval(), Duration::from_millis(40));
    }

    #[test]
    fn one_shot_animation_holds_last_frame() {
        let anim = Animation { repeat: false, ..Animation::new(10, 40) };
        assert_eq!(anim.frame_at(25), 9);
    }

    #[test]
    fn offline_frames_cover_every_index() {
        let frames: Vec<_> = Animation::new(3, 40).frames().collect();
        assert_eq!(frames, vec![FrameInfo::new(0), FrameInfo::new(1), FrameInfo::new(2)]);
    }
}
