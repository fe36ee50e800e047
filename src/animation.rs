//! Frame-timing side of sprite animation.
//!
//! The core never draws; it only needs to know which frame an animation is
//! on, how many frames it has, and how to move it forward in time.

/// What the simulation needs from an animation handle.
pub trait Animation {
    fn frame_current(&self) -> usize;
    fn frame_count(&self) -> usize;
    /// Advance by `dt` elapsed milliseconds.
    fn update(&mut self, dt: u32);
    /// Rewind to frame 0.
    fn reset(&mut self);

    fn is_on_last_frame(&self) -> bool {
        self.frame_current() + 1 == self.frame_count()
    }
}

/// Fixed-duration frame counter.
///
/// Steps at most one frame per `update`, however large `dt` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTimer {
    pub frame_count: usize,
    /// Milliseconds each frame stays on screen.
    pub frame_duration: u32,
    pub frame_current: usize,
    pub frame_cooldown: u32,
}

impl FrameTimer {
    pub fn new(frame_count: usize, frame_duration: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_duration,
            frame_current: 0,
            frame_cooldown: 0,
        }
    }
}

impl Animation for FrameTimer {
    fn frame_current(&self) -> usize {
        self.frame_current
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn update(&mut self, dt: u32) {
        if dt < self.frame_cooldown {
            self.frame_cooldown -= dt;
        } else {
            self.frame_current = (self.frame_current + 1) % self.frame_count;
            self.frame_cooldown = self.frame_duration;
        }
    }

    fn reset(&mut self) {
        self.frame_current = 0;
        self.frame_cooldown = 0;
    }
}
