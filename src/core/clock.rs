use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Variable-step frame clock. Every tick yields the real elapsed time; there
/// is no fixed step and no catch-up.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    frame: u64,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        let time = now.duration_since(self.start).as_secs_f32();
        self.last_tick = now;

        let info = FrameInfo::new(self.frame, time, delta);
        self.frame += 1;
        info
    }

    /// Restart delta measurement without touching the frame count, e.g. after
    /// the window was hidden
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    pub fn frame_number(&self) -> u64 {
        self.frame
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();

        assert!(frame.delta >= 0.009, "delta {} shorter than the sleep", frame.delta);
        assert_eq!(frame.number, 0);
        assert!(frame.time >= frame.delta);
    }

    #[test]
    fn clock_counts_frames() {
        let mut clock = Clock::new();
        clock.tick();
        clock.tick();
        assert_eq!(clock.tick().number, 2);
        assert_eq!(clock.frame_number(), 3);
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let frame = clock.tick();
        assert!(frame.delta < 0.005);
        assert!(frame.time >= 0.009, "reset must not rewind total time");
    }
}
