use std::f32::consts::PI;

/// Slack on the angle limit so that whole multiples of the increment reach it
const LIMIT_TOLERANCE: f32 = 1e-5;

/// Fixed-step rotation with a bound on the accumulated angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickRotate {
    pub increment: f32,
    pub limit: f32,
    angle: f32,
}

impl ClickRotate {
    pub fn new(increment: f32, limit: f32) -> Self {
        Self {
            increment,
            limit: limit.abs(),
            angle: 0.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Accepts one increment if the new total stays within the limit and
    /// returns the angle to apply
    pub fn try_rotate(&mut self) -> Option<f32> {
        let next = self.angle + self.increment;
        if next.abs() > self.limit + LIMIT_TOLERANCE {
            return None;
        }
        self.angle = next;
        Some(self.increment)
    }

    /// Zeroes the total and returns the angle that undoes it
    pub fn reset(&mut self) -> f32 {
        -std::mem::replace(&mut self.angle, 0.0)
    }
}

impl Default for ClickRotate {
    /// Sixty degrees clockwise per click, at most half a turn
    fn default() -> Self {
        Self::new(-PI / 3.0, PI)
    }
}

/// On/off constant-speed spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinToggle {
    /// Radians per second
    pub speed: f32,
    rotating: bool,
    angle: f32,
}

impl SpinToggle {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            rotating: false,
            angle: 0.0,
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Flips the flag and returns the new state
    pub fn toggle(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }

    /// Angle to apply this frame
    pub fn step(&mut self, delta: f32) -> f32 {
        if !self.rotating {
            return 0.0;
        }
        let step = self.speed * delta;
        self.angle = (self.angle + step) % std::f32::consts::TAU;
        step
    }

    /// Accumulated angle, wrapped to one turn
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn reset(&mut self) -> f32 {
        self.rotating = false;
        -std::mem::replace(&mut self.angle, 0.0)
    }
}
