/// Frame timing handed to every per-frame update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Time {
    /// Seconds since the host started ticking.
    pub total: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl Time {
    pub fn new(total: f32, delta: f32) -> Self {
        Time { total, delta }
    }

    /// Next frame after `delta` seconds.
    pub fn advance(&self, delta: f32) -> Self {
        Time {
            total: self.total + delta,
            delta,
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Time {
            total: 0.0,
            delta: 1.0 / 72.0,
        }
    }
}
