use crate::comfort_log;
use crate::config::BlinkConfig;
use crate::effect::Effect;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Closing { elapsed: f32 },
    Opening { elapsed: f32 },
}

/// Vertical anchor offsets of the two eyelid panels on the blink canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eyelids {
    pub upper: f32,
    pub lower: f32,
}

/// Virtual eyelids that close over the view, let deferred effects run while
/// the view is covered, then open again.
///
/// Stepped once per frame by [`Blink::update`]. Effects requested while the
/// lids are closing join the current blink; effects requested while they are
/// opening run in a follow-up blink.
#[derive(Clone, Debug)]
pub struct Blink {
    half_duration: f32,
    canvas_height: f32,
    phase: Phase,
    eyelids: Eyelids,
    pending: Vec<Effect>,
    queued: Vec<Effect>,
}

impl Blink {
    pub fn new(config: &BlinkConfig) -> Self {
        let mut blink = Blink {
            half_duration: config.duration_seconds / 2.0,
            canvas_height: config.canvas_height,
            phase: Phase::Idle,
            eyelids: Eyelids { upper: 0.0, lower: 0.0 },
            pending: Vec::new(),
            queued: Vec::new(),
        };
        blink.eyelids = blink.open_lids();
        blink
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn eyelids(&self) -> Eyelids {
        self.eyelids
    }

    /// 0 with eyes open, 1 with eyes shut.
    pub fn coverage(&self) -> f32 {
        let open = self.open_lids().upper;
        let step = self.canvas_height / 2.0;
        ((open - self.eyelids.upper) / step).clamp(0.0, 1.0)
    }

    pub fn start(&mut self, effect: Effect) {
        match self.phase {
            Phase::Idle => {
                self.pending.push(effect);
                self.phase = Phase::Closing { elapsed: 0.0 };
                comfort_log!(DEBUG, "blink started for {:?}", effect);
            }
            Phase::Closing { .. } => self.pending.push(effect),
            Phase::Opening { .. } => self.queued.push(effect),
        }
    }

    /// Runs `effect` behind a blink when `enabled`, otherwise hands it back
    /// for immediate use.
    pub fn gate(&mut self, enabled: bool, effect: Effect) -> Option<Effect> {
        if enabled {
            self.start(effect);
            None
        } else {
            Some(effect)
        }
    }

    /// Advances one frame. Returns the deferred effects on the frame the eyes
    /// are fully shut, an empty list otherwise.
    pub fn update(&mut self, delta: f32) -> Vec<Effect> {
        let step = self.canvas_height / 2.0;
        let open = self.open_lids();
        let closed = self.closed_lids();

        match self.phase {
            Phase::Idle => Vec::new(),
            Phase::Closing { elapsed } if elapsed < self.half_duration => {
                let t = elapsed / self.half_duration;
                self.eyelids = Eyelids {
                    upper: open.upper - t * step,
                    lower: open.lower + t * step,
                };
                self.phase = Phase::Closing {
                    elapsed: elapsed + delta,
                };
                Vec::new()
            }
            Phase::Closing { .. } => {
                self.eyelids = closed;
                self.phase = Phase::Opening { elapsed: 0.0 };
                std::mem::take(&mut self.pending)
            }
            Phase::Opening { elapsed } if elapsed < self.half_duration => {
                let t = elapsed / self.half_duration;
                self.eyelids = Eyelids {
                    upper: closed.upper + t * step,
                    lower: closed.lower - t * step,
                };
                self.phase = Phase::Opening {
                    elapsed: elapsed + delta,
                };
                Vec::new()
            }
            Phase::Opening { .. } => {
                self.eyelids = open;
                if self.queued.is_empty() {
                    self.phase = Phase::Idle;
                } else {
                    self.pending = std::mem::take(&mut self.queued);
                    self.phase = Phase::Closing { elapsed: 0.0 };
                }
                Vec::new()
            }
        }
    }

    fn open_lids(&self) -> Eyelids {
        Eyelids {
            upper: self.canvas_height / 4.0,
            lower: -self.canvas_height / 4.0,
        }
    }

    fn closed_lids(&self) -> Eyelids {
        Eyelids {
            upper: -self.canvas_height / 4.0,
            lower: self.canvas_height / 4.0,
        }
    }
}

impl Default for Blink {
    fn default() -> Self {
        Blink::new(&BlinkConfig::default())
    }
}
