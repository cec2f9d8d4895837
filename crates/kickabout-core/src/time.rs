use serde::{Deserialize, Serialize};

/// Largest step a single frame may report, in seconds. A host that stalls
/// (backgrounded tab, debugger) would otherwise hand the simulation one huge
/// step.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Timing for one simulated frame, threaded explicitly into every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Zero-based frame counter.
    pub frame: u64,
}

impl FrameTime {
    pub const fn new(dt: f32, elapsed: f32, frame: u64) -> Self {
        Self { dt, elapsed, frame }
    }

    /// Frame `frame` of a fixed-rate run with step `dt`.
    pub fn fixed(frame: u64, dt: f32) -> Self {
        Self {
            dt,
            elapsed: frame as f32 * dt,
            frame,
        }
    }
}

/// Turns host timestamps (seconds, monotonic) into [`FrameTime`] values.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Option<f64>,
    last: Option<f64>,
    frame: u64,
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(MAX_FRAME_DT)
    }

    pub fn with_max_dt(max_dt: f32) -> Self {
        Self {
            start: None,
            last: None,
            frame: 0,
            max_dt,
        }
    }

    /// Advance to `now` and return the timing for this frame.
    ///
    /// The first tick reports `dt == 0`. Timestamps that go backwards also
    /// report `dt == 0` rather than a negative step.
    pub fn tick(&mut self, now: f64) -> FrameTime {
        let start = *self.start.get_or_insert(now);
        let dt = match self.last {
            Some(last) if now >= last => ((now - last) as f32).min(self.max_dt),
            Some(last) => {
                tracing::debug!(now, last, "Clock went backwards, clamping frame step");
                0.0
            },
            None => 0.0,
        };
        self.last = Some(now.max(self.last.unwrap_or(now)));

        let time = FrameTime::new(dt, (now - start).max(0.0) as f32, self.frame);
        self.frame += 1;
        time
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
        self.frame = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
