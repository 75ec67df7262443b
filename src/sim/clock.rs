//! Host timestamp to fixed-step conversion
//!
//! The host hands us a monotonically increasing timestamp per animation
//! frame. Elapsed time is normalized to reference frames and accumulated;
//! whole reference frames become simulation ticks.

use crate::consts::{MAX_SUBSTEPS, REFERENCE_FRAME_MS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    /// Unconsumed time, in reference frames
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized delta since the previous frame (one reference frame on the first call)
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last_time {
            Some(last) => ((timestamp_ms - last).max(0.0) / REFERENCE_FRAME_MS) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(timestamp_ms);
        delta
    }

    /// Number of fixed ticks to run this frame
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        // Clamp long stalls (tab switch, debugger) to a bounded catch-up
        let delta = self.delta(timestamp_ms).min(MAX_SUBSTEPS as f32 * SIM_DT);
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Forget the previous timestamp so returning to a blurred or hidden page doesn't catch up
    pub fn reset(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }
}
