//! Wall-clock to phase mapping
//!
//! One animation cycle is `duration_ms` of motion followed by `hold_ms` of
//! freeze at the loop seam. The hold shows the first keyframe (phase 0); it
//! does not stretch the animated range.

use embassy_time::Instant;

/// Largest `f32` strictly below 1.0
pub const MAX_PHASE: f32 = f32::from_bits(0x3F7F_FFFF);

/// Default duration of the animated part of a cycle
pub const DEFAULT_CYCLE_DURATION_MS: u32 = 300;

/// Default freeze at the loop seam
pub const DEFAULT_CYCLE_HOLD_MS: u32 = 1000;

/// Timing of one animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    pub duration_ms: u32,
    pub hold_ms: u32,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_DURATION_MS, DEFAULT_CYCLE_HOLD_MS)
    }
}

impl CycleTiming {
    pub const fn new(duration_ms: u32, hold_ms: u32) -> Self {
        Self {
            duration_ms,
            hold_ms,
        }
    }

    /// Full cycle length including the hold
    #[allow(clippy::cast_lossless)]
    pub const fn period_ms(self) -> u64 {
        self.duration_ms as u64 + self.hold_ms as u64
    }

    /// Phase in `[0, 1)` at the given instant
    pub fn phase_at(self, now: Instant) -> f32 {
        self.phase_at_millis(now.as_millis())
    }

    /// Phase in `[0, 1)` at the given monotonic millisecond count
    #[allow(clippy::cast_precision_loss)]
    pub fn phase_at_millis(self, millis: u64) -> f32 {
        let period = self.period_ms();
        if period == 0 || self.duration_ms == 0 {
            return 0.0;
        }

        let elapsed = millis % period;
        if elapsed >= u64::from(self.duration_ms) {
            // Inside the hold window
            return 0.0;
        }

        let phase = elapsed as f32 / self.duration_ms as f32;
        phase.clamp(0.0, MAX_PHASE)
    }
}
