//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, Renderer};

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// One rendering target: a renderer paired with the strip it draws on
pub struct Player<'a, O: OutputDriver, const MAX_LEDS: usize, const PATCH_QUEUE_SIZE: usize> {
    renderer: Renderer<'a, MAX_LEDS, PATCH_QUEUE_SIZE>,
    output: O,
}

impl<'a, O: OutputDriver, const MAX_LEDS: usize, const PATCH_QUEUE_SIZE: usize>
    Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>
{
    pub const fn new(renderer: Renderer<'a, MAX_LEDS, PATCH_QUEUE_SIZE>, output: O) -> Self {
        Self { renderer, output }
    }

    /// Render the frame for `now` and push it to the strip.
    ///
    /// Returns `false` if the renderer had nothing to draw, in which case the
    /// strip is not touched.
    pub fn play(&mut self, now: Instant) -> bool {
        let Some(frame) = self.renderer.render(now) else {
            return false;
        };
        self.output.write(frame);
        true
    }

    pub fn renderer(&self) -> &Renderer<'a, MAX_LEDS, PATCH_QUEUE_SIZE> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, MAX_LEDS, PATCH_QUEUE_SIZE> {
        &mut self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Renders every target and writes it to its strip
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new([front, back]);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    const TARGETS: usize,
    const MAX_LEDS: usize,
    const PATCH_QUEUE_SIZE: usize,
> {
    players: [Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>; TARGETS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const TARGETS: usize, const MAX_LEDS: usize, const PATCH_QUEUE_SIZE: usize>
    FrameScheduler<'a, O, TARGETS, MAX_LEDS, PATCH_QUEUE_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(players: [Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>; TARGETS]) -> Self {
        Self::with_frame_duration(players, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        players: [Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>; TARGETS],
        frame_duration: Duration,
    ) -> Self {
        Self {
            players,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Renders every target and writes it to its strip
    /// 3. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: past two frames of lag, drop the backlog
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        for player in &mut self.players {
            player.play(now);
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn players(&self) -> &[Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>] {
        &self.players
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player<'a, O, MAX_LEDS, PATCH_QUEUE_SIZE>> {
        self.players.get_mut(index)
    }
}
