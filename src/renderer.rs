use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{DEFAULT_GAMMA, Rgb};
use crate::config::PatchReceiver;
use crate::filter::{BrightnessFilter, Filter};
use crate::frame::generate_frame;
use crate::model::AnimationModel;

/// Configuration for a renderer
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    /// Gamma used when blending color stops
    pub gamma: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
        }
    }
}

/// Renderer for one strip
///
/// Owns the strip's [`AnimationModel`] and frame buffer. Configuration patches
/// arrive through a mailbox and are applied at the start of a frame, so frame
/// generation always sees a complete model.
pub struct Renderer<'a, const MAX_LEDS: usize, const PATCH_QUEUE_SIZE: usize> {
    // External dependencies and configuration
    patches: PatchReceiver<'a, PATCH_QUEUE_SIZE>,
    gamma: f32,

    // Internal state
    model: AnimationModel,
    frame_buffer: [Rgb; MAX_LEDS],

    // Internal dependencies
    brightness: BrightnessFilter,
}

impl<'a, const MAX_LEDS: usize, const PATCH_QUEUE_SIZE: usize>
    Renderer<'a, MAX_LEDS, PATCH_QUEUE_SIZE>
{
    /// Create a renderer for `model`.
    ///
    /// The strip length of the model is limited to `MAX_LEDS`.
    pub fn new(
        patches: PatchReceiver<'a, PATCH_QUEUE_SIZE>,
        mut model: AnimationModel,
        config: &RendererConfig,
    ) -> Self {
        model.limit_strip_length(MAX_LEDS);
        let brightness = BrightnessFilter::new(model.brightness());
        Self {
            patches,
            gamma: config.gamma,
            model,
            frame_buffer: [Rgb::default(); MAX_LEDS],
            brightness,
        }
    }

    /// Render one frame
    ///
    /// Returns `None` when there is nothing to draw (zero-length strip or no
    /// channels); the strip should then be left untouched.
    pub fn render(&mut self, now: Instant) -> Option<&[Rgb]> {
        self.process_patches();

        let len = self.model.strip_length();
        if len == 0 || self.model.channel_count() == 0 {
            return None;
        }

        let phase = self.model.timing().phase_at(now);
        let frame = &mut self.frame_buffer[..len];
        generate_frame(&self.model, phase, self.gamma, frame);

        self.brightness.set(self.model.brightness());
        self.brightness.apply(frame);

        Some(frame)
    }

    /// Apply every queued patch, oldest first
    fn process_patches(&mut self) {
        for patch in self.patches.drain() {
            if let Err(_error) = self.model.apply_patch(patch) {
                #[cfg(feature = "esp32-log")]
                println!("[Renderer.process_patches] dropped part of patch: {}", _error);
            }
        }
    }

    /// Current model
    pub fn model(&self) -> &AnimationModel {
        &self.model
    }

    /// Mutable access to the model, for callers that own the render loop
    pub fn model_mut(&mut self) -> &mut AnimationModel {
        &mut self.model
    }

    pub const fn gamma(&self) -> f32 {
        self.gamma
    }
}
