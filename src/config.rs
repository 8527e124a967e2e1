//! Configuration updates
//!
//! A [`ConfigMessage`] is what the transport hands over after decoding an
//! inbound write. It is validated into an owned [`AnimationPatch`], which is
//! then applied to an [`AnimationModel`] field by field. Every replacement is
//! built completely before it is assigned, so a reader never sees a
//! half-written sequence.
//!
//! Validation failures are local: the failing field keeps its previous value
//! and the rest of the message still applies.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::parse_hex_rgb;
use crate::error::{ConfigError, Field};
use crate::mailbox::{Mailbox, MailboxReceiver, MailboxSender};
use crate::model::{
    AnimationModel, ColorStops, Keyframe, Keyframes, MAX_BRIGHTNESS, MAX_KEYFRAMES,
    validate_keyframes,
};

/// Decoded configuration message for one rendering target
///
/// Every field is optional; absent fields leave the model untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigMessage<'m> {
    /// Target channel for `key_frame` and `color`, 0 when absent
    pub channel: Option<i64>,
    /// Keyframes, each expected to be a `[start, end]` pair
    pub key_frame: Option<&'m [&'m [f32]]>,
    /// Color stops as six digit hex strings
    pub color: Option<&'m [&'m str]>,
    pub brightness: Option<f32>,
    /// Freeze at the loop seam, in milliseconds
    pub delay: Option<i64>,
    /// Length of the animated part of the cycle, in milliseconds
    pub duration: Option<i64>,
}

/// Validated replacement for one channel's sequences
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPatch {
    pub index: usize,
    pub keyframes: Option<Keyframes>,
    pub color_stops: Option<ColorStops>,
}

/// Validated, owned update for an [`AnimationModel`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationPatch {
    pub channel: Option<ChannelPatch>,
    pub brightness: Option<f32>,
    pub cycle_hold_ms: Option<u32>,
    pub cycle_duration_ms: Option<u32>,
}

impl AnimationPatch {
    /// Validate a message into a patch.
    ///
    /// Returns the patch built from every field that passed, together with
    /// the first error encountered, if any.
    pub fn decode(message: &ConfigMessage<'_>) -> (Self, Option<ConfigError>) {
        let mut error = None;
        let mut patch = Self::default();

        if message.key_frame.is_some() || message.color.is_some() {
            patch.channel = decode_channel(message, &mut error);
        }

        if let Some(brightness) = message.brightness {
            if brightness.is_finite() && (0.0..=MAX_BRIGHTNESS).contains(&brightness) {
                patch.brightness = Some(brightness);
            } else {
                ConfigError::keep_first(&mut error, ConfigError::MalformedField(Field::Brightness));
            }
        }

        if let Some(delay) = message.delay {
            match u32::try_from(delay) {
                Ok(hold) => patch.cycle_hold_ms = Some(hold),
                Err(_) => {
                    ConfigError::keep_first(&mut error, ConfigError::MalformedField(Field::Delay));
                }
            }
        }

        if let Some(duration) = message.duration {
            match u32::try_from(duration) {
                Ok(duration) if duration > 0 => patch.cycle_duration_ms = Some(duration),
                _ => {
                    ConfigError::keep_first(
                        &mut error,
                        ConfigError::MalformedField(Field::Duration),
                    );
                }
            }
        }

        (patch, error)
    }

    /// Patch carries nothing to apply
    pub fn is_empty(&self) -> bool {
        self.channel.is_none()
            && self.brightness.is_none()
            && self.cycle_hold_ms.is_none()
            && self.cycle_duration_ms.is_none()
    }
}

fn decode_channel(
    message: &ConfigMessage<'_>,
    error: &mut Option<ConfigError>,
) -> Option<ChannelPatch> {
    let Ok(index) = usize::try_from(message.channel.unwrap_or(0)) else {
        ConfigError::keep_first(error, ConfigError::UnknownChannel);
        return None;
    };

    let keyframes = message
        .key_frame
        .and_then(|raw| match decode_keyframes(raw) {
            Ok(keyframes) => Some(keyframes),
            Err(err) => {
                ConfigError::keep_first(error, err);
                None
            }
        });

    let color_stops = message.color.and_then(|raw| decode_color_stops(raw, error));

    if keyframes.is_none() && color_stops.is_none() {
        return None;
    }

    Some(ChannelPatch {
        index,
        keyframes,
        color_stops,
    })
}

/// All pairs must be well formed; a single bad pair rejects the whole field
fn decode_keyframes(raw: &[&[f32]]) -> Result<Keyframes, ConfigError> {
    let malformed = ConfigError::MalformedField(Field::KeyFrame);
    if raw.len() > MAX_KEYFRAMES {
        return Err(malformed);
    }

    let mut pairs = Keyframes::new();
    for pair in raw {
        let &[start, end] = *pair else {
            return Err(malformed);
        };
        pairs
            .push(Keyframe::new(start, end))
            .map_err(|_| malformed)?;
    }

    validate_keyframes(&pairs)
}

/// Invalid entries are skipped individually; `None` if nothing survives
fn decode_color_stops(raw: &[&str], error: &mut Option<ConfigError>) -> Option<ColorStops> {
    let malformed = ConfigError::MalformedField(Field::Color);
    if raw.is_empty() {
        ConfigError::keep_first(error, malformed);
        return None;
    }

    let mut stops = ColorStops::new();

    for entry in raw {
        let Ok(color) = parse_hex_rgb(entry) else {
            #[cfg(feature = "esp32-log")]
            println!("[AnimationPatch.decode] skipping color {:?}", entry);
            ConfigError::keep_first(error, malformed);
            continue;
        };
        if stops.push(color).is_err() {
            ConfigError::keep_first(error, malformed);
            break;
        }
    }

    if stops.is_empty() { None } else { Some(stops) }
}

impl AnimationModel {
    /// Validate and apply a configuration message.
    ///
    /// Returns the first error encountered. Fields that passed validation are
    /// applied even when another field failed.
    pub fn apply(&mut self, message: &ConfigMessage<'_>) -> Result<(), ConfigError> {
        let (patch, decode_error) = AnimationPatch::decode(message);
        let apply_result = self.apply_patch(patch);
        match decode_error.map_or(apply_result, Err) {
            Err(error) => {
                #[cfg(feature = "esp32-log")]
                println!("[AnimationModel.apply] {}", error);
                Err(error)
            }
            Ok(()) => Ok(()),
        }
    }

    /// Apply an already validated patch.
    ///
    /// Each field is replaced with a single assignment. A channel index out of
    /// range drops the channel part and reports [`ConfigError::UnknownChannel`];
    /// scalar fields are still applied.
    pub fn apply_patch(&mut self, patch: AnimationPatch) -> Result<(), ConfigError> {
        let mut result = Ok(());

        if let Some(channel_patch) = patch.channel {
            match self.channels.get_mut(channel_patch.index) {
                Some(channel) => {
                    if let Some(keyframes) = channel_patch.keyframes {
                        channel.replace_keyframes(keyframes);
                    }
                    if let Some(color_stops) = channel_patch.color_stops {
                        channel.replace_color_stops(color_stops);
                    }
                }
                None => result = Err(ConfigError::UnknownChannel),
            }
        }

        if let Some(brightness) = patch.brightness {
            self.brightness = brightness;
        }
        if let Some(hold) = patch.cycle_hold_ms {
            self.timing.hold_ms = hold;
        }
        if let Some(duration) = patch.cycle_duration_ms {
            self.timing.duration_ms = duration;
        }

        result
    }
}

/// Type alias for the mailbox carrying patches to a renderer
pub type PatchMailbox<const SIZE: usize> = Mailbox<AnimationPatch, SIZE>;

/// Type alias for the patch sender
pub type PatchSender<'a, const SIZE: usize> = MailboxSender<'a, AnimationPatch, SIZE>;

/// Type alias for the patch receiver
pub type PatchReceiver<'a, const SIZE: usize> = MailboxReceiver<'a, AnimationPatch, SIZE>;

/// Sender-side handle for updating one rendering target
///
/// Lives in the delivery context (radio callback, interrupt handler). It
/// validates messages synchronously, so the caller gets errors right away, and
/// queues the resulting patch for the render loop.
pub struct ConfigUpdater<'a, const SIZE: usize> {
    patches: PatchSender<'a, SIZE>,
    channel_count: usize,
}

impl<'a, const SIZE: usize> ConfigUpdater<'a, SIZE> {
    /// Create an updater for a target with `channel_count` channels
    pub const fn new(patches: PatchSender<'a, SIZE>, channel_count: usize) -> Self {
        Self {
            patches,
            channel_count,
        }
    }

    pub const fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Validate a message and queue it for the render loop.
    ///
    /// Valid fields are queued even when the result is an error. A full
    /// mailbox drops the whole update and reports [`ConfigError::QueueFull`].
    pub fn submit(&self, message: &ConfigMessage<'_>) -> Result<(), ConfigError> {
        let (mut patch, mut error) = AnimationPatch::decode(message);

        if patch
            .channel
            .as_ref()
            .is_some_and(|channel| channel.index >= self.channel_count)
        {
            patch.channel = None;
            ConfigError::keep_first(&mut error, ConfigError::UnknownChannel);
        }

        if !patch.is_empty() && self.patches.try_send(patch).is_err() {
            error = Some(ConfigError::QueueFull);
        }

        match error {
            Some(error) => {
                #[cfg(feature = "esp32-log")]
                println!("[ConfigUpdater.submit] {}", error);
                Err(error)
            }
            None => Ok(()),
        }
    }
}
