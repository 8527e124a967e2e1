//! Configuration errors
//!
//! Every error is local: the offending sub-update is dropped and the rest of
//! the message still applies.

use core::fmt;

/// Field of a configuration message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    KeyFrame,
    Color,
    Brightness,
    Delay,
    Duration,
}

impl Field {
    /// Name of the field as it appears in configuration messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyFrame => "keyFrame",
            Self::Color => "color",
            Self::Brightness => "brightness",
            Self::Delay => "delay",
            Self::Duration => "duration",
        }
    }
}

/// Error produced while validating or applying a configuration update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The update referenced a channel the target does not have
    UnknownChannel,
    /// A field failed structural validation and kept its previous value
    MalformedField(Field),
    /// The render loop's mailbox is full; the update was dropped
    QueueFull,
}

impl ConfigError {
    /// Keep the first error of a sequence of validation steps
    pub(crate) fn keep_first(slot: &mut Option<Self>, error: Self) {
        if slot.is_none() {
            *slot = Some(error);
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChannel => write!(f, "unknown channel index"),
            Self::MalformedField(field) => write!(f, "malformed `{}` field", field.as_str()),
            Self::QueueFull => write!(f, "update queue is full"),
        }
    }
}

impl core::error::Error for ConfigError {}
