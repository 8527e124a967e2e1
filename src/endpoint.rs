//! Endpoint table
//!
//! The transport addresses targets by an external key (a characteristic UUID
//! in the BLE firmware). Keys are resolved to an [`EndpointHandle`] once, at
//! the boundary; everything after that dispatches by handle.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::Vec;

use crate::config::{ConfigMessage, ConfigUpdater};
use crate::error::ConfigError;
use crate::fan::{FanControl, PwmOutput};

/// Stable handle assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointHandle(u8);

impl EndpointHandle {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Something the transport can write to
pub enum Endpoint<'a, P: PwmOutput, const SIZE: usize> {
    /// Animation configuration of one strip
    Strip(ConfigUpdater<'a, SIZE>),
    /// Speed of one fan
    Fan(FanControl<P>),
}

/// Payload of an inbound write
#[derive(Debug, Clone, Copy)]
pub enum EndpointWrite<'m> {
    Config(ConfigMessage<'m>),
    Duty(i32),
}

/// Error returned by [`EndpointTable::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// Every slot is taken
    Full,
    /// The key is already registered
    DuplicateKey,
}

/// Error returned by [`EndpointTable::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    UnknownEndpoint,
    /// The payload kind does not match the endpoint kind
    PayloadMismatch,
    Config(ConfigError),
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "endpoint table is full"),
            Self::DuplicateKey => write!(f, "endpoint key already registered"),
        }
    }
}

impl core::error::Error for RegisterError {}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEndpoint => write!(f, "unknown endpoint"),
            Self::PayloadMismatch => write!(f, "payload does not match endpoint"),
            Self::Config(error) => write!(f, "config update failed: {}", error),
        }
    }
}

impl core::error::Error for DispatchError {}

impl From<ConfigError> for DispatchError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Registry of up to `N` endpoints
pub struct EndpointTable<'a, P: PwmOutput, const SIZE: usize, const N: usize> {
    entries: Vec<(&'a str, Endpoint<'a, P, SIZE>), N>,
}

impl<P: PwmOutput, const SIZE: usize, const N: usize> Default for EndpointTable<'_, P, SIZE, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P: PwmOutput, const SIZE: usize, const N: usize> EndpointTable<'a, P, SIZE, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `endpoint` under `key` and return its handle
    pub fn register(
        &mut self,
        key: &'a str,
        endpoint: Endpoint<'a, P, SIZE>,
    ) -> Result<EndpointHandle, RegisterError> {
        if self.handle_of(key).is_some() {
            return Err(RegisterError::DuplicateKey);
        }
        let index = u8::try_from(self.entries.len()).map_err(|_| RegisterError::Full)?;
        self.entries
            .push((key, endpoint))
            .map_err(|_| RegisterError::Full)?;
        Ok(EndpointHandle(index))
    }

    /// Resolve an external key
    pub fn handle_of(&self, key: &str) -> Option<EndpointHandle> {
        self.entries
            .iter()
            .position(|(entry_key, _)| *entry_key == key)
            .and_then(|index| u8::try_from(index).ok())
            .map(EndpointHandle)
    }

    pub fn get(&self, handle: EndpointHandle) -> Option<&Endpoint<'a, P, SIZE>> {
        self.entries.get(handle.index()).map(|(_, endpoint)| endpoint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route a write to the endpoint behind `handle`
    pub fn dispatch(
        &mut self,
        handle: EndpointHandle,
        write: EndpointWrite<'_>,
    ) -> Result<(), DispatchError> {
        let Some((_key, endpoint)) = self.entries.get_mut(handle.index()) else {
            return Err(DispatchError::UnknownEndpoint);
        };

        #[cfg(feature = "esp32-log")]
        println!("[EndpointTable.dispatch] {} <- {:?}", _key, write);

        match (endpoint, write) {
            (Endpoint::Strip(updater), EndpointWrite::Config(message)) => {
                updater.submit(&message)?;
            }
            (Endpoint::Fan(fan), EndpointWrite::Duty(duty)) => {
                fan.set_speed(duty);
            }
            _ => return Err(DispatchError::PayloadMismatch),
        }
        Ok(())
    }
}
