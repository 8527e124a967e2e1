#![no_std]

pub mod color;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fan;
pub mod filter;
pub mod frame;
pub mod frame_scheduler;
pub mod mailbox;
pub mod model;
pub mod presets;
pub mod renderer;
pub mod timeline;

pub use config::{
    AnimationPatch, ChannelPatch, ConfigMessage, ConfigUpdater, PatchMailbox, PatchReceiver,
    PatchSender,
};
pub use endpoint::{Endpoint, EndpointHandle, EndpointTable, EndpointWrite};
pub use error::{ConfigError, Field};
pub use fan::{FanControl, PwmOutput};
pub use frame::generate_frame;
pub use frame_scheduler::{FrameScheduler, Player};
pub use mailbox::Mailbox;
pub use model::{AnimationModel, Channel, Keyframe};
pub use renderer::{Renderer, RendererConfig};
pub use timeline::CycleTiming;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms. A frame is
/// delivered as one `set_pixel` call per pixel followed by a single `flush`
/// that latches it onto the strip.
pub trait OutputDriver {
    /// Stage the color of one pixel
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Transmit staged pixels to the hardware
    fn flush(&mut self);

    /// Write a whole frame
    fn write(&mut self, colors: &[Rgb]) {
        for (index, color) in colors.iter().enumerate() {
            self.set_pixel(index, *color);
        }
        self.flush();
    }
}
