//! Fan speed control
//!
//! A fan is a PWM channel with an 8-bit duty cycle. Requests are clamped to
//! `[0, 255]` and written straight through.

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Duty cycle fans start with
pub const FAN_FULL_SPEED: u8 = u8::MAX;

/// PWM channel driving one fan
pub trait PwmOutput {
    /// Write an 8-bit duty cycle
    fn write_duty(&mut self, duty: u8);
}

/// Speed control for one fan
#[derive(Debug)]
pub struct FanControl<P: PwmOutput> {
    pwm: P,
    speed: u8,
}

impl<P: PwmOutput> FanControl<P> {
    /// Create a controller and drive the fan at full speed
    pub fn new(mut pwm: P) -> Self {
        pwm.write_duty(FAN_FULL_SPEED);
        Self {
            pwm,
            speed: FAN_FULL_SPEED,
        }
    }

    /// Clamp `requested` to the duty range and write it
    ///
    /// Returns the duty that was written.
    pub fn set_speed(&mut self, requested: i32) -> u8 {
        let speed = u8::try_from(requested.clamp(0, i32::from(u8::MAX))).unwrap_or(u8::MAX);
        #[cfg(feature = "esp32-log")]
        println!("[FanControl.set_speed] requested {}, writing {}", requested, speed);
        self.speed = speed;
        self.pwm.write_duty(speed);
        speed
    }

    /// Last written duty
    pub const fn speed(&self) -> u8 {
        self.speed
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}
