#![no_std]

pub mod channel;
pub mod controller;
pub mod effect;
pub mod gate;
pub mod hal;
pub mod input;
pub mod math8;
pub mod mode;
pub mod profile;
pub mod scheduler;
pub mod snapshot;

pub use channel::{CHANNEL_COUNT, ChannelId};
pub use controller::{Controller, ControllerConfig, ControllerEvent, TickEvents};
pub use effect::ChannelEffect;
pub use gate::{OutputGate, SoftOffConfig};
pub use hal::{PinInputs, PwmOutputs};
pub use input::{Level, MotionReleasePolicy};
pub use mode::Mode;
pub use profile::{Profile, profile_for};
pub use scheduler::{TickResult, TickScheduler};
pub use snapshot::ModeSnapshot;

pub use math8::percent_to_pwm;
pub use embassy_time::{Duration, Instant};

/// Abstract PWM driver trait
///
/// Implement this trait to support different hardware platforms.
/// The controller is generic over this trait.
pub trait OutputDriver {
    /// Write an 8-bit duty cycle to a channel
    fn write(&mut self, channel: ChannelId, duty: u8);
}

/// Abstract input trait
///
/// Sampled once per tick by the controller.
pub trait Inputs {
    /// Raw level of the mode button (pull-up, `Low` while pressed)
    fn button_level(&mut self) -> Level;
    /// Raw level of the motion sensor (`High` while motion is sensed)
    fn motion_level(&mut self) -> Level;
}
