//! `embedded-hal` adapters
//!
//! Bridges HAL PWM channels and input pins to [`OutputDriver`] and
//! [`Inputs`]. Pin errors are never propagated: a failed read is treated as
//! the idle level of the input and a failed write is dropped.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::channel::{CHANNEL_COUNT, ChannelId};
use crate::input::Level;
use crate::{Inputs, OutputDriver};

/// Six PWM channels in [`ChannelId`] order
pub struct PwmOutputs<P: SetDutyCycle> {
    pins: [P; CHANNEL_COUNT],
}

impl<P: SetDutyCycle> PwmOutputs<P> {
    pub const fn new(pins: [P; CHANNEL_COUNT]) -> Self {
        Self { pins }
    }

    /// Get a reference to the pin of a channel
    pub fn pin(&self, channel: ChannelId) -> &P {
        &self.pins[channel.index()]
    }

    /// Release the pins
    pub fn release(self) -> [P; CHANNEL_COUNT] {
        self.pins
    }
}

impl<P: SetDutyCycle> OutputDriver for PwmOutputs<P> {
    fn write(&mut self, channel: ChannelId, duty: u8) {
        let _ = self.pins[channel.index()].set_duty_cycle_fraction(u16::from(duty), 255);
    }
}

/// Mode button (pull-up, active low) and motion sensor (active high)
pub struct PinInputs<B: InputPin, M: InputPin> {
    button: B,
    motion: M,
}

impl<B: InputPin, M: InputPin> PinInputs<B, M> {
    pub const fn new(button: B, motion: M) -> Self {
        Self { button, motion }
    }

    /// Release the pins
    pub fn release(self) -> (B, M) {
        (self.button, self.motion)
    }
}

impl<B: InputPin, M: InputPin> Inputs for PinInputs<B, M> {
    fn button_level(&mut self) -> Level {
        // Released on error
        self.button.is_high().map_or(Level::High, Level::from)
    }

    fn motion_level(&mut self) -> Level {
        // No motion on error
        self.motion.is_high().map_or(Level::Low, Level::from)
    }
}
