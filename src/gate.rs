//! Channel output gate
//!
//! Every intensity write goes through the gate. It caches the last written
//! level per channel so repeated writes of the same value never reach the
//! driver, and it replaces abrupt cuts to zero with a stepped soft-off that
//! is advanced once per control loop tick.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::channel::{CHANNEL_COUNT, ChannelId};
use crate::math8::{is_due, percent_to_pwm};

/// Default decrement applied on every soft-off step
pub const DEFAULT_SOFT_OFF_STEP: u8 = 8;

/// Default time between two soft-off steps
pub const DEFAULT_SOFT_OFF_INTERVAL: Duration = Duration::from_millis(30);

/// Configuration of the soft-off decay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftOffConfig {
    /// Decrement per step. A level at or below this snaps to zero.
    pub step: u8,
    /// Time between steps
    pub interval: Duration,
}

impl SoftOffConfig {
    pub const DEFAULT: Self = Self {
        step: DEFAULT_SOFT_OFF_STEP,
        interval: DEFAULT_SOFT_OFF_INTERVAL,
    };
}

impl Default for SoftOffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    /// Last level written to the driver
    level: u8,
    /// Soft-off decay in progress
    soft_off: bool,
    /// Time of the last soft-off step
    soft_off_last: Option<Instant>,
}

/// Deduplicating, soft-off aware writer in front of an [`OutputDriver`]
pub struct OutputGate<O: OutputDriver> {
    driver: O,
    channels: [ChannelState; CHANNEL_COUNT],
    soft_off: SoftOffConfig,
}

impl<O: OutputDriver> OutputGate<O> {
    /// Create a new gate. All channels start at zero.
    pub fn new(driver: O, soft_off: SoftOffConfig) -> Self {
        Self {
            driver,
            channels: [ChannelState::default(); CHANNEL_COUNT],
            soft_off: SoftOffConfig {
                step: soft_off.step.max(1),
                interval: soft_off.interval,
            },
        }
    }

    /// Set a channel intensity
    ///
    /// A zero request on a lit channel arms soft-off instead of cutting the
    /// output. Any nonzero request cancels a pending soft-off. Candle writes
    /// always land on both members of the pair.
    pub fn set(&mut self, channel: ChannelId, value: u8) {
        if value != 0 {
            self.disarm(channel);
        }

        if value == 0 && self.is_lit(channel) {
            self.arm(channel);
            return;
        }

        match channel.sibling() {
            Some(sibling) => {
                self.write(channel, value);
                self.write(sibling, value);
            }
            None => self.write(channel, value),
        }
    }

    /// Set a channel intensity by raw index, ignoring out-of-range indices
    pub fn set_index(&mut self, index: usize, value: u8) {
        if let Some(channel) = ChannelId::from_index(index) {
            self.set(channel, value);
        }
    }

    /// Set a channel intensity as a percentage (0-100)
    pub fn set_percent(&mut self, channel: ChannelId, percent: u8) {
        self.set(channel, percent_to_pwm(percent));
    }

    /// Write flicker levels to the candle pair
    ///
    /// Each candle is written independently. A candle that is fading out is
    /// left alone until its soft-off completes.
    pub fn write_candle(&mut self, level1: u8, level2: u8) {
        if !self.channels[ChannelId::Candle1.index()].soft_off {
            self.write(ChannelId::Candle1, level1);
        }
        if !self.channels[ChannelId::Candle2.index()].soft_off {
            self.write(ChannelId::Candle2, level2);
        }
    }

    /// Advance every armed soft-off by at most one step
    ///
    /// Call this on every loop iteration.
    pub fn advance_soft_off(&mut self, now: Instant) {
        for channel in ChannelId::ALL {
            let state = self.channels[channel.index()];
            if !state.soft_off || !is_due(now, state.soft_off_last, self.soft_off.interval) {
                continue;
            }

            // The candle pair decays on a shared timer from its brighter member
            let lead = match channel.sibling() {
                Some(sibling) => state.level.max(self.level(sibling)),
                None => state.level,
            };
            let next = lead.saturating_sub(self.soft_off.step);
            self.channels[channel.index()].soft_off_last = Some(now);
            self.write(channel, next);
            if let Some(sibling) = channel.sibling() {
                self.channels[sibling.index()].soft_off_last = Some(now);
                self.write(sibling, next);
            }
            if next == 0 {
                self.disarm(channel);
            }
        }
    }

    /// Last level written to a channel
    pub fn level(&self, channel: ChannelId) -> u8 {
        self.channels[channel.index()].level
    }

    /// Levels of all channels in index order
    pub fn levels(&self) -> [u8; CHANNEL_COUNT] {
        let mut levels = [0; CHANNEL_COUNT];
        for (level, state) in levels.iter_mut().zip(self.channels.iter()) {
            *level = state.level;
        }
        levels
    }

    /// Check if a soft-off is in progress on a channel
    pub fn is_soft_off(&self, channel: ChannelId) -> bool {
        self.channels[channel.index()].soft_off
    }

    /// Check if any channel is still fading out
    pub fn any_soft_off(&self) -> bool {
        self.channels.iter().any(|state| state.soft_off)
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &O {
        &self.driver
    }

    /// Get a mutable reference to the driver
    pub fn driver_mut(&mut self) -> &mut O {
        &mut self.driver
    }

    fn is_lit(&self, channel: ChannelId) -> bool {
        self.channels[channel.index()].level > 0
            || channel
                .sibling()
                .is_some_and(|sibling| self.channels[sibling.index()].level > 0)
    }

    fn arm(&mut self, channel: ChannelId) {
        self.channels[channel.index()].soft_off = true;
        if let Some(sibling) = channel.sibling() {
            self.channels[sibling.index()].soft_off = true;
        }
    }

    fn disarm(&mut self, channel: ChannelId) {
        self.channels[channel.index()].soft_off = false;
        if let Some(sibling) = channel.sibling() {
            self.channels[sibling.index()].soft_off = false;
        }
    }

    /// Write to the driver if the level changed
    fn write(&mut self, channel: ChannelId, value: u8) {
        let state = &mut self.channels[channel.index()];
        if state.level != value {
            state.level = value;
            self.driver.write(channel, value);
        }
    }
}
