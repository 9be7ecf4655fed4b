//! Fade in/out
//!
//! A bounded back-and-forth ramp between two levels. Each channel owns a
//! [`FadeState`] that persists across ticks; the ramp advances by one jittered
//! step whenever its interval elapses and reflects at both bounds.

use embassy_time::{Duration, Instant};
use rand::Rng;

use crate::math8::{clamp_u8, is_due, ordered, percent_to_pwm};

/// Shortest allowed interval between two fade steps
pub const MIN_FADE_INTERVAL_MS: u64 = 5;

/// Base step of every fade, before jitter
pub const FADE_STEP: u8 = 1;

/// Fade parameters in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeConfig {
    min_pct: u8,
    max_pct: u8,
    interval_ms: u64,
}

impl FadeConfig {
    /// Create a fade config
    ///
    /// Percentages are clamped to 0-100 and swapped if inverted, the
    /// interval is floored at 5 ms.
    pub const fn new(min_pct: u8, max_pct: u8, interval_ms: u64) -> Self {
        let (min_pct, max_pct) = ordered(clamp_u8(min_pct, 0, 100), clamp_u8(max_pct, 0, 100));
        let interval_ms = if interval_ms < MIN_FADE_INTERVAL_MS {
            MIN_FADE_INTERVAL_MS
        } else {
            interval_ms
        };
        Self {
            min_pct,
            max_pct,
            interval_ms,
        }
    }

    pub const fn min_pct(&self) -> u8 {
        self.min_pct
    }

    pub const fn max_pct(&self) -> u8 {
        self.max_pct
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Lower bound as a duty value
    pub const fn min_level(&self) -> u8 {
        percent_to_pwm(self.min_pct)
    }

    /// Upper bound as a duty value
    pub const fn max_level(&self) -> u8 {
        percent_to_pwm(self.max_pct)
    }
}

/// Direction of the ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    Up,
    Down,
}

/// Persistent fade state of a single channel
#[derive(Debug, Clone)]
pub struct FadeState {
    value: u8,
    min: u8,
    max: u8,
    step: u8,
    direction: FadeDirection,
    last: Option<Instant>,
    interval: Duration,
    active: bool,
}

impl Default for FadeState {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeState {
    /// Create an unconfigured, inactive fade
    pub const fn new() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 0,
            step: FADE_STEP,
            direction: FadeDirection::Up,
            last: None,
            interval: Duration::from_millis(MIN_FADE_INTERVAL_MS),
            active: false,
        }
    }

    /// Apply new bounds and interval
    ///
    /// Does nothing if the fade already runs with the same configuration,
    /// so calling this every tick never restarts a fade in progress.
    /// Otherwise the fade restarts at its minimum, inactive.
    pub fn configure(&mut self, config: &FadeConfig) {
        let (min, max) = (config.min_level(), config.max_level());
        let interval = config.interval();
        if self.min == min && self.max == max && self.interval == interval {
            return;
        }
        self.min = min;
        self.max = max;
        self.step = FADE_STEP;
        self.interval = interval;
        self.value = min;
        self.direction = FadeDirection::Up;
        self.last = None;
        self.active = false;
    }

    /// Start the fade
    ///
    /// An inactive fade restarts from its minimum going up, and its first
    /// step is due immediately. Activating a running fade does nothing.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.value = self.min;
        self.direction = FadeDirection::Up;
        self.last = None;
    }

    /// Stop the fade, keeping its configuration
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance the ramp
    ///
    /// Returns the new level when a step was taken, `None` if the fade is
    /// inactive or the interval has not elapsed yet.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Option<u8> {
        if !self.active || !is_due(now, self.last, self.interval) {
            return None;
        }
        self.last = Some(now);

        let jitter = rng.random_range(-1i16..=1);
        let step = (i16::from(self.step) + jitter).max(0);
        let delta = match self.direction {
            FadeDirection::Up => step,
            FadeDirection::Down => -step,
        };

        let mut next = i16::from(self.value) + delta;
        if next >= i16::from(self.max) {
            next = i16::from(self.max);
            self.direction = FadeDirection::Down;
        } else if next <= i16::from(self.min) {
            next = i16::from(self.min);
            self.direction = FadeDirection::Up;
        }

        self.value = next as u8;
        Some(self.value)
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub const fn min(&self) -> u8 {
        self.min
    }

    pub const fn max(&self) -> u8 {
        self.max
    }

    pub const fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
}
