//! Button debouncing and the motion latch
//!
//! Both are polled once per tick with the raw pin level and the current time.

use embassy_time::{Duration, Instant};

use crate::math8::elapsed;

/// Default button debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Default length of the motion window
pub const DEFAULT_MOTION_WINDOW: Duration = Duration::from_millis(30_000);

/// Digital pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Debouncer for an active-low push button with pull-up
///
/// The stable level only changes after the raw level has held for strictly
/// longer than the debounce window.
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    window: Duration,
    last_reading: Level,
    last_change: Instant,
    stable: Level,
}

impl ButtonDebouncer {
    /// Create a debouncer with the button released
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_reading: Level::High,
            last_change: Instant::from_ticks(0),
            stable: Level::High,
        }
    }

    /// Feed a raw reading
    ///
    /// Returns the new stable level when it changes. A stable `Low` is a press.
    pub fn update(&mut self, reading: Level, now: Instant) -> Option<Level> {
        if reading != self.last_reading {
            self.last_change = now;
        }
        self.last_reading = reading;

        if elapsed(now, self.last_change) > self.window && reading != self.stable {
            self.stable = reading;
            return Some(reading);
        }
        None
    }

    /// Debounced level
    pub const fn stable(&self) -> Level {
        self.stable
    }

    /// Check if the button is held down (debounced)
    pub const fn is_pressed(&self) -> bool {
        self.stable.is_low()
    }
}

/// What a falling motion edge does to an active window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionReleasePolicy {
    /// The window runs to its full length, releases are informational
    #[default]
    HoldUntilTimeout,
    /// A release ends the window immediately
    ClearOnRelease,
}

/// Motion latch transitions observed in one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionUpdate {
    /// Rising edge opened a new window
    pub started: bool,
    /// Rising edge while the window was already open
    pub ignored: bool,
    /// Falling edge that left the window open
    pub released: bool,
    /// Falling edge that closed the window
    pub cleared: bool,
    /// Window closed because it ran its full length
    pub timed_out: bool,
}

impl MotionUpdate {
    /// Check if the latch changed state
    pub const fn changed(&self) -> bool {
        self.started || self.cleared || self.timed_out
    }
}

/// Motion window latched by a rising sensor edge
#[derive(Debug, Clone)]
pub struct MotionLatch {
    window: Duration,
    policy: MotionReleasePolicy,
    last_level: Level,
    started: Option<Instant>,
}

impl MotionLatch {
    pub const fn new(window: Duration, policy: MotionReleasePolicy) -> Self {
        Self {
            window,
            policy,
            last_level: Level::Low,
            started: None,
        }
    }

    /// Feed a raw sensor reading (active high)
    pub fn update(&mut self, reading: Level, now: Instant) -> MotionUpdate {
        let mut update = MotionUpdate::default();
        let rising = reading.is_high() && self.last_level.is_low();
        let falling = reading.is_low() && self.last_level.is_high();
        self.last_level = reading;

        if rising {
            if self.started.is_none() {
                self.started = Some(now);
                update.started = true;
            } else {
                update.ignored = true;
            }
        } else if falling {
            match self.policy {
                MotionReleasePolicy::ClearOnRelease if self.started.is_some() => {
                    self.started = None;
                    update.cleared = true;
                }
                _ => update.released = true,
            }
        }

        if let Some(started) = self.started {
            if elapsed(now, started) >= self.window {
                self.started = None;
                update.timed_out = true;
            }
        }

        update
    }

    /// Check if the motion window is open
    pub const fn is_latched(&self) -> bool {
        self.started.is_some()
    }

    /// Time left in the open window
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let started = self.started?;
        let spent = elapsed(now, started);
        Some(if spent >= self.window {
            Duration::from_ticks(0)
        } else {
            self.window - spent
        })
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub const fn policy(&self) -> MotionReleasePolicy {
        self.policy
    }
}
