//! Control loop pacing.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::controller::{Controller, TickEvents};
use crate::math8::elapsed;
use crate::{Inputs, OutputDriver};

/// Default time between two control loop ticks.
///
/// Effects run on their own intervals of 5 ms and more, so a 1 ms tick keeps
/// every animation on time while leaving the core idle most of the loop.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Result of a tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// State changes observed during the tick.
    pub events: TickEvents,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable tick scheduler that owns the inputs and the controller.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Samples the inputs and runs the controller
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(inputs, controller);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<I: Inputs, O: OutputDriver> {
    inputs: I,
    controller: Controller<O>,
    next_tick: Option<Instant>,
    tick_period: Duration,
}

impl<I: Inputs, O: OutputDriver> TickScheduler<I, O> {
    /// Create a new scheduler.
    ///
    /// Uses `DEFAULT_TICK_PERIOD` for pacing.
    pub fn new(inputs: I, controller: Controller<O>) -> Self {
        Self::with_tick_period(inputs, controller, DEFAULT_TICK_PERIOD)
    }

    /// Create a new scheduler with custom tick period.
    pub fn with_tick_period(inputs: I, controller: Controller<O>, tick_period: Duration) -> Self {
        Self {
            inputs,
            controller,
            next_tick: None,
            tick_period,
        }
    }

    /// Run one control loop iteration and return timing information.
    ///
    /// Falling more than two periods behind resets the schedule to `now`
    /// instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = self.tick_period * 2;
        let next_tick = match self.next_tick {
            Some(next) if time_until(now, next).is_some() || elapsed(now, next) <= max_drift => {
                next
            }
            _ => now,
        };

        let events = self.controller.tick(now, &mut self.inputs);

        let next_deadline =
            Instant::from_ticks(next_tick.as_ticks().wrapping_add(self.tick_period.as_ticks()));
        self.next_tick = Some(next_deadline);

        let sleep_duration = time_until(now, next_deadline).unwrap_or(Duration::from_ticks(0));

        TickResult {
            events,
            next_deadline,
            sleep_duration,
        }
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &Controller<O> {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub fn controller_mut(&mut self) -> &mut Controller<O> {
        &mut self.controller
    }

    /// Get a mutable reference to the inputs.
    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }
}

/// Time left until `deadline`, or `None` once it has passed
///
/// Tick differences past half the counter range count as behind, so a
/// wrapping clock keeps its order.
fn time_until(now: Instant, deadline: Instant) -> Option<Duration> {
    let ahead = elapsed(deadline, now);
    (ahead.as_ticks() <= u64::MAX / 2).then_some(ahead)
}
