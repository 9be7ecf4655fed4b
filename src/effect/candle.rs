//! Candle flicker for the paired candle channels
//!
//! Both candles chase a new random target on every update. The primary
//! candle moves quickly toward it, the secondary one is heavily smoothed,
//! which keeps the two flames visibly desynchronized. The update interval is
//! itself random so the flicker has no perceivable period.

use embassy_time::{Duration, Instant};
use rand::Rng;

use crate::OutputDriver;
use crate::gate::OutputGate;
use crate::math8::{chance, is_due, random_between};

/// Ceiling of the secondary candle relative to the primary, in percent
pub const SECONDARY_CEILING_PCT: u16 = 80;

const MIN_INTERVAL_MS: u32 = 15;
const MAX_INTERVAL_MS: u32 = 55;
const INITIAL_INTERVAL_MS: u64 = 30;

/// Lower bound of the regular target range, percent of ceiling
const TARGET_FLOOR_PCT: u16 = 35;
/// Upper bound of the occasional dip range, percent of ceiling
const DIP_CEILING_PCT: u16 = 86;
/// Absolute floor of any target
const TARGET_MIN: u16 = 5;

/// Out of 10: rolls above this value produce a dip
const DIP_THRESHOLD: u8 = 5;

const PRIMARY_SNAP_PCT: u8 = 12;
const SECONDARY_SNAP_PCT: u8 = 8;

/// Derive the candle pair ceilings from the primary ceiling
///
/// The secondary candle is always capped at 80% of the primary.
#[allow(clippy::cast_possible_truncation)]
pub const fn candle_ceilings(ceiling: u8) -> (u8, u8) {
    let secondary = (ceiling as u16 * SECONDARY_CEILING_PCT / 100) as u8;
    (ceiling, secondary)
}

#[derive(Debug, Clone, Copy)]
struct TargetRange {
    floor: u32,
    ceiling: u32,
    dip_ceiling: u32,
}

impl TargetRange {
    fn new(ceiling: u8) -> Self {
        let ceiling16 = u16::from(ceiling);
        Self {
            floor: u32::from((ceiling16 * TARGET_FLOOR_PCT / 100).max(TARGET_MIN)),
            ceiling: u32::from(ceiling),
            dip_ceiling: u32::from((ceiling16 * DIP_CEILING_PCT / 100).max(TARGET_MIN)),
        }
    }

    /// Level a candle starts from when it was dark
    #[allow(clippy::cast_possible_truncation)]
    fn midpoint(self) -> u8 {
        ((self.floor + self.ceiling) / 2).min(self.ceiling) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> u8 {
        let mut target = random_between(rng, self.floor, self.ceiling);
        if rng.random_range(0..10u8) > DIP_THRESHOLD {
            target = random_between(rng, u32::from(TARGET_MIN), self.dip_ceiling);
        }
        target.min(self.ceiling) as u8
    }
}

/// Flicker state of the candle pair
#[derive(Debug, Clone)]
pub struct CandleFlicker {
    level1: u8,
    level2: u8,
    last_update: Option<Instant>,
    next_interval: Duration,
}

impl Default for CandleFlicker {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleFlicker {
    pub const fn new() -> Self {
        Self {
            level1: 0,
            level2: 0,
            last_update: None,
            next_interval: Duration::from_millis(INITIAL_INTERVAL_MS),
        }
    }

    /// Advance the flicker and write both candles
    ///
    /// Returns early when the current randomized interval has not elapsed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn update<O: OutputDriver, R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        ceiling: u8,
        rng: &mut R,
        gate: &mut OutputGate<O>,
    ) {
        if !is_due(now, self.last_update, self.next_interval) {
            return;
        }
        self.last_update = Some(now);
        self.next_interval = Duration::from_millis(u64::from(random_between(
            rng,
            MIN_INTERVAL_MS,
            MAX_INTERVAL_MS,
        )));

        let (max1, max2) = candle_ceilings(ceiling);
        let range1 = TargetRange::new(max1);
        let range2 = TargetRange::new(max2);

        // A lower ceiling takes effect immediately
        self.level1 = self.level1.min(max1);
        self.level2 = self.level2.min(max2);
        if self.level1 == 0 && max1 > 0 {
            self.level1 = range1.midpoint();
        }
        if self.level2 == 0 && max2 > 0 {
            self.level2 = range2.midpoint();
        }

        // Primary: 2/3 toward the target
        let target1 = range1.roll(rng);
        self.level1 = if chance(rng, PRIMARY_SNAP_PCT) {
            target1
        } else {
            ((u16::from(self.level1) + u16::from(target1) * 2) / 3) as u8
        };

        // Secondary: 1/4 toward the target
        let target2 = range2.roll(rng);
        self.level2 = if chance(rng, SECONDARY_SNAP_PCT) {
            target2
        } else {
            ((u16::from(self.level2) * 3 + u16::from(target2)) / 4) as u8
        };

        gate.write_candle(self.level1, self.level2);
    }

    /// Forget the flame levels, the next update starts from the midpoint
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current flame levels of the primary and secondary candle
    pub const fn levels(&self) -> (u8, u8) {
        (self.level1, self.level2)
    }
}
