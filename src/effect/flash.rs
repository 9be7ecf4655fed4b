//! Dim light with random flashes
//!
//! The channel idles at a low base level. On every check interval a chance
//! is rolled; on success a flash with a random peak and duration starts and
//! runs to completion before the next roll.

use embassy_time::{Duration, Instant};
use rand::Rng;

use crate::math8::{chance, clamp_u8, elapsed, is_due, ordered, random_between};

const MIN_CHECK_INTERVAL_MS: u64 = 20;
const MIN_FLASH_MS: u64 = 20;

/// Random flash parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomFlash {
    base_pct: u8,
    flash_min_pct: u8,
    flash_max_pct: u8,
    check_interval_ms: u64,
    chance_pct: u8,
    flash_min_ms: u64,
    flash_max_ms: u64,
}

impl RandomFlash {
    /// Create a random flash config
    ///
    /// # Arguments
    /// * `base_pct` - idle level, 0-100
    /// * `flash_min_pct`, `flash_max_pct` - peak range, 1-100
    /// * `check_interval_ms` - time between rolls, at least 20 ms
    /// * `chance_pct` - probability of a flash per roll, 1-100
    /// * `flash_min_ms`, `flash_max_ms` - flash duration range, at least 20 ms
    pub const fn new(
        base_pct: u8,
        flash_min_pct: u8,
        flash_max_pct: u8,
        check_interval_ms: u64,
        chance_pct: u8,
        flash_min_ms: u64,
        flash_max_ms: u64,
    ) -> Self {
        let (flash_min_pct, flash_max_pct) = ordered(
            clamp_u8(flash_min_pct, 1, 100),
            clamp_u8(flash_max_pct, 1, 100),
        );
        let flash_min_ms = if flash_min_ms < MIN_FLASH_MS {
            MIN_FLASH_MS
        } else {
            flash_min_ms
        };
        Self {
            base_pct: clamp_u8(base_pct, 0, 100),
            flash_min_pct,
            flash_max_pct,
            check_interval_ms: if check_interval_ms < MIN_CHECK_INTERVAL_MS {
                MIN_CHECK_INTERVAL_MS
            } else {
                check_interval_ms
            },
            chance_pct: clamp_u8(chance_pct, 1, 100),
            flash_min_ms,
            flash_max_ms: if flash_max_ms < flash_min_ms {
                flash_min_ms
            } else {
                flash_max_ms
            },
        }
    }

    pub const fn base_pct(&self) -> u8 {
        self.base_pct
    }

    pub const fn peak_range(&self) -> (u8, u8) {
        (self.flash_min_pct, self.flash_max_pct)
    }

    pub const fn duration_range_ms(&self) -> (u64, u64) {
        (self.flash_min_ms, self.flash_max_ms)
    }

    pub const fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub const fn chance_pct(&self) -> u8 {
        self.chance_pct
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveFlash {
    peak_pct: u8,
    started: Instant,
    duration: Duration,
}

/// Per-channel flash state
#[derive(Debug, Clone, Default)]
pub struct FlashState {
    flash: Option<ActiveFlash>,
    last_check: Option<Instant>,
}

impl FlashState {
    pub const fn new() -> Self {
        Self {
            flash: None,
            last_check: None,
        }
    }

    /// Advance the effect, returning the level in percent to show now
    #[allow(clippy::cast_possible_truncation)]
    pub fn update<R: Rng + ?Sized>(&mut self, now: Instant, config: &RandomFlash, rng: &mut R) -> u8 {
        if let Some(flash) = self.flash {
            if elapsed(now, flash.started) >= flash.duration {
                self.flash = None;
                return config.base_pct;
            }
            return flash.peak_pct;
        }

        if is_due(now, self.last_check, config.check_interval()) {
            self.last_check = Some(now);
            if chance(rng, config.chance_pct) {
                let peak_pct = random_between(
                    rng,
                    u32::from(config.flash_min_pct),
                    u32::from(config.flash_max_pct),
                ) as u8;
                let duration_ms = random_between(
                    rng,
                    config.flash_min_ms as u32,
                    config.flash_max_ms as u32,
                );
                self.flash = Some(ActiveFlash {
                    peak_pct,
                    started: now,
                    duration: Duration::from_millis(u64::from(duration_ms)),
                });
                return peak_pct;
            }
        }

        config.base_pct
    }

    /// Check if a flash is in progress
    pub const fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Drop any running flash and restart the check timer
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
