//! Triangle-wave effects
//!
//! Stateless: the level is a pure function of the current time.
//!
//! - [`Breathing`]: a single channel breathing between two levels
//! - [`DevotionalBreathing`]: a leading channel and a phase-shifted,
//!   dimmer follower
//! - [`SeaWave`]: two zones in opposite phase, handing brightness back and forth

use embassy_time::Instant;

use crate::math8::{clamp_u8, lerp_pct, ordered, scale_percent, triangle_pct};

const BREATHING_MIN_PERIOD_MS: u64 = 1_000;
const SEA_WAVE_MIN_PERIOD_MS: u64 = 1_200;

const fn floor_period(period_ms: u64, min_ms: u64) -> u64 {
    if period_ms < min_ms { min_ms } else { period_ms }
}

/// Single-channel breathing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breathing {
    min_pct: u8,
    max_pct: u8,
    period_ms: u64,
}

impl Breathing {
    /// Percentages are clamped to 1-100, the period is floored at one second
    pub const fn new(min_pct: u8, max_pct: u8, period_ms: u64) -> Self {
        let (min_pct, max_pct) = ordered(clamp_u8(min_pct, 1, 100), clamp_u8(max_pct, 1, 100));
        Self {
            min_pct,
            max_pct,
            period_ms: floor_period(period_ms, BREATHING_MIN_PERIOD_MS),
        }
    }

    /// Level in percent at `now`
    pub const fn level(&self, now: Instant) -> u8 {
        let wave = triangle_pct(now.as_millis(), self.period_ms);
        lerp_pct(self.min_pct, self.max_pct, wave)
    }

    pub const fn min_pct(&self) -> u8 {
        self.min_pct
    }

    pub const fn max_pct(&self) -> u8 {
        self.max_pct
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

/// Paired breathing: the follower runs `delay_ms` ahead on the same wave
/// and is scaled down by `follower_scale_pct`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevotionalBreathing {
    min_pct: u8,
    max_pct: u8,
    period_ms: u64,
    delay_ms: u64,
    follower_scale_pct: u8,
}

impl DevotionalBreathing {
    pub const fn new(
        min_pct: u8,
        max_pct: u8,
        period_ms: u64,
        delay_ms: u64,
        follower_scale_pct: u8,
    ) -> Self {
        let (min_pct, max_pct) = ordered(clamp_u8(min_pct, 1, 100), clamp_u8(max_pct, 1, 100));
        let period_ms = floor_period(period_ms, BREATHING_MIN_PERIOD_MS);
        let delay_ms = if delay_ms > period_ms - 1 {
            period_ms - 1
        } else {
            delay_ms
        };
        Self {
            min_pct,
            max_pct,
            period_ms,
            delay_ms,
            follower_scale_pct: clamp_u8(follower_scale_pct, 1, 100),
        }
    }

    /// Levels in percent of the leading and the following channel
    pub const fn levels(&self, now: Instant) -> (u8, u8) {
        let t = now.as_millis();
        let lead_wave = triangle_pct(t, self.period_ms);
        let follow_wave = triangle_pct(t.wrapping_add(self.delay_ms), self.period_ms);

        let lead = lerp_pct(self.min_pct, self.max_pct, lead_wave);
        let follow_base = lerp_pct(self.min_pct, self.max_pct, follow_wave);
        (lead, scale_percent(follow_base, self.follower_scale_pct))
    }

    pub const fn min_pct(&self) -> u8 {
        self.min_pct
    }

    pub const fn max_pct(&self) -> u8 {
        self.max_pct
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub const fn follower_scale_pct(&self) -> u8 {
        self.follower_scale_pct
    }
}

/// Two-zone oscillation with a half-period offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeaWave {
    lead_min_pct: u8,
    lead_max_pct: u8,
    group_min_pct: u8,
    group_max_pct: u8,
    period_ms: u64,
}

impl SeaWave {
    pub const fn new(
        lead_min_pct: u8,
        lead_max_pct: u8,
        group_min_pct: u8,
        group_max_pct: u8,
        period_ms: u64,
    ) -> Self {
        let (lead_min_pct, lead_max_pct) =
            ordered(clamp_u8(lead_min_pct, 0, 100), clamp_u8(lead_max_pct, 0, 100));
        let (group_min_pct, group_max_pct) =
            ordered(clamp_u8(group_min_pct, 0, 100), clamp_u8(group_max_pct, 0, 100));
        Self {
            lead_min_pct,
            lead_max_pct,
            group_min_pct,
            group_max_pct,
            period_ms: floor_period(period_ms, SEA_WAVE_MIN_PERIOD_MS),
        }
    }

    /// Levels in percent of the lead zone and the opposite group
    pub const fn levels(&self, now: Instant) -> (u8, u8) {
        let t = now.as_millis();
        let lead_wave = triangle_pct(t, self.period_ms);
        let group_wave = triangle_pct(t.wrapping_add(self.period_ms / 2), self.period_ms);
        (
            lerp_pct(self.lead_min_pct, self.lead_max_pct, lead_wave),
            lerp_pct(self.group_min_pct, self.group_max_pct, group_wave),
        )
    }

    pub const fn lead_range(&self) -> (u8, u8) {
        (self.lead_min_pct, self.lead_max_pct)
    }

    pub const fn group_range(&self) -> (u8, u8) {
        (self.group_min_pct, self.group_max_pct)
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }
}
