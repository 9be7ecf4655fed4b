use embassy_time::{Duration, Instant};
use rand::Rng;

/// Convert a percentage (0-100) to an 8-bit duty value
///
/// Rounds to the nearest integer, so `100` maps to exactly `255`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn percent_to_pwm(percent: u8) -> u8 {
    let percent = if percent > 100 { 100 } else { percent };
    ((percent as u32 * 255 + 50) / 100) as u8
}

/// Scale an 8-bit value by a percentage (0-100)
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_percent(value: u8, percent: u8) -> u8 {
    let percent = if percent > 100 { 100 } else { percent };
    ((value as u16 * percent as u16) / 100) as u8
}

/// Clamp a value into `min..=max`
#[inline]
pub const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Return the pair sorted ascending
#[inline]
pub const fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a > b { (b, a) } else { (a, b) }
}

/// Time elapsed since `since`
///
/// Uses wrapping subtraction of the raw tick counters, so a counter
/// wraparound between the two readings still yields the right interval.
#[inline]
pub const fn elapsed(now: Instant, since: Instant) -> Duration {
    Duration::from_ticks(now.as_ticks().wrapping_sub(since.as_ticks()))
}

/// Check if `interval` has passed since `last`
///
/// A timer that never fired is always due.
#[inline]
pub fn is_due(now: Instant, last: Option<Instant>, interval: Duration) -> bool {
    match last {
        Some(last) => elapsed(now, last) >= interval,
        None => true,
    }
}

/// Symmetric triangle wave: 0 -> 100 -> 0 over one period
#[allow(clippy::cast_possible_truncation)]
pub const fn triangle_pct(t_ms: u64, period_ms: u64) -> u8 {
    if period_ms < 2 {
        return 0;
    }
    let phase = t_ms % period_ms;
    let half = period_ms / 2;
    let value = if phase < half {
        (phase * 100) / half
    } else {
        ((period_ms - phase) * 100) / half
    };
    if value > 100 { 100 } else { value as u8 }
}

/// Map a wave position (0-100) into `min..=max`
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn lerp_pct(min: u8, max: u8, wave: u8) -> u8 {
    let (min, max) = ordered(min, max);
    let wave = if wave > 100 { 100 } else { wave };
    min + (((max - min) as u16 * wave as u16) / 100) as u8
}

/// Uniform random value in `lo..=hi`
///
/// Returns `lo` when the range is empty or degenerate.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Roll a percentage chance (0-100)
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, percent: u8) -> bool {
    rng.random_range(0..100u8) < percent
}
