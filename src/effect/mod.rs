//! Effect primitives and the per-channel effect assignment
//!
//! All effects are plain values stored in an enum to avoid heap allocations.
//! Stateful effects keep their state in the controller's per-channel tables,
//! the enum only carries their fixed parameters.

mod candle;
mod fade;
mod flash;
mod wave;

use core::fmt;

pub use candle::{CandleFlicker, SECONDARY_CEILING_PCT, candle_ceilings};
pub use fade::{FADE_STEP, FadeConfig, FadeDirection, FadeState, MIN_FADE_INTERVAL_MS};
pub use flash::{FlashState, RandomFlash};
pub use wave::{Breathing, DevotionalBreathing, SeaWave};

use crate::math8::{percent_to_pwm, scale_percent};

const EFFECT_NAME_OFF: &str = "off";
const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_CANDLE: &str = "candle";
const EFFECT_NAME_CANDLE_PAIR: &str = "candle_pair";
const EFFECT_NAME_FADE: &str = "fade";
const EFFECT_NAME_BREATHING: &str = "breathing";
const EFFECT_NAME_DEVOTIONAL_LEAD: &str = "devotional_lead";
const EFFECT_NAME_DEVOTIONAL_FOLLOWER: &str = "devotional_follower";
const EFFECT_NAME_SEA_WAVE_LEAD: &str = "sea_wave_lead";
const EFFECT_NAME_SEA_WAVE_GROUP: &str = "sea_wave_group";
const EFFECT_NAME_RANDOM_FLASH: &str = "random_flash";

/// The single effect that owns a channel for a (mode, motion) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEffect {
    /// Channel is switched off (through soft-off)
    Off,
    /// Fixed level in percent
    Static(u8),
    /// Candle flicker driving the whole candle pair. Only valid on `Candle1`.
    Candle {
        /// Primary candle ceiling (0-255)
        ceiling: u8,
    },
    /// Secondary candle, written by the `Candle` effect on `Candle1`
    CandlePair,
    /// Back-and-forth ramp
    Fade(FadeConfig),
    /// Single-channel breathing
    Breathing(Breathing),
    /// Leading channel of a devotional breathing pair
    DevotionalLead(DevotionalBreathing),
    /// Phase-shifted follower of a devotional breathing pair
    DevotionalFollower(DevotionalBreathing),
    /// Lead zone of a sea wave
    SeaWaveLead(SeaWave),
    /// Opposite zone of a sea wave
    SeaWaveGroup(SeaWave),
    /// Dim base level with random flashes
    RandomFlash(RandomFlash),
}

impl ChannelEffect {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => EFFECT_NAME_OFF,
            Self::Static(_) => EFFECT_NAME_STATIC,
            Self::Candle { .. } => EFFECT_NAME_CANDLE,
            Self::CandlePair => EFFECT_NAME_CANDLE_PAIR,
            Self::Fade(_) => EFFECT_NAME_FADE,
            Self::Breathing(_) => EFFECT_NAME_BREATHING,
            Self::DevotionalLead(_) => EFFECT_NAME_DEVOTIONAL_LEAD,
            Self::DevotionalFollower(_) => EFFECT_NAME_DEVOTIONAL_FOLLOWER,
            Self::SeaWaveLead(_) => EFFECT_NAME_SEA_WAVE_LEAD,
            Self::SeaWaveGroup(_) => EFFECT_NAME_SEA_WAVE_GROUP,
            Self::RandomFlash(_) => EFFECT_NAME_RANDOM_FLASH,
        }
    }

    /// Check if the effect keeps a fade state
    pub const fn uses_fade(&self) -> bool {
        matches!(self, Self::Fade(_))
    }

    /// Check if the effect keeps a flash state
    pub const fn uses_flash(&self) -> bool {
        matches!(self, Self::RandomFlash(_))
    }

    /// Typical duty level of the effect, for diagnostics
    ///
    /// Static levels are exact. Oscillating effects report the middle of
    /// their range, random flashes their base level. The candle pair cannot
    /// know its ceiling on its own and reports zero; the profile resolves it.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn representative_level(&self) -> u8 {
        match self {
            Self::Off | Self::CandlePair => 0,
            Self::Static(pct) => percent_to_pwm(*pct),
            Self::Candle { ceiling } => *ceiling,
            Self::Fade(config) => {
                ((config.min_level() as u16 + config.max_level() as u16) / 2) as u8
            }
            Self::Breathing(breathing) => percent_to_pwm(midpoint(
                breathing.min_pct(),
                breathing.max_pct(),
            )),
            Self::DevotionalLead(breathing) => percent_to_pwm(midpoint(
                breathing.min_pct(),
                breathing.max_pct(),
            )),
            Self::DevotionalFollower(breathing) => percent_to_pwm(scale_percent(
                midpoint(breathing.min_pct(), breathing.max_pct()),
                breathing.follower_scale_pct(),
            )),
            Self::SeaWaveLead(wave) => {
                let (min, max) = wave.lead_range();
                percent_to_pwm(midpoint(min, max))
            }
            Self::SeaWaveGroup(wave) => {
                let (min, max) = wave.group_range();
                percent_to_pwm(midpoint(min, max))
            }
            Self::RandomFlash(flash) => percent_to_pwm(flash.base_pct()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn midpoint(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

impl fmt::Display for ChannelEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::Static(pct) => write!(f, "static {}%", pct),
            Self::Candle { ceiling } => {
                let (_, secondary) = candle_ceilings(*ceiling);
                write!(f, "candle {} (pair capped at {})", ceiling, secondary)
            }
            Self::CandlePair => write!(f, "candle pair"),
            Self::Fade(config) => write!(
                f,
                "fade {}%-{}% every {}ms",
                config.min_pct(),
                config.max_pct(),
                config.interval().as_millis()
            ),
            Self::Breathing(breathing) => write!(
                f,
                "breathing {}%-{}% over {}ms",
                breathing.min_pct(),
                breathing.max_pct(),
                breathing.period_ms()
            ),
            Self::DevotionalLead(breathing) => write!(
                f,
                "devotional breathing {}%-{}% over {}ms",
                breathing.min_pct(),
                breathing.max_pct(),
                breathing.period_ms()
            ),
            Self::DevotionalFollower(breathing) => write!(
                f,
                "devotional echo +{}ms at {}%",
                breathing.delay_ms(),
                breathing.follower_scale_pct()
            ),
            Self::SeaWaveLead(wave) => {
                let (min, max) = wave.lead_range();
                write!(f, "sea wave lead {}%-{}% over {}ms", min, max, wave.period_ms())
            }
            Self::SeaWaveGroup(wave) => {
                let (min, max) = wave.group_range();
                write!(f, "sea wave group {}%-{}% over {}ms", min, max, wave.period_ms())
            }
            Self::RandomFlash(flash) => {
                let (peak_min, peak_max) = flash.peak_range();
                write!(
                    f,
                    "dim {}% + random flash {}%-{}% ({}% chance)",
                    flash.base_pct(),
                    peak_min,
                    peak_max,
                    flash.chance_pct()
                )
            }
        }
    }
}
