//! Mode profile table
//!
//! Maps every (mode, motion) pair to exactly one [`ChannelEffect`] per
//! channel. The controller dispatches by lookup into this table, so a
//! channel can never have two writers in the same tick.

use crate::channel::{CHANNEL_COUNT, ChannelId};
use crate::effect::ChannelEffect::{Fade, Off, Static};
use crate::effect::{
    Breathing, ChannelEffect, DevotionalBreathing, FadeConfig, RandomFlash, SeaWave,
    candle_ceilings,
};
use crate::mode::Mode;

/// Effect assignment of all channels for one (mode, motion) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    effects: [ChannelEffect; CHANNEL_COUNT],
}

impl Profile {
    /// Create a profile, effects in channel index order
    pub const fn new(effects: [ChannelEffect; CHANNEL_COUNT]) -> Self {
        Self { effects }
    }

    /// Profile with every channel off
    pub const fn off() -> Self {
        Self::new([ChannelEffect::Off; CHANNEL_COUNT])
    }

    /// Effect owning a channel
    pub const fn effect(&self, channel: ChannelId) -> ChannelEffect {
        self.effects[channel.index()]
    }

    /// Effects in channel index order
    pub const fn effects(&self) -> &[ChannelEffect; CHANNEL_COUNT] {
        &self.effects
    }

    /// Candle ceiling of the profile, if the candles are lit
    pub const fn candle_ceiling(&self) -> Option<u8> {
        match self.effects[ChannelId::Candle1.index()] {
            ChannelEffect::Candle { ceiling } => Some(ceiling),
            _ => None,
        }
    }

    /// Check the single-writer rules of multi-channel effects
    ///
    /// - `Candle` only on `Candle1`, always together with `CandlePair` on
    ///   `Candle2`, and `CandlePair` never without it
    /// - every devotional follower has a lead with the same parameters and
    ///   vice versa
    /// - every sea wave group has a lead with the same parameters and vice versa
    pub fn is_consistent(&self) -> bool {
        let candle1 = self.effect(ChannelId::Candle1);
        let candle2 = self.effect(ChannelId::Candle2);
        let candle_ok = match (candle1, candle2) {
            (ChannelEffect::Candle { .. }, ChannelEffect::CandlePair) => true,
            (ChannelEffect::Candle { .. } | ChannelEffect::CandlePair, _)
            | (_, ChannelEffect::Candle { .. } | ChannelEffect::CandlePair) => false,
            _ => true,
        };
        if !candle_ok {
            return false;
        }

        // Candle effects outside the pair
        let stray_candle = ChannelId::ALL
            .iter()
            .filter(|channel| !channel.is_candle())
            .any(|channel| {
                matches!(
                    self.effect(*channel),
                    ChannelEffect::Candle { .. } | ChannelEffect::CandlePair
                )
            });
        if stray_candle {
            return false;
        }

        self.effects.iter().all(|effect| match effect {
            ChannelEffect::DevotionalFollower(params) => self
                .effects
                .iter()
                .any(|other| *other == ChannelEffect::DevotionalLead(*params)),
            ChannelEffect::DevotionalLead(params) => self
                .effects
                .iter()
                .any(|other| *other == ChannelEffect::DevotionalFollower(*params)),
            ChannelEffect::SeaWaveGroup(params) => self
                .effects
                .iter()
                .any(|other| *other == ChannelEffect::SeaWaveLead(*params)),
            ChannelEffect::SeaWaveLead(params) => self
                .effects
                .iter()
                .any(|other| *other == ChannelEffect::SeaWaveGroup(*params)),
            _ => true,
        })
    }

    /// Typical duty level of a channel under this profile
    pub const fn representative_level(&self, channel: ChannelId) -> u8 {
        match self.effects[channel.index()] {
            ChannelEffect::CandlePair => match self.candle_ceiling() {
                Some(ceiling) => candle_ceilings(ceiling).1,
                None => 0,
            },
            effect => effect.representative_level(),
        }
    }
}

const fn candle(ceiling: u8) -> [ChannelEffect; 2] {
    [ChannelEffect::Candle { ceiling }, ChannelEffect::CandlePair]
}

const fn profile(
    candles: [ChannelEffect; 2],
    face: ChannelEffect,
    front_left: ChannelEffect,
    shepherd: ChannelEffect,
    back: ChannelEffect,
) -> Profile {
    Profile::new([candles[0], candles[1], face, front_left, shepherd, back])
}

const CANDLE_DIM: u8 = 51;
const CANDLE_NORMAL: u8 = 178;
const CANDLE_BRIGHT: u8 = 204;
const CANDLE_HIGH: u8 = 230;
const CANDLE_FULL: u8 = 255;

const FACE_FADE: FadeConfig = FadeConfig::new(40, 60, 40);
const SHEPHERD_FADE: FadeConfig = FadeConfig::new(5, 100, 40);
const BACK_FADE: FadeConfig = FadeConfig::new(0, 100, 30);
const VIRGIN_FACE_FADE: FadeConfig = FadeConfig::new(40, 90, 35);
const VIRGIN_FILL_FADE: FadeConfig = FadeConfig::new(0, 5, 32);

const FRONT_LEFT_BREATHING: Breathing = Breathing::new(10, 50, 4_200);
const DEVOTIONAL: DevotionalBreathing = DevotionalBreathing::new(40, 80, 4_200, 450, 70);
const SEA_WAVE: SeaWave = SeaWave::new(10, 30, 8, 24, 5_200);

const FRONT_LEFT_FLASH: RandomFlash = RandomFlash::new(10, 60, 100, 120, 18, 50, 130);
const SHEPHERD_FLASH: RandomFlash = RandomFlash::new(10, 60, 100, 140, 16, 50, 130);
const BACK_FLASH: RandomFlash = RandomFlash::new(10, 55, 95, 160, 14, 60, 150);

const OFF: Profile = Profile::off();

const CANDLE_ONLY_BASE: Profile = profile(candle(CANDLE_DIM), Static(5), Off, Off, Off);
const CANDLE_ONLY_MOTION: Profile = profile(candle(CANDLE_NORMAL), Fade(FACE_FADE), Off, Off, Off);

const CANDLE_SHEPHERD_BASE: Profile = profile(
    candle(CANDLE_NORMAL),
    Static(10),
    ChannelEffect::Breathing(FRONT_LEFT_BREATHING),
    Static(40),
    Off,
);
const CANDLE_SHEPHERD_MOTION: Profile = profile(
    candle(CANDLE_HIGH),
    Static(50),
    Static(10),
    Fade(SHEPHERD_FADE),
    Off,
);

const CANDLE_SHEPHERD_VIRGIN_BASE: Profile = profile(
    candle(CANDLE_NORMAL),
    Static(10),
    ChannelEffect::RandomFlash(FRONT_LEFT_FLASH),
    ChannelEffect::RandomFlash(SHEPHERD_FLASH),
    ChannelEffect::RandomFlash(BACK_FLASH),
);
const CANDLE_SHEPHERD_VIRGIN_MOTION: Profile = profile(
    candle(CANDLE_HIGH),
    Static(40),
    Static(80),
    Static(80),
    Fade(BACK_FADE),
);

const VIRGIN_FACE_BASE: Profile = profile(
    candle(CANDLE_NORMAL),
    Static(40),
    Static(10),
    Static(10),
    Static(10),
);
const VIRGIN_FACE_MOTION: Profile = profile(
    candle(CANDLE_BRIGHT),
    Fade(VIRGIN_FACE_FADE),
    Fade(VIRGIN_FILL_FADE),
    Fade(VIRGIN_FILL_FADE),
    Fade(VIRGIN_FILL_FADE),
);

const VIRGIN_EMPHASIS_BASE: Profile = profile(
    candle(CANDLE_NORMAL),
    Static(60),
    ChannelEffect::SeaWaveGroup(SEA_WAVE),
    ChannelEffect::SeaWaveGroup(SEA_WAVE),
    ChannelEffect::SeaWaveLead(SEA_WAVE),
);
const VIRGIN_EMPHASIS_MOTION: Profile = profile(
    candle(CANDLE_FULL),
    ChannelEffect::DevotionalLead(DEVOTIONAL),
    Static(30),
    Static(30),
    ChannelEffect::DevotionalFollower(DEVOTIONAL),
);

/// Look up the profile for a mode, with or without the motion overlay
pub fn profile_for(mode: Mode, motion: bool) -> &'static Profile {
    match (mode, motion) {
        (Mode::Off, _) => &OFF,
        (Mode::CandleOnly, false) => &CANDLE_ONLY_BASE,
        (Mode::CandleOnly, true) => &CANDLE_ONLY_MOTION,
        (Mode::CandleShepherd, false) => &CANDLE_SHEPHERD_BASE,
        (Mode::CandleShepherd, true) => &CANDLE_SHEPHERD_MOTION,
        (Mode::CandleShepherdVirgin, false) => &CANDLE_SHEPHERD_VIRGIN_BASE,
        (Mode::CandleShepherdVirgin, true) => &CANDLE_SHEPHERD_VIRGIN_MOTION,
        (Mode::VirginFace, false) => &VIRGIN_FACE_BASE,
        (Mode::VirginFace, true) => &VIRGIN_FACE_MOTION,
        (Mode::VirginEmphasis, false) => &VIRGIN_EMPHASIS_BASE,
        (Mode::VirginEmphasis, true) => &VIRGIN_EMPHASIS_MOTION,
    }
}
