//! Physical output channels of the figure.
//!
//! Six dimmable outputs with fixed indices. The two candles form a pair:
//! they are switched off together and their flicker is generated as a unit.

/// Number of physical output channels
pub const CHANNEL_COUNT: usize = 6;

const CHANNEL_NAME_CANDLE_1: &str = "CAN1";
const CHANNEL_NAME_CANDLE_2: &str = "CAN2";
const CHANNEL_NAME_FACE: &str = "CARA";
const CHANNEL_NAME_FRONT_LEFT: &str = "FIZO";
const CHANNEL_NAME_SHEPHERD: &str = "FDEP";
const CHANNEL_NAME_BACK: &str = "ATRA";

/// Identifier of a physical output channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelId {
    /// Primary candle, the livelier one
    Candle1 = 0,
    /// Secondary candle, calmer and capped below the primary
    Candle2 = 1,
    /// Face of the figure
    Face = 2,
    /// Front left fill light
    FrontLeft = 3,
    /// Front right light on the shepherd
    Shepherd = 4,
    /// Back light
    Back = 5,
}

impl ChannelId {
    /// All channels in index order
    pub const ALL: [Self; CHANNEL_COUNT] = [
        Self::Candle1,
        Self::Candle2,
        Self::Face,
        Self::FrontLeft,
        Self::Shepherd,
        Self::Back,
    ];

    /// Index of the channel (0..6)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a raw index, `None` if it is out of range
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < CHANNEL_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Short name printed in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Candle1 => CHANNEL_NAME_CANDLE_1,
            Self::Candle2 => CHANNEL_NAME_CANDLE_2,
            Self::Face => CHANNEL_NAME_FACE,
            Self::FrontLeft => CHANNEL_NAME_FRONT_LEFT,
            Self::Shepherd => CHANNEL_NAME_SHEPHERD,
            Self::Back => CHANNEL_NAME_BACK,
        }
    }

    /// Check if the channel belongs to the candle pair
    pub const fn is_candle(self) -> bool {
        matches!(self, Self::Candle1 | Self::Candle2)
    }

    /// The other member of the candle pair
    pub const fn sibling(self) -> Option<Self> {
        match self {
            Self::Candle1 => Some(Self::Candle2),
            Self::Candle2 => Some(Self::Candle1),
            _ => None,
        }
    }
}
