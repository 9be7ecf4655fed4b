//! Display modes, cycled by the push button

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_CANDLE_ONLY: &str = "candle_only";
const MODE_NAME_CANDLE_SHEPHERD: &str = "candle_shepherd";
const MODE_NAME_CANDLE_SHEPHERD_VIRGIN: &str = "candle_shepherd_virgin";
const MODE_NAME_VIRGIN_FACE: &str = "virgin_face";
const MODE_NAME_VIRGIN_EMPHASIS: &str = "virgin_emphasis";

const MODE_ID_OFF: u8 = 0;
const MODE_ID_CANDLE_ONLY: u8 = 1;
const MODE_ID_CANDLE_SHEPHERD: u8 = 2;
const MODE_ID_CANDLE_SHEPHERD_VIRGIN: u8 = 3;
const MODE_ID_VIRGIN_FACE: u8 = 4;
const MODE_ID_VIRGIN_EMPHASIS: u8 = 5;

/// Known display modes, in button cycle order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Everything off
    #[default]
    Off = MODE_ID_OFF,
    /// Candles with a faint face
    CandleOnly = MODE_ID_CANDLE_ONLY,
    /// Candles and the shepherd
    CandleShepherd = MODE_ID_CANDLE_SHEPHERD,
    /// Candles, shepherd and the figure
    CandleShepherdVirgin = MODE_ID_CANDLE_SHEPHERD_VIRGIN,
    /// Figure lit mostly by the face light
    VirginFace = MODE_ID_VIRGIN_FACE,
    /// Emphasis on the figure
    VirginEmphasis = MODE_ID_VIRGIN_EMPHASIS,
}

impl Mode {
    /// All modes in cycle order
    pub const ALL: [Self; 6] = [
        Self::Off,
        Self::CandleOnly,
        Self::CandleShepherd,
        Self::CandleShepherdVirgin,
        Self::VirginFace,
        Self::VirginEmphasis,
    ];

    /// Number of modes
    pub const COUNT: usize = Self::ALL.len();

    /// The mode after this one, wrapping to the first after the last
    pub const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::COUNT]
    }

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_OFF => Self::Off,
            MODE_ID_CANDLE_ONLY => Self::CandleOnly,
            MODE_ID_CANDLE_SHEPHERD => Self::CandleShepherd,
            MODE_ID_CANDLE_SHEPHERD_VIRGIN => Self::CandleShepherdVirgin,
            MODE_ID_VIRGIN_FACE => Self::VirginFace,
            MODE_ID_VIRGIN_EMPHASIS => Self::VirginEmphasis,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::CandleOnly => MODE_NAME_CANDLE_ONLY,
            Self::CandleShepherd => MODE_NAME_CANDLE_SHEPHERD,
            Self::CandleShepherdVirgin => MODE_NAME_CANDLE_SHEPHERD_VIRGIN,
            Self::VirginFace => MODE_NAME_VIRGIN_FACE,
            Self::VirginEmphasis => MODE_NAME_VIRGIN_EMPHASIS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_OFF => Some(Self::Off),
            MODE_NAME_CANDLE_ONLY => Some(Self::CandleOnly),
            MODE_NAME_CANDLE_SHEPHERD => Some(Self::CandleShepherd),
            MODE_NAME_CANDLE_SHEPHERD_VIRGIN => Some(Self::CandleShepherdVirgin),
            MODE_NAME_VIRGIN_FACE => Some(Self::VirginFace),
            MODE_NAME_VIRGIN_EMPHASIS => Some(Self::VirginEmphasis),
            _ => None,
        }
    }

    /// Human readable title, numbered from one like the button cycle
    pub const fn title(self) -> &'static str {
        match self {
            Self::Off => "1 - OFF",
            Self::CandleOnly => "2 - CANDLE ONLY",
            Self::CandleShepherd => "3 - CANDLE + SHEPHERD",
            Self::CandleShepherdVirgin => "4 - CANDLE + SHEPHERD + VIRGIN",
            Self::VirginFace => "5 - VIRGIN FACE",
            Self::VirginEmphasis => "6 - VIRGIN EMPHASIS",
        }
    }
}
