//! Human readable description of a mode
//!
//! Printed on every mode change. All numbers are read from the live profile
//! table, so the text always matches what the effects actually produce.

use core::fmt;

use crate::channel::ChannelId;
use crate::mode::Mode;
use crate::profile::{Profile, profile_for};

const RULE: &str = "==========================================";
const THIN_RULE: &str = "------------------------------------------";

/// Snapshot of a mode's base and movement profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSnapshot {
    mode: Mode,
}

impl ModeSnapshot {
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Representative levels of the base profile, in channel order
    pub fn base_levels(&self) -> [u8; 6] {
        levels(profile_for(self.mode, false))
    }

    /// Representative levels of the movement profile, in channel order
    pub fn motion_levels(&self) -> [u8; 6] {
        levels(profile_for(self.mode, true))
    }
}

fn levels(profile: &Profile) -> [u8; 6] {
    ChannelId::ALL.map(|channel| profile.representative_level(channel))
}

/// Description of one profile, one line per channel
pub struct ProfileDescription<'a> {
    profile: &'a Profile,
    motion: bool,
}

impl<'a> ProfileDescription<'a> {
    pub const fn new(profile: &'a Profile, motion: bool) -> Self {
        Self { profile, motion }
    }
}

impl fmt::Display for ProfileDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.motion {
            writeln!(f, "MOVEMENT PROFILE")?;
        } else {
            writeln!(f, "BASE PROFILE")?;
        }
        for channel in ChannelId::ALL {
            writeln!(f, " {}: {}", channel.name(), self.profile.effect(channel))?;
        }
        Ok(())
    }
}

impl fmt::Display for ModeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  MODE: {}", self.mode.title())?;
        writeln!(f, "{}", THIN_RULE)?;
        writeln!(f, "LED      | BASE | MOVEMENT")?;
        writeln!(f, "---------+------+---------")?;

        let base = self.base_levels();
        let motion = self.motion_levels();
        for channel in ChannelId::ALL {
            let index = channel.index();
            writeln!(
                f,
                " {:<7} | {:>4} | {:>7}",
                channel.name(),
                base[index],
                motion[index]
            )?;
        }

        writeln!(f, "{}", THIN_RULE)?;
        write!(f, "{}", ProfileDescription::new(profile_for(self.mode, false), false))?;
        writeln!(f, "{}", THIN_RULE)?;
        write!(f, "{}", ProfileDescription::new(profile_for(self.mode, true), true))?;
        writeln!(f, "{}", RULE)
    }
}
