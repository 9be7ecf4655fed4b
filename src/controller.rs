use embassy_time::{Duration, Instant};
use heapless::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{CHANNEL_COUNT, ChannelId};
use crate::effect::{CandleFlicker, ChannelEffect, FadeState, FlashState};
use crate::gate::{OutputGate, SoftOffConfig};
use crate::input::{
    ButtonDebouncer, DEFAULT_DEBOUNCE, DEFAULT_MOTION_WINDOW, Level, MotionLatch,
    MotionReleasePolicy,
};
use crate::mode::Mode;
use crate::profile::{Profile, profile_for};
use crate::snapshot::ModeSnapshot;
use crate::{Inputs, OutputDriver};

/// Default seed of the effect random source
pub const DEFAULT_SEED: u64 = 0x5eed_ca11_d1e5_0001;

/// Maximum number of events reported by a single tick
pub const MAX_TICK_EVENTS: usize = 4;

/// Configuration for the controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Mode selected at startup
    pub initial_mode: Mode,
    /// Button debounce window
    pub debounce: Duration,
    /// Length of the motion window
    pub motion_window: Duration,
    /// Falling motion edge handling
    pub motion_release: MotionReleasePolicy,
    /// Soft-off decay
    pub soft_off: SoftOffConfig,
    /// Seed of the effect random source
    pub seed: u64,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        initial_mode: Mode::Off,
        debounce: DEFAULT_DEBOUNCE,
        motion_window: DEFAULT_MOTION_WINDOW,
        motion_release: MotionReleasePolicy::HoldUntilTimeout,
        soft_off: SoftOffConfig::DEFAULT,
        seed: DEFAULT_SEED,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Observable state changes of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The button selected a new mode
    ModeChanged(Mode),
    /// Motion opened the movement window
    MotionStarted,
    /// Motion while the window was already open
    MotionIgnored,
    /// Sensor released, window still open
    MotionReleased,
    /// Sensor released and the window closed
    MotionCleared,
    /// Window ran its full length
    MotionTimedOut,
}

/// Events reported by a single tick
pub type TickEvents = Vec<ControllerEvent, MAX_TICK_EVENTS>;

/// Mode and motion orchestrator - the main state machine
///
/// Owns the output gate and every per-channel effect state. Call
/// [`Controller::tick`] on every loop iteration; it never blocks.
pub struct Controller<O: OutputDriver> {
    // External dependencies
    gate: OutputGate<O>,

    // Input state machines
    button: ButtonDebouncer,
    motion: MotionLatch,

    // Internal state
    mode: Mode,
    fades: [FadeState; CHANNEL_COUNT],
    flashes: [FlashState; CHANNEL_COUNT],
    candle: CandleFlicker,
    rng: SmallRng,
}

impl<O: OutputDriver> Controller<O> {
    /// Create a new controller driving `driver`
    ///
    /// The snapshot of the initial mode is printed once when logging is on.
    pub fn new(driver: O, config: &ControllerConfig) -> Self {
        let controller = Self {
            gate: OutputGate::new(driver, config.soft_off),
            button: ButtonDebouncer::new(config.debounce),
            motion: MotionLatch::new(config.motion_window, config.motion_release),
            mode: config.initial_mode,
            fades: core::array::from_fn(|_| FadeState::new()),
            flashes: core::array::from_fn(|_| FlashState::new()),
            candle: CandleFlicker::new(),
            rng: SmallRng::seed_from_u64(config.seed),
        };

        #[cfg(feature = "esp32-log")]
        println!("{}", controller.snapshot());

        controller
    }

    /// Run one control loop iteration
    ///
    /// Advances soft-offs, samples the button and the motion sensor, then
    /// applies the profile of the current (mode, motion) pair.
    pub fn tick<I: Inputs + ?Sized>(&mut self, now: Instant, inputs: &mut I) -> TickEvents {
        let mut events = TickEvents::new();

        self.gate.advance_soft_off(now);
        self.process_button(inputs.button_level(), now, &mut events);
        self.process_motion(inputs.motion_level(), now, &mut events);
        self.apply_profile(now);

        events
    }

    /// Select a mode directly
    ///
    /// Same semantics as a button press: every channel is switched off and
    /// all effect state is dropped before the new profile takes over on the
    /// next tick.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.all_off();

        #[cfg(feature = "esp32-log")]
        println!("{}", ModeSnapshot::new(mode));
    }

    /// Currently selected mode
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Check if the motion window is open
    pub const fn is_motion_active(&self) -> bool {
        self.motion.is_latched()
    }

    /// Time left in the motion window
    pub fn motion_remaining(&self, now: Instant) -> Option<Duration> {
        self.motion.remaining(now)
    }

    /// Profile applied on the next tick
    pub fn profile(&self) -> &'static Profile {
        profile_for(self.mode, self.motion.is_latched())
    }

    /// Diagnostic snapshot of the current mode
    pub const fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot::new(self.mode)
    }

    /// Get a reference to the output gate
    pub const fn gate(&self) -> &OutputGate<O> {
        &self.gate
    }

    /// Get a mutable reference to the output gate
    pub fn gate_mut(&mut self) -> &mut OutputGate<O> {
        &mut self.gate
    }

    /// Fade state of a channel
    pub fn fade(&self, channel: ChannelId) -> &FadeState {
        &self.fades[channel.index()]
    }

    /// Flash state of a channel
    pub fn flash(&self, channel: ChannelId) -> &FlashState {
        &self.flashes[channel.index()]
    }

    /// Candle flicker state
    pub const fn candle(&self) -> &CandleFlicker {
        &self.candle
    }

    fn process_button(&mut self, reading: Level, now: Instant, events: &mut TickEvents) {
        if self.button.update(reading, now) != Some(Level::Low) {
            return;
        }
        let next = self.mode.next();
        self.set_mode(next);
        let _ = events.push(ControllerEvent::ModeChanged(next));
    }

    fn process_motion(&mut self, reading: Level, now: Instant, events: &mut TickEvents) {
        let update = self.motion.update(reading, now);
        if update.started {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Controller] motion detected, movement profile active for {}ms",
                self.motion.window().as_millis()
            );
            let _ = events.push(ControllerEvent::MotionStarted);
        }
        if update.ignored {
            #[cfg(feature = "esp32-log")]
            println!("[Controller] motion ignored, window already open");
            let _ = events.push(ControllerEvent::MotionIgnored);
        }
        if update.released {
            #[cfg(feature = "esp32-log")]
            println!("[Controller] motion released, waiting for timeout");
            let _ = events.push(ControllerEvent::MotionReleased);
        }
        if update.cleared {
            #[cfg(feature = "esp32-log")]
            println!("[Controller] motion released, back to base profile");
            let _ = events.push(ControllerEvent::MotionCleared);
        }
        if update.timed_out {
            #[cfg(feature = "esp32-log")]
            println!("[Controller] motion timeout, back to base profile");
            let _ = events.push(ControllerEvent::MotionTimedOut);
        }
    }

    /// Dispatch every channel to the effect that owns it
    fn apply_profile(&mut self, now: Instant) {
        let profile = profile_for(self.mode, self.motion.is_latched());
        debug_assert!(profile.is_consistent(), "profile has contending writers");

        for channel in ChannelId::ALL {
            let effect = profile.effect(channel);
            let index = channel.index();

            if !effect.uses_fade() {
                self.fades[index].deactivate();
            }
            if !effect.uses_flash() {
                self.flashes[index].reset();
            }

            match effect {
                ChannelEffect::Off => self.gate.set(channel, 0),
                ChannelEffect::Static(pct) => self.gate.set_percent(channel, pct),
                ChannelEffect::Candle { ceiling } => {
                    self.candle
                        .update(now, ceiling, &mut self.rng, &mut self.gate);
                }
                ChannelEffect::CandlePair => {
                    // Written by the candle effect on the primary channel
                }
                ChannelEffect::Fade(config) => {
                    let fade = &mut self.fades[index];
                    fade.configure(&config);
                    fade.activate();
                    if let Some(level) = fade.tick(now, &mut self.rng) {
                        self.gate.set(channel, level);
                    }
                }
                ChannelEffect::Breathing(breathing) => {
                    self.gate.set_percent(channel, breathing.level(now));
                }
                ChannelEffect::DevotionalLead(breathing) => {
                    self.gate.set_percent(channel, breathing.levels(now).0);
                }
                ChannelEffect::DevotionalFollower(breathing) => {
                    self.gate.set_percent(channel, breathing.levels(now).1);
                }
                ChannelEffect::SeaWaveLead(wave) => {
                    self.gate.set_percent(channel, wave.levels(now).0);
                }
                ChannelEffect::SeaWaveGroup(wave) => {
                    self.gate.set_percent(channel, wave.levels(now).1);
                }
                ChannelEffect::RandomFlash(config) => {
                    let pct = self.flashes[index].update(now, &config, &mut self.rng);
                    self.gate.set_percent(channel, pct);
                }
            }
        }

        if profile.candle_ceiling().is_none() {
            self.candle.reset();
        }
    }

    /// Switch every channel off and drop all effect state
    fn all_off(&mut self) {
        for channel in ChannelId::ALL {
            let index = channel.index();
            self.fades[index].deactivate();
            self.flashes[index].reset();
            self.gate.set(channel, 0);
        }
        self.candle.reset();
    }
}
