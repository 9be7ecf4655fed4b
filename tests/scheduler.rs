mod tests {
    use embassy_time::{Duration, Instant};
    use shrine_lights::{
        ChannelId, Controller, ControllerConfig, ControllerEvent, Inputs, Level, Mode,
        OutputDriver, TickScheduler,
    };

    struct NullDriver;

    impl OutputDriver for NullDriver {
        fn write(&mut self, _channel: ChannelId, _duty: u8) {}
    }

    struct ScriptedInputs {
        button: Level,
        motion: Level,
    }

    impl Inputs for ScriptedInputs {
        fn button_level(&mut self) -> Level {
            self.button
        }

        fn motion_level(&mut self) -> Level {
            self.motion
        }
    }

    fn scheduler() -> TickScheduler<ScriptedInputs, NullDriver> {
        let inputs = ScriptedInputs {
            button: Level::High,
            motion: Level::Low,
        };
        let controller = Controller::new(NullDriver, &ControllerConfig::default());
        TickScheduler::new(inputs, controller)
    }

    #[test]
    fn test_tick_pacing() {
        let mut scheduler = scheduler();

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(1));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));

        let result = scheduler.tick(Instant::from_millis(1));
        assert_eq!(result.next_deadline, Instant::from_millis(2));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));
    }

    #[test]
    fn test_late_tick_keeps_schedule_within_drift() {
        let mut scheduler = scheduler();
        scheduler.tick(Instant::from_millis(0));

        let result = scheduler.tick(Instant::from_millis(2));
        assert_eq!(result.next_deadline, Instant::from_millis(2));
        assert_eq!(result.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_drift_resets_schedule() {
        let mut scheduler = scheduler();
        scheduler.tick(Instant::from_millis(0));

        let result = scheduler.tick(Instant::from_millis(10));
        assert_eq!(result.next_deadline, Instant::from_millis(11));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));
    }

    #[test]
    fn test_custom_tick_period() {
        let controller = Controller::new(NullDriver, &ControllerConfig::default());
        let inputs = ScriptedInputs {
            button: Level::High,
            motion: Level::Low,
        };
        let mut scheduler =
            TickScheduler::with_tick_period(inputs, controller, Duration::from_millis(5));
        let result = scheduler.tick(Instant::from_millis(100));
        assert_eq!(result.next_deadline, Instant::from_millis(105));
        assert_eq!(result.sleep_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_schedule_survives_clock_wrap() {
        let mut scheduler = scheduler();
        let period = Duration::from_millis(1).as_ticks();
        let start = Instant::from_ticks(u64::MAX - period / 2);

        let result = scheduler.tick(start);
        let wrapped = Instant::from_ticks(period / 2 - 1);
        assert_eq!(result.next_deadline, wrapped);
        assert_eq!(result.sleep_duration, Duration::from_millis(1));

        let result = scheduler.tick(wrapped);
        assert_eq!(result.next_deadline, Instant::from_ticks(wrapped.as_ticks() + period));
        assert_eq!(result.sleep_duration, Duration::from_millis(1));

        // Late but within drift after the wrap
        let late = Instant::from_ticks(wrapped.as_ticks() + 2 * period);
        let result = scheduler.tick(late);
        assert_eq!(result.next_deadline, late);
        assert_eq!(result.sleep_duration, Duration::from_ticks(0));
    }

    #[test]
    fn test_events_pass_through() {
        let mut scheduler = scheduler();
        scheduler.tick(Instant::from_millis(0));

        scheduler.inputs_mut().motion = Level::High;
        let result = scheduler.tick(Instant::from_millis(1));
        assert!(result.events.contains(&ControllerEvent::MotionStarted));
        assert!(scheduler.controller().is_motion_active());

        scheduler.controller_mut().set_mode(Mode::VirginFace);
        assert_eq!(scheduler.controller().mode(), Mode::VirginFace);
    }
}
