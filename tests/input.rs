mod tests {
    use embassy_time::{Duration, Instant};
    use shrine_lights::input::{
        ButtonDebouncer, DEFAULT_DEBOUNCE, DEFAULT_MOTION_WINDOW, Level, MotionLatch,
        MotionReleasePolicy,
    };

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::High.is_high());
        assert!(Level::Low.is_low());
    }

    #[test]
    fn test_debounce_requires_strictly_longer_than_window() {
        let mut button = ButtonDebouncer::new(DEFAULT_DEBOUNCE);
        assert_eq!(button.update(Level::High, Instant::from_millis(0)), None);
        assert_eq!(button.update(Level::Low, Instant::from_millis(100)), None);
        assert_eq!(button.update(Level::Low, Instant::from_millis(150)), None);
        assert!(!button.is_pressed());
        assert_eq!(
            button.update(Level::Low, Instant::from_millis(151)),
            Some(Level::Low)
        );
        assert!(button.is_pressed());
        // Reported once per transition
        assert_eq!(button.update(Level::Low, Instant::from_millis(400)), None);
    }

    #[test]
    fn test_debounce_rejects_bounces() {
        let mut button = ButtonDebouncer::new(Duration::from_millis(50));
        let mut t = 1_000;
        for _ in 0..10 {
            assert_eq!(button.update(Level::Low, Instant::from_millis(t)), None);
            assert_eq!(button.update(Level::High, Instant::from_millis(t + 20)), None);
            t += 40;
        }
        assert_eq!(button.stable(), Level::High);
    }

    #[test]
    fn test_debounce_release() {
        let mut button = ButtonDebouncer::new(DEFAULT_DEBOUNCE);
        button.update(Level::Low, Instant::from_millis(10));
        assert_eq!(
            button.update(Level::Low, Instant::from_millis(61)),
            Some(Level::Low)
        );
        button.update(Level::High, Instant::from_millis(200));
        assert_eq!(
            button.update(Level::High, Instant::from_millis(251)),
            Some(Level::High)
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_motion_holds_until_timeout() {
        let mut motion = MotionLatch::new(DEFAULT_MOTION_WINDOW, MotionReleasePolicy::default());
        assert_eq!(motion.policy(), MotionReleasePolicy::HoldUntilTimeout);

        let update = motion.update(Level::High, Instant::from_millis(1_000));
        assert!(update.started);
        assert!(update.changed());
        assert!(motion.is_latched());

        let update = motion.update(Level::Low, Instant::from_millis(2_000));
        assert!(update.released);
        assert!(!update.changed());
        assert!(motion.is_latched());

        assert_eq!(
            motion.remaining(Instant::from_millis(11_000)),
            Some(Duration::from_millis(20_000))
        );

        let update = motion.update(Level::Low, Instant::from_millis(30_999));
        assert!(!update.timed_out);
        assert!(motion.is_latched());

        let update = motion.update(Level::Low, Instant::from_millis(31_000));
        assert!(update.timed_out);
        assert!(!motion.is_latched());
        assert_eq!(motion.remaining(Instant::from_millis(31_000)), None);
    }

    #[test]
    fn test_motion_while_latched_is_ignored() {
        let mut motion = MotionLatch::new(DEFAULT_MOTION_WINDOW, MotionReleasePolicy::default());
        motion.update(Level::High, Instant::from_millis(0));
        motion.update(Level::Low, Instant::from_millis(5_000));

        let update = motion.update(Level::High, Instant::from_millis(20_000));
        assert!(update.ignored);
        assert!(!update.started);

        // The window is not extended by the second edge
        let update = motion.update(Level::High, Instant::from_millis(30_000));
        assert!(update.timed_out);
    }

    #[test]
    fn test_held_sensor_does_not_retrigger() {
        let mut motion = MotionLatch::new(Duration::from_millis(1_000), MotionReleasePolicy::default());
        motion.update(Level::High, Instant::from_millis(0));
        assert!(motion.update(Level::High, Instant::from_millis(1_000)).timed_out);
        assert!(!motion.update(Level::High, Instant::from_millis(1_500)).started);
        assert!(!motion.is_latched());

        motion.update(Level::Low, Instant::from_millis(1_600));
        assert!(motion.update(Level::High, Instant::from_millis(1_700)).started);
    }

    #[test]
    fn test_clear_on_release() {
        let mut motion = MotionLatch::new(DEFAULT_MOTION_WINDOW, MotionReleasePolicy::ClearOnRelease);
        motion.update(Level::High, Instant::from_millis(0));
        let update = motion.update(Level::Low, Instant::from_millis(500));
        assert!(update.cleared);
        assert!(update.changed());
        assert!(!motion.is_latched());
    }

    #[test]
    fn test_clear_on_release_still_times_out() {
        let mut motion = MotionLatch::new(DEFAULT_MOTION_WINDOW, MotionReleasePolicy::ClearOnRelease);
        motion.update(Level::High, Instant::from_millis(0));
        let update = motion.update(Level::High, Instant::from_millis(30_000));
        assert!(update.timed_out);
        assert!(!motion.is_latched());
    }
}
