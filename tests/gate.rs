mod tests {
    use embassy_time::{Duration, Instant};
    use shrine_lights::gate::{OutputGate, SoftOffConfig};
    use shrine_lights::{ChannelId, OutputDriver};

    #[derive(Default)]
    struct RecordingDriver {
        levels: [u8; 6],
        writes: Vec<(ChannelId, u8)>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, channel: ChannelId, duty: u8) {
            self.levels[channel.index()] = duty;
            self.writes.push((channel, duty));
        }
    }

    fn gate() -> OutputGate<RecordingDriver> {
        OutputGate::new(RecordingDriver::default(), SoftOffConfig::default())
    }

    #[test]
    fn test_repeated_writes_are_deduplicated() {
        let mut gate = gate();
        gate.set(ChannelId::Face, 100);
        gate.set(ChannelId::Face, 100);
        gate.set(ChannelId::Face, 100);
        assert_eq!(gate.driver().writes, vec![(ChannelId::Face, 100)]);
        assert_eq!(gate.level(ChannelId::Face), 100);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut gate = gate();
        gate.set_index(6, 200);
        gate.set_index(usize::MAX, 200);
        assert!(gate.driver().writes.is_empty());
        assert_eq!(gate.levels(), [0; 6]);

        gate.set_index(5, 200);
        assert_eq!(gate.level(ChannelId::Back), 200);
    }

    #[test]
    fn test_set_percent() {
        let mut gate = gate();
        gate.set_percent(ChannelId::Shepherd, 40);
        assert_eq!(gate.level(ChannelId::Shepherd), 102);
    }

    #[test]
    fn test_zero_on_dark_channel_writes_through() {
        let mut gate = gate();
        gate.set(ChannelId::Back, 0);
        assert!(!gate.is_soft_off(ChannelId::Back));
        assert!(gate.driver().writes.is_empty());
    }

    #[test]
    fn test_soft_off_steps_down_to_zero() {
        let mut gate = gate();
        gate.set(ChannelId::Face, 255);
        gate.set(ChannelId::Face, 0);
        assert!(gate.is_soft_off(ChannelId::Face));
        assert_eq!(gate.level(ChannelId::Face), 255);

        let mut steps = 0;
        let mut previous = 255;
        while gate.is_soft_off(ChannelId::Face) {
            gate.advance_soft_off(Instant::from_millis(steps * 30));
            let level = gate.level(ChannelId::Face);
            assert!(level < previous);
            previous = level;
            steps += 1;
        }

        // ceil(255 / 8)
        assert_eq!(steps, 32);
        assert_eq!(gate.level(ChannelId::Face), 0);
    }

    #[test]
    fn test_soft_off_waits_for_interval() {
        let mut gate = gate();
        gate.set(ChannelId::Face, 100);
        gate.set(ChannelId::Face, 0);

        gate.advance_soft_off(Instant::from_millis(0));
        assert_eq!(gate.level(ChannelId::Face), 92);
        gate.advance_soft_off(Instant::from_millis(29));
        assert_eq!(gate.level(ChannelId::Face), 92);
        gate.advance_soft_off(Instant::from_millis(30));
        assert_eq!(gate.level(ChannelId::Face), 84);
    }

    #[test]
    fn test_write_after_soft_off_is_not_intercepted() {
        let mut gate = gate();
        gate.set(ChannelId::Face, 16);
        gate.set(ChannelId::Face, 0);
        gate.advance_soft_off(Instant::from_millis(0));
        gate.advance_soft_off(Instant::from_millis(30));
        assert!(!gate.is_soft_off(ChannelId::Face));
        assert_eq!(gate.level(ChannelId::Face), 0);

        gate.set(ChannelId::Face, 100);
        assert_eq!(gate.level(ChannelId::Face), 100);
        assert!(!gate.is_soft_off(ChannelId::Face));
    }

    #[test]
    fn test_nonzero_write_cancels_soft_off() {
        let mut gate = gate();
        gate.set(ChannelId::Shepherd, 200);
        gate.set(ChannelId::Shepherd, 0);
        gate.advance_soft_off(Instant::from_millis(0));
        assert_eq!(gate.level(ChannelId::Shepherd), 192);

        gate.set(ChannelId::Shepherd, 50);
        assert!(!gate.is_soft_off(ChannelId::Shepherd));
        assert_eq!(gate.level(ChannelId::Shepherd), 50);

        gate.advance_soft_off(Instant::from_millis(1000));
        assert_eq!(gate.level(ChannelId::Shepherd), 50);
    }

    #[test]
    fn test_candle_writes_land_on_both() {
        let mut gate = gate();
        gate.set(ChannelId::Candle2, 120);
        assert_eq!(gate.level(ChannelId::Candle1), 120);
        assert_eq!(gate.level(ChannelId::Candle2), 120);
    }

    #[test]
    fn test_candle_pair_soft_off_is_synchronized() {
        let mut gate = gate();
        gate.write_candle(200, 100);
        gate.set(ChannelId::Candle1, 0);
        assert!(gate.is_soft_off(ChannelId::Candle1));
        assert!(gate.is_soft_off(ChannelId::Candle2));

        gate.advance_soft_off(Instant::from_millis(0));
        // The pair follows the lead level, one step per interval
        assert_eq!(gate.level(ChannelId::Candle1), 192);
        assert_eq!(gate.level(ChannelId::Candle2), 192);
        gate.advance_soft_off(Instant::from_millis(10));
        assert_eq!(gate.level(ChannelId::Candle1), 192);
        assert_eq!(gate.level(ChannelId::Candle2), 192);

        let mut t = 30;
        let mut previous = 192;
        while gate.any_soft_off() {
            gate.advance_soft_off(Instant::from_millis(t));
            let level = gate.level(ChannelId::Candle1);
            assert_eq!(level, gate.level(ChannelId::Candle2));
            assert_eq!(previous - level, 8);
            assert_eq!(
                gate.is_soft_off(ChannelId::Candle1),
                gate.is_soft_off(ChannelId::Candle2)
            );
            previous = level;
            t += 30;
        }
        assert_eq!(gate.level(ChannelId::Candle1), 0);
        assert_eq!(gate.level(ChannelId::Candle2), 0);
        // 200 / 8 steps in total
        assert_eq!(t, 25 * 30);
    }

    #[test]
    fn test_dim_candle_does_not_cut_the_pair() {
        let mut gate = gate();
        gate.write_candle(100, 5);
        gate.set(ChannelId::Candle1, 0);
        gate.advance_soft_off(Instant::from_millis(0));
        assert_eq!(gate.level(ChannelId::Candle1), 92);
        assert_eq!(gate.level(ChannelId::Candle2), 92);
        assert!(gate.is_soft_off(ChannelId::Candle2));
    }

    #[test]
    fn test_brighter_secondary_leads_the_pair() {
        let mut gate = gate();
        gate.write_candle(0, 60);
        gate.set(ChannelId::Candle2, 0);
        assert!(gate.is_soft_off(ChannelId::Candle1));
        gate.advance_soft_off(Instant::from_millis(0));
        assert_eq!(gate.level(ChannelId::Candle1), 52);
        assert_eq!(gate.level(ChannelId::Candle2), 52);
    }

    #[test]
    fn test_flicker_does_not_override_soft_off() {
        let mut gate = gate();
        gate.write_candle(200, 150);
        gate.set(ChannelId::Candle1, 0);
        gate.advance_soft_off(Instant::from_millis(0));

        gate.write_candle(255, 204);
        assert_eq!(gate.level(ChannelId::Candle1), 192);
        assert_eq!(gate.level(ChannelId::Candle2), 192);
    }

    #[test]
    fn test_driver_is_reachable_through_the_gate() {
        let mut gate = gate();
        gate.set(ChannelId::Face, 40);
        gate.driver_mut().writes.clear();
        gate.set(ChannelId::Face, 40);
        assert!(gate.driver().writes.is_empty());
        assert_eq!(gate.driver().levels[ChannelId::Face.index()], 40);
    }

    #[test]
    fn test_custom_soft_off_config() {
        let config = SoftOffConfig {
            step: 0,
            interval: Duration::from_millis(10),
        };
        let mut gate = OutputGate::new(RecordingDriver::default(), config);
        gate.set(ChannelId::Back, 2);
        gate.set(ChannelId::Back, 0);
        gate.advance_soft_off(Instant::from_millis(0));
        assert_eq!(gate.level(ChannelId::Back), 1);
        gate.advance_soft_off(Instant::from_millis(10));
        assert_eq!(gate.level(ChannelId::Back), 0);
        assert!(!gate.any_soft_off());
    }
}
