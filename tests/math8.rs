mod tests {
    use embassy_time::{Duration, Instant};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use shrine_lights::math8::{
        chance, elapsed, is_due, lerp_pct, percent_to_pwm, random_between, scale_percent,
        triangle_pct,
    };

    #[test]
    fn test_percent_to_pwm() {
        assert_eq!(percent_to_pwm(0), 0);
        assert_eq!(percent_to_pwm(5), 13);
        assert_eq!(percent_to_pwm(40), 102);
        assert_eq!(percent_to_pwm(50), 128);
        assert_eq!(percent_to_pwm(100), 255);
        assert_eq!(percent_to_pwm(150), 255);
    }

    #[test]
    fn test_percent_to_pwm_is_monotonic() {
        for percent in 0..100u8 {
            assert!(percent_to_pwm(percent) <= percent_to_pwm(percent + 1));
        }
    }

    #[test]
    fn test_scale_percent() {
        assert_eq!(scale_percent(200, 50), 100);
        assert_eq!(scale_percent(48, 70), 33);
        assert_eq!(scale_percent(255, 100), 255);
        assert_eq!(scale_percent(255, 0), 0);
    }

    #[test]
    fn test_triangle_pct() {
        assert_eq!(triangle_pct(0, 100), 0);
        assert_eq!(triangle_pct(25, 100), 50);
        assert_eq!(triangle_pct(50, 100), 100);
        assert_eq!(triangle_pct(75, 100), 50);
        assert_eq!(triangle_pct(100, 100), 0);
        assert_eq!(triangle_pct(10, 1), 0);
    }

    #[test]
    fn test_lerp_pct() {
        assert_eq!(lerp_pct(10, 50, 0), 10);
        assert_eq!(lerp_pct(10, 50, 50), 30);
        assert_eq!(lerp_pct(10, 50, 100), 50);
        assert_eq!(lerp_pct(50, 10, 100), 50);
    }

    #[test]
    fn test_elapsed_survives_wraparound() {
        let since = Instant::from_ticks(u64::MAX - 4);
        let now = Instant::from_ticks(5);
        assert_eq!(elapsed(now, since), Duration::from_ticks(10));
    }

    #[test]
    fn test_is_due() {
        let interval = Duration::from_millis(30);
        assert!(is_due(Instant::from_millis(0), None, interval));
        let last = Some(Instant::from_millis(100));
        assert!(!is_due(Instant::from_millis(129), last, interval));
        assert!(is_due(Instant::from_millis(130), last, interval));
    }

    #[test]
    fn test_random_between() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(random_between(&mut rng, 5, 5), 5);
        assert_eq!(random_between(&mut rng, 10, 3), 10);
        for _ in 0..1000 {
            let value = random_between(&mut rng, 15, 55);
            assert!((15..=55).contains(&value));
        }
    }

    #[test]
    fn test_chance_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(!chance(&mut rng, 0));
            assert!(chance(&mut rng, 100));
        }
    }
}
