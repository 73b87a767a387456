//! Unit tests for bunch-core primitives.

#[cfg(test)]
mod ids {
    use crate::BusId;

    #[test]
    fn index_roundtrip() {
        let id = BusId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ordering() {
        assert!(BusId(0) < BusId(1));
    }

    #[test]
    fn display() {
        assert_eq!(BusId(7).to_string(), "BusId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::time::{parse_hhmm, PeakSchedule, PeakWindow, TimeBucket};
    use crate::Seconds;

    #[test]
    fn hhmm_parses() {
        assert_eq!(parse_hhmm("0700"), Some(Seconds(7 * 3600)));
        assert_eq!(parse_hhmm("2359"), Some(Seconds(23 * 3600 + 59 * 60)));
    }

    #[test]
    fn hhmm_rejects_bad_input() {
        assert_eq!(parse_hhmm("25:00"), None);
        assert_eq!(parse_hhmm("123"), None);
        assert_eq!(parse_hhmm("2500"), None);
    }

    #[test]
    fn display_is_hh_mm_ss() {
        assert_eq!(Seconds(25200).to_string(), "07:00:00");
    }

    #[test]
    fn bucket_selection() {
        let sched = PeakSchedule {
            morning: PeakWindow { start: Seconds(25200), end: Seconds(28740) },
            evening: PeakWindow { start: Seconds(61200), end: Seconds(64740) },
        };
        assert_eq!(sched.bucket_at(Seconds(26000)), TimeBucket::MorningPeak);
        assert_eq!(sched.bucket_at(Seconds(62000)), TimeBucket::EveningPeak);
        assert_eq!(sched.bucket_at(Seconds(43200)), TimeBucket::OffPeak);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn degenerate_stddev_returns_mean() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.normal(25.0, 0.0), 25.0);
    }

    #[test]
    fn nonneg_clamps_negative_draws() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            assert!(rng.normal_nonneg(0.0, 100.0) >= 0.0);
        }
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let xs: Vec<f64> = (0..10).map(|_| a.normal(10.0, 2.0)).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.normal(10.0, 2.0)).collect();
        assert_eq!(xs, ys);
    }
}
