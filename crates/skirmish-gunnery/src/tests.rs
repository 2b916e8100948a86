#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use skirmish_core::constants::*;
    use skirmish_core::enums::CombatMode;
    use skirmish_core::types::Point;

    use crate::aim::{lateral_direction, select_power, solve};
    use crate::stats::{
        bin_to_factor, distance_segment, factor_to_bin, lateral_segment, GuessFactorStore,
        SegmentKey,
    };
    use crate::wave::{bullet_speed, BulletWave};

    fn segment(mode: CombatMode, lateral: usize, distance: usize) -> SegmentKey {
        SegmentKey {
            mode,
            lateral,
            distance,
        }
    }

    // ---- Segmentation ----

    #[test]
    fn test_stationary_opponent_at_300() {
        // Velocity 0 at distance 300 in a duel: lateral segment 8,
        // distance segment 3.
        assert_eq!(lateral_segment(1.0, 0.25, 0.0), STATIONARY_SEGMENT);
        assert_eq!(distance_segment(300.0), 3);
    }

    #[test]
    fn test_lateral_segment_bands() {
        // Fully lateral at top speed: |sin(pi/2) * 8| / 3 -> band 2.
        assert_eq!(lateral_segment(FRAC_PI_2, 0.0, 8.0), 2);
        // Head-on approach has no lateral component.
        assert_eq!(lateral_segment(0.0, 0.0, 8.0), 0);
        // Out-of-range speeds clamp below the stationary segment.
        assert_eq!(lateral_segment(FRAC_PI_2, 0.0, 100.0), STATIONARY_SEGMENT - 1);
        // Reverse gear counts by magnitude.
        assert_eq!(lateral_segment(FRAC_PI_2, 0.0, -8.0), 2);
    }

    #[test]
    fn test_distance_segment_clamping() {
        assert_eq!(distance_segment(0.0), 0);
        assert_eq!(distance_segment(99.9), 0);
        assert_eq!(distance_segment(100.0), 1);
        assert_eq!(distance_segment(1250.0), DISTANCE_SEGMENTS - 1);
        assert_eq!(distance_segment(1e9), DISTANCE_SEGMENTS - 1);
    }

    // ---- Bin mapping ----

    #[test]
    fn test_bin_factor_mapping() {
        assert_eq!(factor_to_bin(-1.0), 0);
        assert_eq!(factor_to_bin(0.0), MIDDLE_BIN);
        assert_eq!(factor_to_bin(1.0), GUESS_BINS - 1);
        assert!((bin_to_factor(0) - (-1.0)).abs() < 1e-12);
        assert!((bin_to_factor(MIDDLE_BIN)).abs() < 1e-12);
        assert!((bin_to_factor(GUESS_BINS - 1) - 1.0).abs() < 1e-12);
        assert!((bin_to_factor(20) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_to_bin_always_in_range() {
        let mut factor = -2.0;
        while factor <= 2.0 {
            let bin = factor_to_bin(factor);
            assert!(bin < GUESS_BINS, "factor {factor} mapped to bin {bin}");
            factor += 0.01;
        }
    }

    // ---- Store ----

    #[test]
    fn test_archetype_key_strips_instance_suffix() {
        assert_eq!(GuessFactorStore::archetype_key("Crusher (1)"), "Crusher");
        assert_eq!(GuessFactorStore::archetype_key("Crusher (2)"), "Crusher");
        assert_eq!(GuessFactorStore::archetype_key("Crusher"), "Crusher");
        assert_eq!(GuessFactorStore::archetype_key(""), "");
    }

    #[test]
    fn test_same_archetype_pools_counts() {
        let mut store = GuessFactorStore::new();
        let seg = segment(CombatMode::Melee, 2, 3);
        store.record(GuessFactorStore::archetype_key("Crusher (1)"), seg, 10);
        store.record(GuessFactorStore::archetype_key("Crusher (2)"), seg, 10);
        store.record(GuessFactorStore::archetype_key("Crusher"), seg, 10);
        assert_eq!(store.archetype_count(), 1);
        assert_eq!(store.row("Crusher", seg).unwrap()[10], 3);
    }

    #[test]
    fn test_best_bin_defaults_to_middle() {
        let store = GuessFactorStore::new();
        let seg = segment(CombatMode::Duel, 0, 2);
        assert_eq!(store.best_bin("Ghost", seg), MIDDLE_BIN);

        // A recorded-but-flat row also keeps the head-on default.
        let mut store = GuessFactorStore::new();
        store.record("Ghost", seg, MIDDLE_BIN);
        store.record("Ghost", seg, 4);
        // Tie between bin 4 and the middle bin resolves to the middle.
        assert_eq!(store.best_bin("Ghost", seg), MIDDLE_BIN);
    }

    #[test]
    fn test_best_bin_prefers_highest_count() {
        // Row all zero except bin 20 = 5: best index 20, factor 1/3.
        let mut store = GuessFactorStore::new();
        let seg = segment(CombatMode::Duel, 1, 3);
        for _ in 0..5 {
            store.record("Orbiter", seg, 20);
        }
        let best = store.best_bin("Orbiter", seg);
        assert_eq!(best, 20);
        assert!((bin_to_factor(best) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_are_monotonic() {
        let mut store = GuessFactorStore::new();
        let seg = segment(CombatMode::Melee, 0, 0);
        let mut previous = store.total();
        for bin in [0, 15, 30, 15, 7, 15] {
            store.record("Walls", seg, bin);
            let total = store.total();
            assert!(total > previous, "total must strictly grow on record");
            previous = total;
        }
        assert_eq!(previous, 6);
    }

    #[test]
    fn test_record_clamps_bin_index() {
        let mut store = GuessFactorStore::new();
        let seg = segment(CombatMode::Duel, 8, 12);
        store.record("Edge", seg, usize::MAX);
        assert_eq!(store.row("Edge", seg).unwrap()[GUESS_BINS - 1], 1);
    }

    // ---- Power and direction ----

    #[test]
    fn test_select_power_melee_always_max() {
        assert_eq!(select_power(CombatMode::Melee, 10.0), MAX_BULLET_POWER);
        assert_eq!(select_power(CombatMode::Melee, 1000.0), MAX_BULLET_POWER);
    }

    #[test]
    fn test_select_power_duel_distance_law() {
        assert!((select_power(CombatMode::Duel, 300.0) - 2.0).abs() < 1e-12);
        assert!((select_power(CombatMode::Duel, 600.0) - 1.0).abs() < 1e-12);
        // Close range saturates high, long range saturates low.
        assert_eq!(select_power(CombatMode::Duel, 150.0), MAX_BULLET_POWER);
        assert_eq!(select_power(CombatMode::Duel, 1200.0), MIN_BULLET_POWER);
        // Degenerate range must not divide by zero.
        assert_eq!(select_power(CombatMode::Duel, 0.0), MAX_BULLET_POWER);
    }

    #[test]
    fn test_lateral_direction_sign() {
        // Moving clockwise across the line of fire.
        assert_eq!(lateral_direction(FRAC_PI_2, 0.0, 8.0, -1.0), 1.0);
        // Same heading, reverse gear.
        assert_eq!(lateral_direction(FRAC_PI_2, 0.0, -8.0, 1.0), -1.0);
        // Standstill keeps whatever came before.
        assert_eq!(lateral_direction(FRAC_PI_2, 0.0, 0.0, -1.0), -1.0);
        assert_eq!(lateral_direction(FRAC_PI_2, 0.0, 0.0, 1.0), 1.0);
    }

    // ---- Waves ----

    #[test]
    fn test_bullet_speed_law() {
        assert!((bullet_speed(3.0) - 11.0).abs() < 1e-12);
        assert!((bullet_speed(1.0) - 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_escape_angle_full_power() {
        let wave = BulletWave::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 300.0),
            0.0,
            3.0,
            10,
            1.0,
            segment(CombatMode::Duel, 8, 3),
        );
        let expected = (8.0_f64 / 11.0).asin();
        assert!((wave.max_escape_angle() - expected).abs() < 1e-12);
        // ~46.66 degrees.
        assert!((wave.max_escape_angle().to_degrees() - 46.658).abs() < 0.01);
    }

    #[test]
    fn test_wave_resolves_head_on_for_stationary_opponent() {
        let target = Point::new(0.0, 300.0);
        let mut wave = BulletWave::new(
            Point::new(0.0, 0.0),
            target,
            0.0,
            3.0,
            10,
            1.0,
            segment(CombatMode::Duel, 8, 3),
        );

        // Too early: front at radius 110 < 300 after 10 ticks.
        assert!(wave.sweep(target, 20).is_none());
        assert_eq!(wave.cursor_tick, 20);

        // (38 - 10) * 11 = 308 >= 300, so the front arrives by tick 38.
        let impact = wave.sweep(target, 40).expect("wave should resolve");
        assert!(impact.guess_factor.abs() < 1e-9);
        assert_eq!(impact.bin, MIDDLE_BIN);
    }

    #[test]
    fn test_wave_saturates_for_max_lateral_runner() {
        // Opponent sprints fully lateral at top speed from the moment of
        // firing: it rides the edge of the escape envelope, so the guess
        // factor clamps to +1.
        let origin = Point::new(0.0, 0.0);
        let mut wave = BulletWave::new(
            origin,
            Point::new(0.0, 300.0),
            0.0,
            3.0,
            1,
            1.0,
            segment(CombatMode::Duel, 2, 3),
        );

        let mut resolved = None;
        for now in 2..200u64 {
            let latest = Point::new(8.0 * (now - 1) as f64, 300.0);
            if let Some(impact) = wave.sweep(latest, now) {
                resolved = Some(impact);
                break;
            }
        }
        let impact = resolved.expect("runner wave must eventually resolve");
        assert!((impact.guess_factor - 1.0).abs() < 1e-9);
        assert_eq!(impact.bin, GUESS_BINS - 1);
    }

    #[test]
    fn test_wave_direction_sign_flips_factor() {
        // Same geometry as the runner test but with lateral direction -1:
        // the factor lands on the mirrored side of the histogram.
        let origin = Point::new(0.0, 0.0);
        let mut wave = BulletWave::new(
            origin,
            Point::new(0.0, 300.0),
            0.0,
            3.0,
            1,
            -1.0,
            segment(CombatMode::Duel, 2, 3),
        );

        let mut resolved = None;
        for now in 2..200u64 {
            let latest = Point::new(8.0 * (now - 1) as f64, 300.0);
            if let Some(impact) = wave.sweep(latest, now) {
                resolved = Some(impact);
                break;
            }
        }
        let impact = resolved.expect("wave must resolve");
        assert!((impact.guess_factor + 1.0).abs() < 1e-9);
        assert_eq!(impact.bin, 0);
    }

    #[test]
    fn test_wave_guess_factor_always_clamped() {
        // Drop the opponent right next to the origin so the offset math
        // sees a wild angle; the factor must still land in [-1, 1].
        let mut wave = BulletWave::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            2.5,
            3.0,
            1,
            1.0,
            segment(CombatMode::Melee, 0, 0),
        );
        let impact = wave
            .sweep(Point::new(-5.0, 3.0), 50)
            .expect("front passes a point this close almost immediately");
        assert!((-1.0..=1.0).contains(&impact.guess_factor));
        assert!(impact.bin < GUESS_BINS);
    }

    #[test]
    fn test_wave_sweep_guards_zero_elapsed() {
        let target = Point::new(0.0, 300.0);
        let mut wave = BulletWave::new(
            Point::new(0.0, 0.0),
            target,
            0.0,
            3.0,
            10,
            1.0,
            segment(CombatMode::Duel, 8, 3),
        );
        wave.sweep(target, 20);
        // Same tick again: no elapsed time, no movement, no resolution.
        assert!(wave.sweep(target, 20).is_none());
        assert_eq!(wave.cursor_tick, 20);
    }

    #[test]
    fn test_wave_expiry_window() {
        let wave = BulletWave::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 300.0),
            0.0,
            2.0,
            100,
            1.0,
            segment(CombatMode::Duel, 8, 3),
        );
        assert!(!wave.expired(100));
        assert!(!wave.expired(100 + WAVE_EXPIRY_TICKS));
        assert!(wave.expired(101 + WAVE_EXPIRY_TICKS));
    }

    // ---- Aim solution ----

    #[test]
    fn test_solve_reads_best_bin() {
        let mut store = GuessFactorStore::new();
        let seg = segment(CombatMode::Duel, 1, 3);
        for _ in 0..5 {
            store.record("Orbiter", seg, 20);
        }
        let max_escape = (8.0_f64 / 11.0).asin();
        let solution = solve(&store, "Orbiter", seg, 1.0, max_escape);
        assert_eq!(solution.bin, 20);
        assert!((solution.offset - max_escape / 3.0).abs() < 1e-12);

        // Mirrored lateral direction mirrors the offset.
        let mirrored = solve(&store, "Orbiter", seg, -1.0, max_escape);
        assert!((mirrored.offset + max_escape / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_unknown_archetype_shoots_head_on() {
        let store = GuessFactorStore::new();
        let seg = segment(CombatMode::Melee, 4, 7);
        let solution = solve(&store, "Stranger", seg, 1.0, 0.5);
        assert_eq!(solution.bin, MIDDLE_BIN);
        assert!(solution.offset.abs() < 1e-12);
    }
}
