#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::commands::ActuatorCommand;
    use crate::enums::CombatMode;
    use crate::events::{Observation, SelfStatus};
    use crate::state::{AgentSnapshot, ContactView, DecisionEvent};
    use crate::types::{normalize_absolute, normalize_relative, Point, Rect};

    const EPSILON: f64 = 1e-9;

    // ---- Geometry ----

    #[test]
    fn test_project_cardinal_directions() {
        let origin = Point::new(100.0, 100.0);
        let north = origin.project(0.0, 50.0);
        assert!((north.x - 100.0).abs() < EPSILON);
        assert!((north.y - 150.0).abs() < EPSILON);

        let east = origin.project(FRAC_PI_2, 50.0);
        assert!((east.x - 150.0).abs() < EPSILON);
        assert!((east.y - 100.0).abs() < EPSILON);

        let south = origin.project(PI, 50.0);
        assert!((south.y - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_project_bearing_round_trip() {
        let origin = Point::new(37.0, -12.0);
        for i in 0..16 {
            let bearing = i as f64 / 16.0 * TAU;
            let p = origin.project(bearing, 123.0);
            let back = normalize_absolute(origin.bearing_to(&p));
            let diff = normalize_relative(back - bearing).abs();
            assert!(diff < 1e-9, "bearing {bearing} round-tripped to {back}");
            assert!((origin.distance_to(&p) - 123.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bearing_to_coincident_points() {
        let p = Point::new(5.0, 5.0);
        let bearing = p.bearing_to(&p);
        assert!(bearing.is_finite());
        assert!((bearing - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_project_zero_distance() {
        let p = Point::new(5.0, 5.0);
        let q = p.project(1.234, 0.0);
        assert_eq!(p, q);
    }

    #[test]
    fn test_normalize_relative_range() {
        assert!((normalize_relative(PI) - PI).abs() < EPSILON, "PI maps to PI");
        assert!(
            (normalize_relative(-PI) - PI).abs() < EPSILON,
            "-PI maps to +PI (exclusive lower bound)"
        );
        assert!(normalize_relative(TAU).abs() < EPSILON);
        assert!((normalize_relative(PI + 0.1) - (-PI + 0.1)).abs() < 1e-9);
        assert!((normalize_relative(-0.25) - (-0.25)).abs() < EPSILON);
        for i in -20..20 {
            let a = normalize_relative(i as f64 * 0.7);
            assert!(a > -PI && a <= PI, "normalized angle {a} out of range");
        }
    }

    #[test]
    fn test_normalize_absolute_range() {
        for i in -20..20 {
            let a = normalize_absolute(i as f64 * 0.7);
            assert!((0.0..TAU).contains(&a), "absolute angle {a} out of range");
        }
    }

    #[test]
    fn test_rect_contains_and_inset() {
        let field = Rect::new(0.0, 0.0, 800.0, 600.0);
        let playable = field.inset(50.0);
        assert_eq!(playable, Rect::new(50.0, 50.0, 700.0, 500.0));

        assert!(playable.contains(Point::new(400.0, 300.0)));
        assert!(playable.contains(Point::new(50.0, 50.0)), "edges included");
        assert!(!playable.contains(Point::new(49.9, 300.0)));
        assert!(!playable.contains(Point::new(400.0, 550.1)));
    }

    #[test]
    fn test_rect_clamp() {
        let r = Rect::new(50.0, 50.0, 700.0, 500.0);
        let clamped = r.clamp(Point::new(-10.0, 900.0));
        assert_eq!(clamped, Point::new(50.0, 550.0));
        assert!(r.contains(clamped));

        let inside = Point::new(100.0, 100.0);
        assert_eq!(r.clamp(inside), inside);
    }

    // ---- Combat mode ----

    #[test]
    fn test_combat_mode_from_count() {
        assert_eq!(CombatMode::from_opponent_count(1), CombatMode::Duel);
        assert_eq!(CombatMode::from_opponent_count(2), CombatMode::Melee);
        assert_eq!(CombatMode::from_opponent_count(9), CombatMode::Melee);
        // A battle the agent has already won still reads as a duel.
        assert_eq!(CombatMode::from_opponent_count(0), CombatMode::Duel);
    }

    #[test]
    fn test_combat_mode_table_index() {
        assert_eq!(CombatMode::Melee.index(), 0);
        assert_eq!(CombatMode::Duel.index(), 1);
    }

    // ---- Serde round-trips ----

    #[test]
    fn test_actuator_command_serde() {
        let commands = vec![
            ActuatorCommand::TurnRadar { angle: TAU },
            ActuatorCommand::TurnGun { angle: -0.25 },
            ActuatorCommand::Fire { power: 2.5 },
            ActuatorCommand::Turn { angle: 1.0 },
            ActuatorCommand::Move { distance: -120.0 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: ActuatorCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_observation_serde() {
        let obs = Observation {
            name: "Crusher (2)".to_string(),
            bearing: 0.5,
            distance: 320.0,
            heading: 1.25,
            velocity: -6.0,
            energy: 87.5,
        };
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }

    #[test]
    fn test_self_status_serde() {
        let status = SelfStatus {
            position: Point::new(400.0, 300.0),
            heading: 0.1,
            gun_heading: 0.2,
            radar_heading: 0.3,
            energy: 100.0,
            opponents_remaining: 4,
            tick: 42,
        };
        let json = serde_json::to_string(&status).unwrap();
        let back: SelfStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, back);
    }

    #[test]
    fn test_decision_event_serde() {
        let events = vec![
            DecisionEvent::TargetAcquired {
                name: "Crusher (2)".to_string(),
            },
            DecisionEvent::TargetLost {
                name: "Crusher (2)".to_string(),
            },
            DecisionEvent::WaveResolved {
                archetype: "Crusher".to_string(),
                bin: 20,
                guess_factor: 1.0 / 3.0,
            },
            DecisionEvent::WaveExpired { fire_tick: 17 },
            DecisionEvent::Fired {
                power: 3.0,
                bin: 15,
                offset: 0.0,
            },
            DecisionEvent::DodgeFlipped { direction: -1.0 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: DecisionEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = AgentSnapshot {
            tick: 100,
            mode: CombatMode::Duel,
            target: Some("Crusher (2)".to_string()),
            contacts: vec![ContactView {
                name: "Crusher (2)".to_string(),
                archetype: "Crusher".to_string(),
                position: Point::new(600.0, 400.0),
                energy: 55.0,
                distance: 223.6,
            }],
            live_waves: 3,
            destination: Some(Point::new(200.0, 200.0)),
            hits_taken: 2,
            events: vec![DecisionEvent::Fired {
                power: 2.0,
                bin: 18,
                offset: 0.12,
            }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: AgentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
