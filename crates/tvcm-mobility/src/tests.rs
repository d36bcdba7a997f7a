//! Unit tests for tvcm-mobility.

use tvcm_core::{MobilityConfig, NodeId};

use crate::{Mobility, MobilityEngine};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2 × 2 grid of 10 m cells, one community, four walkers.
fn tiny_config(seed: u64) -> MobilityConfig {
    MobilityConfig {
        grid_x:         2,
        grid_y:         2,
        cell_size:      10.0,
        communities:    1,
        nodes:          4,
        stay_range:     (0.6, 0.95),
        speed_range:    (1.0, 3.0),
        contact_radius: 3.0,
        seed,
    }
}

fn engine(config: MobilityConfig) -> MobilityEngine {
    MobilityEngine::new(config).unwrap()
}

fn node_ids(eng: &MobilityEngine) -> Vec<NodeId> {
    (0..eng.node_count() as u32).map(NodeId).collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn nodes_start_inside_home_cell() {
        let eng = engine(MobilityConfig { nodes: 60, ..MobilityConfig::default() });
        for node in node_ids(&eng) {
            let s = eng.state(node);
            let bounds = eng.grid().cell_bounds(s.home_cell).unwrap();
            assert!(bounds.contains_closed(s.position), "{node} starts outside home");
        }
    }

    #[test]
    fn stay_probabilities_within_range() {
        let eng = engine(MobilityConfig::default());
        for node in node_ids(&eng) {
            let p = eng.state(node).stay_probability;
            assert!((0.6..=0.95).contains(&p));
        }
    }

    #[test]
    fn initial_waypoint_direction_and_speed() {
        let eng = engine(MobilityConfig::default());
        for node in node_ids(&eng) {
            let s = eng.state(node);
            assert!((s.direction.length() - 1.0).abs() < 1e-9);
            assert!((1.0..=3.0).contains(&s.speed));
            assert!(!s.held);
        }
    }

    #[test]
    fn rejects_bad_config() {
        let too_many = MobilityConfig { communities: 5, ..tiny_config(0) };
        assert!(MobilityEngine::new(too_many).is_err());

        let empty = MobilityConfig { nodes: 0, ..tiny_config(0) };
        assert!(MobilityEngine::new(empty).is_err());
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = engine(MobilityConfig { nodes: 50, ..MobilityConfig::default() });
        let mut b = engine(MobilityConfig { nodes: 50, ..MobilityConfig::default() });
        for _ in 0..200 {
            assert_eq!(a.advance(10.0).unwrap(), b.advance(10.0).unwrap());
        }
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematics {
    use super::*;

    #[test]
    fn one_step_stays_on_the_grid() {
        let mut eng = engine(tiny_config(7));
        let positions = eng.advance(1.0).unwrap();
        assert_eq!(positions.len(), 4);
        for p in positions {
            assert!((0.0..=20.0).contains(&p.x) && (0.0..=20.0).contains(&p.y), "{p} off grid");
        }
    }

    #[test]
    fn direction_is_unit_whenever_moving() {
        let mut eng = engine(MobilityConfig { nodes: 40, ..MobilityConfig::default() });
        for _ in 0..500 {
            eng.advance(10.0).unwrap();
            for node in node_ids(&eng) {
                let s = eng.state(node);
                if s.speed != 0.0 {
                    assert!((s.direction.length() - 1.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn overshoot_snaps_onto_waypoint() {
        let mut eng = engine(MobilityConfig { nodes: 40, ..MobilityConfig::default() });
        let dt = 30.0;
        let mut snapped = 0;
        for _ in 0..300 {
            // Arrivals re-plan inside advance, so record only nodes that will
            // keep their current waypoint through this step.
            let before: Vec<_> = node_ids(&eng).into_iter().map(|n| eng.state(n)).collect();
            eng.advance(dt).unwrap();
            for (i, prev) in before.iter().enumerate() {
                if prev.remaining() < crate::ARRIVAL_EPS {
                    continue;
                }
                let now = eng.state(NodeId(i as u32));
                if prev.remaining() < prev.speed * dt - 1e-9 {
                    assert_eq!(now.position, prev.waypoint);
                    snapped += 1;
                }
                // Never beyond the waypoint along the direction of travel.
                assert!((now.position - now.waypoint).dot(now.direction) <= 0.0);
            }
        }
        assert!(snapped > 0, "scenario never exercised an overshoot");
    }

    #[test]
    fn positions_never_leave_the_grid() {
        let mut eng = engine(MobilityConfig { nodes: 30, ..MobilityConfig::default() });
        let bounds = eng.grid().bounds();
        for _ in 0..1000 {
            for p in eng.advance(10.0).unwrap() {
                assert!(bounds.contains_closed(p));
            }
        }
    }
}

// ── Markov waypoint choice ────────────────────────────────────────────────────

#[cfg(test)]
mod waypoints {
    use super::*;

    #[test]
    fn stay_probability_one_never_leaves_home() {
        let cfg = MobilityConfig {
            nodes:      1,
            stay_range: (1.0, 1.0),
            ..MobilityConfig::default()
        };
        let mut eng = engine(cfg);
        let home = eng.state(NodeId(0)).home_cell;
        let bounds = eng.grid().cell_bounds(home).unwrap();

        let mut last = eng.state(NodeId(0)).waypoint;
        let mut changes = 0;
        for _ in 0..1000 {
            eng.advance(10.0).unwrap();
            let wp = eng.state(NodeId(0)).waypoint;
            assert!(bounds.contains_closed(wp), "waypoint {wp} left home cell");
            if wp != last {
                changes += 1;
                last = wp;
            }
        }
        assert!(changes > 0, "node never reached a waypoint");
    }

    #[test]
    fn stay_probability_zero_always_roams() {
        let mut eng = engine(MobilityConfig { nodes: 5, stay_range: (0.0, 0.0), ..MobilityConfig::default() });
        for _ in 0..200 {
            for node in node_ids(&eng) {
                eng.select_next_waypoint(node).unwrap();
                let s = eng.state(node);
                assert_ne!(eng.grid().cell_of(s.waypoint), Some(s.home_cell));
            }
        }
    }

    #[test]
    fn set_stay_probability_overrides_draw() {
        let mut eng = engine(tiny_config(1));
        eng.set_stay_probability(NodeId(2), 1.0);
        assert_eq!(eng.state(NodeId(2)).stay_probability, 1.0);
        eng.set_stay_probability(NodeId(2), 3.0);
        assert_eq!(eng.state(NodeId(2)).stay_probability, 1.0);
    }
}

// ── Mobility capability ───────────────────────────────────────────────────────

#[cfg(test)]
mod capability {
    use tvcm_core::Vec2;

    use super::*;

    #[test]
    fn frozen_node_does_not_move() {
        let mut eng = engine(MobilityConfig { nodes: 10, ..MobilityConfig::default() });
        let spot = Vec2::new(123.0, 456.0);
        eng.freeze_at(NodeId(3), spot);
        for _ in 0..100 {
            let positions = eng.advance(10.0).unwrap();
            assert_eq!(positions[3], spot);
            assert_eq!(eng.speed(NodeId(3)), 0.0);
            assert!(eng.state(NodeId(3)).held);
        }
    }

    #[test]
    fn resume_draws_speed_in_range() {
        let mut eng = engine(MobilityConfig { nodes: 10, ..MobilityConfig::default() });
        let waypoint = eng.state(NodeId(0)).waypoint;
        eng.freeze_at(NodeId(0), Vec2::new(50.0, 50.0));
        let speed = eng.resume(NodeId(0));
        assert!((1.0..=3.0).contains(&speed));
        assert_eq!(eng.speed(NodeId(0)), speed);
        assert!(!eng.state(NodeId(0)).held);
        assert_eq!(eng.state(NodeId(0)).waypoint, waypoint);
    }

    #[test]
    fn huge_radius_contacts_every_pair() {
        let cfg = MobilityConfig { nodes: 25, contact_radius: 1.0e5, ..MobilityConfig::default() };
        let eng = engine(cfg);
        assert_eq!(eng.current_contacts().len(), 25 * 24 / 2);
    }

    #[test]
    fn contacts_are_canonical() {
        let cfg = MobilityConfig { nodes: 200, contact_radius: 30.0, ..MobilityConfig::default() };
        let mut eng = engine(cfg);
        let positions = eng.advance(10.0).unwrap();
        let first = eng.contacts(&positions);
        assert_eq!(first, eng.contacts(&positions));
        for (a, b) in &first {
            assert!(a < b);
            assert!(positions[a.index()].distance(positions[b.index()]) < 30.0);
        }
    }

    #[test]
    fn home_cell_matches_layout() {
        let eng = engine(MobilityConfig::default());
        for node in node_ids(&eng) {
            assert_eq!(eng.home_cell(node), eng.layout().home_cell(node));
        }
    }
}
