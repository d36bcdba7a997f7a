//! Integration tests for tvcm-sim.

use tvcm_core::{MobilityConfig, RunConfig, SocialConfig, Tick, Vec2};
use tvcm_spatial::ContactSet;

use crate::{NoopObserver, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_mobility(seed: u64) -> MobilityConfig {
    MobilityConfig { nodes: 40, seed, ..MobilityConfig::default() }
}

fn run_config(duration_secs: f64, snapshot_interval_ticks: u64) -> RunConfig {
    RunConfig { duration_secs, dt_secs: 10.0, snapshot_interval_ticks }
}

/// Records every hook invocation.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<(Tick, f64, usize)>,
    snapshots: Vec<(Tick, Vec<Vec2>)>,
    contacts:  Vec<ContactSet>,
    finished:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, time_secs: f64, contacts: &ContactSet) {
        self.ends.push((tick, time_secs, contacts.len()));
        self.contacts.push(contacts.clone());
    }

    fn on_snapshot(&mut self, tick: Tick, _time_secs: f64, positions: &[Vec2]) {
        self.snapshots.push((tick, positions.to_vec()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use tvcm_core::ScheduleStrictness;
    use tvcm_mobility::Mobility;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_plain_with_defaults() {
        let sim = SimBuilder::new(small_mobility(1), RunConfig::default()).build_plain().unwrap();
        assert_eq!(sim.model.node_count(), 40);
        assert_eq!(sim.tick(), Tick::ZERO);
    }

    #[test]
    fn plain_and_social_share_the_initial_layout() {
        let plain = SimBuilder::new(small_mobility(5), RunConfig::default()).build_plain().unwrap();
        let social = SimBuilder::new(small_mobility(5), RunConfig::default()).build_social().unwrap();
        assert_eq!(plain.model.positions(), social.model.positions());
    }

    #[test]
    fn invalid_run_config_errors() {
        let run = RunConfig { dt_secs: 0.0, ..RunConfig::default() };
        let err = SimBuilder::new(small_mobility(1), run).build_plain().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn invalid_mobility_config_errors() {
        let mobility = MobilityConfig { communities: 100, ..small_mobility(1) };
        let err = SimBuilder::new(mobility, RunConfig::default()).build_plain().err().unwrap();
        assert!(matches!(err, SimError::Mobility(_)));
    }

    #[test]
    fn strict_social_surfaces_collisions() {
        // One slot per day: every pair of overlapping groups collides.
        let social = SocialConfig {
            n_slots:          1,
            meetings_per_day: 1,
            strictness:       ScheduleStrictness::Strict,
            ..SocialConfig::default()
        };
        let err = SimBuilder::new(small_mobility(3), RunConfig::default())
            .social(social)
            .build_social()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Social(_)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_covers_the_configured_duration() {
        let mut sim = SimBuilder::new(small_mobility(2), run_config(100.0, 0)).build_plain().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts.len(), 10);
        assert_eq!(rec.ends.len(), 10);
        assert_eq!(rec.finished, Some(Tick(10)));
        assert_eq!(sim.time_secs(), 100.0);
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn partial_last_tick_rounds_up() {
        let mut sim = SimBuilder::new(small_mobility(2), run_config(95.0, 0)).build_plain().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.ends.len(), 10);
    }

    #[test]
    fn tick_end_reports_end_of_step_time() {
        let mut sim = SimBuilder::new(small_mobility(2), run_config(30.0, 0)).build_plain().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let times: Vec<f64> = rec.ends.iter().map(|&(_, t, _)| t).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        assert_eq!(rec.ends[0].0, Tick(0));
    }

    #[test]
    fn snapshots_follow_interval() {
        let mut sim = SimBuilder::new(small_mobility(2), run_config(100.0, 3)).build_plain().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let ticks: Vec<Tick> = rec.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(3), Tick(6), Tick(9)]);
        assert!(rec.snapshots.iter().all(|(_, p)| p.len() == 40));
    }

    #[test]
    fn reported_contacts_are_within_radius() {
        let mobility = MobilityConfig { nodes: 150, ..MobilityConfig::default() };
        let radius = mobility.contact_radius;
        let mut sim = SimBuilder::new(mobility, run_config(200.0, 1)).build_plain().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        for ((_, positions), contacts) in rec.snapshots.iter().zip(&rec.contacts) {
            for (a, b) in contacts {
                assert!(a < b);
                assert!(positions[a.index()].distance(positions[b.index()]) < radius);
            }
        }
    }

    #[test]
    fn run_ticks_then_run_finishes_at_end() {
        let mut sim = SimBuilder::new(small_mobility(4), run_config(100.0, 0)).build_plain().unwrap();
        sim.run_ticks(4, &mut NoopObserver).unwrap();
        assert_eq!(sim.tick(), Tick(4));

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts.first(), Some(&Tick(4)));
        assert_eq!(rec.finished, Some(Tick(10)));
    }

    #[test]
    fn social_run_is_deterministic() {
        let build = || {
            SimBuilder::new(small_mobility(8), run_config(7200.0, 60))
                .social(SocialConfig { slot_len_secs: 600.0, ..SocialConfig::default() })
                .build_social()
                .unwrap()
        };
        let (mut a, mut b) = (build(), build());
        let (mut ra, mut rb) = (Recorder::default(), Recorder::default());
        a.run(&mut ra).unwrap();
        b.run(&mut rb).unwrap();
        assert_eq!(ra.snapshots, rb.snapshots);
        assert_eq!(ra.contacts, rb.contacts);
    }
}
