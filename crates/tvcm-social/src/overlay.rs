//! The meeting state machine layered over a [`Mobility`] model.

use tracing::{debug, info, warn};

use tvcm_core::{
    CellId, CoreError, GroupId, NodeId, ScheduleStrictness, SimRng, SlotClock, SocialConfig, Vec2,
    geo,
};
use tvcm_mobility::{Mobility, MobilityResult};
use tvcm_spatial::ContactSet;

use crate::{FriendGroup, MeetingSchedule, SocialError, SocialResult, form_groups};

/// Per-node meeting status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeetingState {
    #[default]
    Wandering,
    /// Pinned at the venue of this group.
    InMeeting(GroupId),
}

impl MeetingState {
    #[inline]
    pub fn group(self) -> Option<GroupId> {
        match self {
            MeetingState::Wandering => None,
            MeetingState::InMeeting(g) => Some(g),
        }
    }
}

/// Friend groups that periodically gather at the centroid of their members.
///
/// Owns the wrapped model `M` and touches it only through
/// [`Mobility::freeze_at`] and [`Mobility::resume`].  Itself implements
/// [`Mobility`], so the run loop drives it exactly like a bare engine.
pub struct SocialOverlay<M: Mobility> {
    base:     M,
    config:   SocialConfig,
    groups:   Vec<FriendGroup>,
    schedule: MeetingSchedule,
    clock:    SlotClock,

    /// Meeting status per node, indexed by `NodeId`.
    meeting: Vec<MeetingState>,

    /// Where each group last convened, while it is in session.
    venues: Vec<Option<Vec2>>,
}

impl<M: Mobility> SocialOverlay<M> {
    /// Draw one friend group per node from `rng`, colour them and wrap `base`.
    pub fn new(base: M, config: SocialConfig, rng: &mut SimRng) -> SocialResult<Self> {
        config.validate()?;
        let groups = form_groups(base.node_count(), &config, rng)?;
        Self::with_groups(base, config, groups)
    }

    /// Wrap `base` with an explicit group set.
    ///
    /// Groups must be listed in id order starting at `GroupId(0)` and only
    /// name nodes of `base`.
    pub fn with_groups(
        base: M,
        config: SocialConfig,
        groups: Vec<FriendGroup>,
    ) -> SocialResult<Self> {
        config.validate()?;
        let node_count = base.node_count();
        for (i, group) in groups.iter().enumerate() {
            if group.id.index() != i {
                let msg = format!("group at position {i} carries id {}", group.id);
                return Err(CoreError::config(msg).into());
            }
            if let Some(&node) = group.members().iter().find(|m| m.index() >= node_count) {
                return Err(SocialError::UnknownMember { group: group.id, node, node_count });
            }
        }

        let schedule = MeetingSchedule::build(&groups, config.n_slots, config.meetings_per_day);
        if let Some(&first) = schedule.collisions().first() {
            match config.strictness {
                ScheduleStrictness::Strict => return Err(SocialError::SlotCollision(first)),
                ScheduleStrictness::Lenient => {
                    warn!(
                        collisions = schedule.collisions().len(),
                        first = %first,
                        "members double-booked; the later group wins"
                    );
                }
            }
        }

        info!(
            nodes = node_count,
            groups = groups.len(),
            colors = schedule.color_count(),
            spacing = schedule.spacing(),
            "social overlay initialised"
        );

        Ok(Self {
            clock: SlotClock::new(config.slot_len_secs, config.n_slots),
            meeting: vec![MeetingState::Wandering; node_count],
            venues: vec![None; groups.len()],
            base,
            config,
            groups,
            schedule,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn base(&self) -> &M {
        &self.base
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }

    pub fn groups(&self) -> &[FriendGroup] {
        &self.groups
    }

    pub fn schedule(&self) -> &MeetingSchedule {
        &self.schedule
    }

    #[inline]
    pub fn meeting_state(&self, node: NodeId) -> MeetingState {
        self.meeting[node.index()]
    }

    /// Nodes currently pinned for `group`, in id order.
    pub fn attending(&self, group: GroupId) -> Vec<NodeId> {
        self.groups[group.index()]
            .members()
            .iter()
            .copied()
            .filter(|m| self.meeting[m.index()] == MeetingState::InMeeting(group))
            .collect()
    }

    /// Meeting point of `group` while it is in session.
    #[inline]
    pub fn venue(&self, group: GroupId) -> Option<Vec2> {
        self.venues[group.index()]
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    #[inline]
    pub fn current_slot(&self) -> u32 {
        self.clock.current_slot()
    }

    /// Number of double-bookings resolved by last-write-wins.
    #[inline]
    pub fn collision_count(&self) -> usize {
        self.schedule.collisions().len()
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Pin every member of each group scheduled in `slot` at the members'
    /// centroid, in creation order.
    fn convene(&mut self, slot: u32) {
        for &g in self.schedule.groups_in_slot(slot) {
            let members = self.groups[g.index()].members();
            let positions = self.base.positions();
            let Some(venue) = geo::centroid(members.iter().map(|m| positions[m.index()])) else {
                continue;
            };
            for &m in members {
                self.base.freeze_at(m, venue);
                self.meeting[m.index()] = MeetingState::InMeeting(g);
            }
            self.venues[g.index()] = Some(venue);
        }
    }

    /// Release every attending node whose group does not meet in `slot`.
    fn release(&mut self, slot: u32) -> usize {
        let mut released = 0;
        for i in 0..self.meeting.len() {
            let MeetingState::InMeeting(g) = self.meeting[i] else { continue };
            if self.schedule.is_active(g, slot) {
                continue;
            }
            self.meeting[i] = MeetingState::Wandering;
            self.base.resume(NodeId(i as u32));
            released += 1;
        }
        for (g, venue) in self.venues.iter_mut().enumerate() {
            if venue.is_some() && !self.schedule.is_active(GroupId(g as u32), slot) {
                *venue = None;
            }
        }
        released
    }
}

impl<M: Mobility> Mobility for SocialOverlay<M> {
    fn node_count(&self) -> usize {
        self.base.node_count()
    }

    fn home_cell(&self, node: NodeId) -> CellId {
        self.base.home_cell(node)
    }

    fn positions(&self) -> &[Vec2] {
        self.base.positions()
    }

    fn speed(&self, node: NodeId) -> f64 {
        self.base.speed(node)
    }

    fn speed_range(&self) -> (f64, f64) {
        self.base.speed_range()
    }

    /// Convene on entering a slot, integrate the wrapped model, then release
    /// members of groups no longer in session.
    fn advance(&mut self, dt: f64) -> MobilityResult<Vec<Vec2>> {
        let step = self.clock.advance(dt);
        if step.is_boundary() {
            self.convene(step.current);
            debug!(
                clock = %self.clock,
                convened = self.schedule.groups_in_slot(step.current).len(),
                "slot boundary"
            );
        }

        let positions = self.base.advance(dt)?;

        let released = self.release(step.current);
        if released > 0 {
            debug!(clock = %self.clock, released, "meetings ended");
        }
        Ok(positions)
    }

    fn contacts(&self, positions: &[Vec2]) -> ContactSet {
        self.base.contacts(positions)
    }

    fn freeze_at(&mut self, node: NodeId, at: Vec2) {
        self.base.freeze_at(node, at);
    }

    fn resume(&mut self, node: NodeId) -> f64 {
        self.base.resume(node)
    }
}
