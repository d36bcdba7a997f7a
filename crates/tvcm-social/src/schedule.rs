//! Conflict-aware recurring meeting schedule.
//!
//! # Colouring
//!
//! Groups are coloured greedily in creation order: each group takes the
//! smallest non-negative integer that none of its members has already
//! claimed through an earlier group.  Two groups sharing a member therefore
//! never share a colour.
//!
//! # Colour → slots
//!
//! ```text
//! spacing = n_slots / meetings_per_day
//! slots(c) = { (c + k·spacing) mod n_slots : k in 0..meetings_per_day }
//! ```
//!
//! Distinct colours do **not** imply disjoint slot sets: colours `c` and
//! `c + spacing` map onto the same slots.  [`MeetingSchedule::collisions`]
//! reports every member that ends up double-booked this way.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use tvcm_core::{GroupId, NodeId};

use crate::FriendGroup;

/// A member scheduled into two groups that meet in the same slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotCollision {
    pub node:   NodeId,
    /// The earlier group in creation order.
    pub first:  GroupId,
    /// The later group; it wins the member's position.
    pub second: GroupId,
    pub slot:   u32,
}

impl fmt::Display for SlotCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is in {} and {}, both meeting in slot {}",
            self.node, self.first, self.second, self.slot
        )
    }
}

/// Read-only assignment of groups to colours and slots.
#[derive(Clone, Debug)]
pub struct MeetingSchedule {
    n_slots:          u32,
    spacing:          u32,
    meetings_per_day: u32,

    /// Colour per group, indexed by `GroupId`.
    colors: Vec<u32>,

    /// Sorted meeting slots per group, indexed by `GroupId`.
    slots: Vec<Vec<u32>>,

    /// Groups meeting in each slot, in creation order.
    by_slot: Vec<Vec<GroupId>>,

    collisions: Vec<SlotCollision>,
}

impl MeetingSchedule {
    /// Colour `groups` and expand each colour into its slot set.
    ///
    /// `groups[i].id` must equal `GroupId(i)`.  Callers validate
    /// `1 <= meetings_per_day <= n_slots`.
    pub fn build(groups: &[FriendGroup], n_slots: u32, meetings_per_day: u32) -> Self {
        let spacing = n_slots / meetings_per_day;

        let mut used: FxHashMap<NodeId, FxHashSet<u32>> = FxHashMap::default();
        let mut colors = Vec::with_capacity(groups.len());
        for group in groups {
            debug_assert_eq!(group.id.index(), colors.len());
            let mut c = 0u32;
            while group
                .members()
                .iter()
                .any(|m| used.get(m).is_some_and(|claimed| claimed.contains(&c)))
            {
                c += 1;
            }
            for &m in group.members() {
                used.entry(m).or_default().insert(c);
            }
            colors.push(c);
        }

        let mut schedule = Self {
            n_slots,
            spacing,
            meetings_per_day,
            colors: Vec::new(),
            slots: Vec::with_capacity(groups.len()),
            by_slot: vec![Vec::new(); n_slots as usize],
            collisions: Vec::new(),
        };
        for (g, &c) in colors.iter().enumerate() {
            let mut slots = schedule.slots_for_color(c);
            slots.sort_unstable();
            for &s in &slots {
                schedule.by_slot[s as usize].push(GroupId(g as u32));
            }
            schedule.slots.push(slots);
        }
        schedule.colors = colors;
        schedule.collisions = schedule.find_collisions(groups);
        schedule
    }

    /// Slots a group of colour `c` meets in, in `k` order.
    pub fn slots_for_color(&self, c: u32) -> Vec<u32> {
        (0..self.meetings_per_day)
            .map(|k| {
                let slot = (c as u64 + k as u64 * self.spacing as u64) % self.n_slots as u64;
                slot as u32
            })
            .collect()
    }

    #[inline]
    pub fn n_slots(&self) -> u32 {
        self.n_slots
    }

    #[inline]
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    #[inline]
    pub fn color(&self, group: GroupId) -> u32 {
        self.colors[group.index()]
    }

    /// Number of distinct colours used.
    pub fn color_count(&self) -> u32 {
        self.colors.iter().max().map_or(0, |&c| c + 1)
    }

    /// Sorted meeting slots of `group`.
    #[inline]
    pub fn slots(&self, group: GroupId) -> &[u32] {
        &self.slots[group.index()]
    }

    /// `true` if `group` meets in `slot`.
    #[inline]
    pub fn is_active(&self, group: GroupId, slot: u32) -> bool {
        self.slots[group.index()].binary_search(&slot).is_ok()
    }

    /// Groups meeting in `slot`, in creation order.
    #[inline]
    pub fn groups_in_slot(&self, slot: u32) -> &[GroupId] {
        &self.by_slot[slot as usize]
    }

    /// Every double-booking of a member, ordered by slot then member.
    #[inline]
    pub fn collisions(&self) -> &[SlotCollision] {
        &self.collisions
    }

    fn find_collisions(&self, groups: &[FriendGroup]) -> Vec<SlotCollision> {
        let mut found = Vec::new();
        for (slot, active) in self.by_slot.iter().enumerate() {
            let mut owner: FxHashMap<NodeId, GroupId> = FxHashMap::default();
            for &g in active {
                for &m in groups[g.index()].members() {
                    if let Some(&first) = owner.get(&m) {
                        found.push(SlotCollision { node: m, first, second: g, slot: slot as u32 });
                    }
                    owner.insert(m, g);
                }
            }
        }
        found.sort_by_key(|c| (c.slot, c.node, c.second));
        found
    }
}
