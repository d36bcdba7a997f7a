//! Friend-group formation.

use tvcm_core::{GroupId, NodeId, SimRng, SocialConfig};

use crate::SocialResult;

/// An immutable set of nodes that meet together.
///
/// Members are distinct and sorted.  Groups are never merged: a node seeds
/// exactly one group but may appear in any number of others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FriendGroup {
    pub id:      GroupId,
    /// The node whose draw produced this group.
    pub seed:    NodeId,
    members:     Vec<NodeId>,
}

impl FriendGroup {
    /// Build a group from an explicit member list.  Duplicates are dropped.
    pub fn new(id: GroupId, seed: NodeId, members: impl IntoIterator<Item = NodeId>) -> Self {
        let mut members: Vec<NodeId> = members.into_iter().chain(std::iter::once(seed)).collect();
        members.sort_unstable();
        members.dedup();
        Self { id, seed, members }
    }

    /// Members in ascending id order, seed included.
    #[inline]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.binary_search(&node).is_ok()
    }
}

/// Draw one group per node, in node order.
///
/// Each node draws `min(min_group + G − 1, max_group)` *other* nodes, with
/// `G ~ Geometric(edge_probability)` on `{1, 2, …}`, capped at `N − 1`.  The
/// group is that uniform sample without replacement plus the seed itself.
pub fn form_groups(
    node_count: usize,
    config: &SocialConfig,
    rng: &mut SimRng,
) -> SocialResult<Vec<FriendGroup>> {
    let min = config.min_group as u64;
    let max = config.max_group as u64;
    // Trials past this point would be clamped to `max_group` anyway.
    let cap = max.saturating_sub(min).saturating_add(1);

    let mut groups = Vec::with_capacity(node_count);
    for u in 0..node_count {
        let trials = rng.geometric_trials(config.edge_probability, cap)?;
        let drawn = min.saturating_add(trials - 1).min(max);
        let others = usize::try_from(drawn).unwrap_or(usize::MAX).min(node_count - 1);

        let seed = NodeId(u as u32);
        // Sample from the N − 1 other ids, then shift past the seed.
        let friends = rng
            .sample_indices(node_count - 1, others)
            .into_iter()
            .map(|k| NodeId((if k >= u { k + 1 } else { k }) as u32));

        groups.push(FriendGroup::new(GroupId(u as u32), seed, friends));
    }
    Ok(groups)
}
