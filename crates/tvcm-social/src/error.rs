use thiserror::Error;
use tvcm_core::{CoreError, GroupId, NodeId};
use tvcm_mobility::MobilityError;

use crate::SlotCollision;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error("{group} lists {node}, but the population only has {node_count} nodes")]
    UnknownMember { group: GroupId, node: NodeId, node_count: usize },

    #[error("strict schedule rejected: {0}")]
    SlotCollision(SlotCollision),
}

pub type SocialResult<T> = Result<T, SocialError>;
