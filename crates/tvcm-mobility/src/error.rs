use thiserror::Error;
use tvcm_core::{CoreError, NodeId};
use tvcm_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// Every waypoint draw landed on the node's own position.  Only reachable
    /// with zero-area cells, i.e. a broken configuration.
    #[error("{node} drew a degenerate waypoint {attempts} times in a row")]
    DegenerateWaypoint { node: NodeId, attempts: u32 },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
