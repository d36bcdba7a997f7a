//! Spatial-subsystem error type.

use thiserror::Error;

use tvcm_core::{CellId, CoreError};

/// Errors produced by `tvcm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{cell} is outside a grid of {cell_count} cells")]
    CellOutOfRange { cell: CellId, cell_count: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
