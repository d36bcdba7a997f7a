//! `tvcm-spatial`: the static geometry of a run and proximity queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid` (cell ↔ rectangle), `CommunityLayout` (node → home)  |
//! | [`contact`] | `ContactDetector` (R-tree range query), `ContactSet`        |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Neighbour queries in `ContactDetector::detect` use Rayon. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on core types.          |

pub mod contact;
pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use contact::{ContactDetector, ContactSet};
pub use error::{SpatialError, SpatialResult};
pub use grid::{CommunityLayout, Grid};
