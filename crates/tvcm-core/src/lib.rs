//! `tvcm-core`: foundational types for the tvcm community mobility
//! simulator.
//!
//! This crate is a dependency of every other `tvcm-*` crate.  It has no
//! `tvcm-*` dependencies and only a handful of external ones (`rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `CellId`, `GroupId`                             |
//! | [`geo`]         | `Vec2`, `Rect`, centroid                                  |
//! | [`time`]        | `Tick`, `SlotClock`, `SlotTransition`                     |
//! | [`rng`]         | `SimRng`: the single injectable randomness source        |
//! | [`config`]      | `MobilityConfig`, `SocialConfig`, `RunConfig`             |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry and config.|

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MobilityConfig, RunConfig, ScheduleStrictness, SocialConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Rect, Vec2};
pub use ids::{CellId, GroupId, NodeId};
pub use rng::SimRng;
pub use time::{SlotClock, SlotTransition, Tick};
