//! `tvcm-output`: simulation output writers for the tvcm simulator.
//!
//! Two backends are provided, one behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                              |
//! |-----------|---------|------------------------------------------------------------|
//! | *(none)*  | CSV     | `positions.csv`, `contacts.csv`, `tick_summaries.csv`      |
//! | `sqlite`  | SQLite  | `output.db`                                                |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `tvcm_sim::SimObserver`.
//! [`write_homes`] dumps the static node → home cell table once per run, so
//! contacts can later be split into intra- and inter-community pairs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tvcm_output::{CsvWriter, SimOutputObserver, write_homes};
//!
//! write_homes(Path::new("./output"), &sim.model)?;
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod homes;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use homes::write_homes;
pub use observer::SimOutputObserver;
pub use row::{ContactRow, HomeRow, PositionRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
