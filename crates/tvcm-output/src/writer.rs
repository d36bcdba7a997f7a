//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ContactRow, OutputResult, PositionRow, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// The observer never propagates these errors; they are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of node positions.
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()>;

    /// Write a batch of contact pairs.
    fn write_contacts(&mut self, rows: &[ContactRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
