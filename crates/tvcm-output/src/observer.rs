//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use tvcm_core::{Tick, Vec2};
use tvcm_sim::SimObserver;
use tvcm_spatial::ContactSet;

use crate::row::{ContactRow, PositionRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes positions, contacts and tick summaries to
/// any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, time_secs: f64, contacts: &ContactSet) {
        let rows: Vec<ContactRow> = contacts
            .iter()
            .map(|&(a, b)| ContactRow { tick: tick.0, time_secs, node_a: a.0, node_b: b.0 })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_contacts(&rows);
            self.store_err(result);
        }

        let row = TickSummaryRow {
            tick:          tick.0,
            time_secs,
            contact_count: contacts.len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f64, positions: &[Vec2]) {
        let rows: Vec<PositionRow> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| PositionRow {
                tick: tick.0,
                time_secs,
                node_id: i as u32,
                x: p.x,
                y: p.y,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_positions(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
