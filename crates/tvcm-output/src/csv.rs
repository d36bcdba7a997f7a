//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `positions.csv`
//! - `contacts.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{ContactRow, OutputResult, PositionRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    contacts:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut positions = Writer::from_path(dir.join("positions.csv"))?;
        positions.write_record(["tick", "time_secs", "node_id", "x", "y"])?;

        let mut contacts = Writer::from_path(dir.join("contacts.csv"))?;
        contacts.write_record(["tick", "time_secs", "node_a", "node_b"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_secs", "contact_count"])?;

        Ok(Self {
            positions,
            contacts,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.node_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_contacts(&mut self, rows: &[ContactRow]) -> OutputResult<()> {
        for row in rows {
            self.contacts.write_record(&[
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.node_a.to_string(),
                row.node_b.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.contact_count.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.contacts.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
