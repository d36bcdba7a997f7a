//! Static node → home cell table.

use std::path::Path;

use csv::Writer;
use tracing::info;

use tvcm_core::NodeId;
use tvcm_mobility::Mobility;

use crate::{HomeRow, OutputResult};

/// Write `homes.csv` (`node_id,home_cell`) for every node of `model` into
/// `dir`.
pub fn write_homes<M: Mobility>(dir: &Path, model: &M) -> OutputResult<()> {
    let path = dir.join("homes.csv");
    let mut w = Writer::from_path(&path)?;
    w.write_record(["node_id", "home_cell"])?;
    for i in 0..model.node_count() {
        let node = NodeId(i as u32);
        let row = HomeRow { node_id: node.0, home_cell: model.home_cell(node).0 };
        w.write_record(&[row.node_id.to_string(), row.home_cell.to_string()])?;
    }
    w.flush()?;
    info!(path = %path.display(), nodes = model.node_count(), "home cells written");
    Ok(())
}
