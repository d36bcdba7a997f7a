//! Plain data row types written by output backends.

/// One node's position at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub node_id:   u32,
    pub x:         f64,
    pub y:         f64,
}

/// One canonical contact pair (`node_a < node_b`) at a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub node_a:    u32,
    pub node_b:    u32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_secs:     f64,
    pub contact_count: u64,
}

/// A node's fixed home cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeRow {
    pub node_id:   u32,
    pub home_cell: u32,
}
