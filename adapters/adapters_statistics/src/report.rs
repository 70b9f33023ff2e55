//! Simulation Report
//!
//! Aggregates a final block table and its latency trace into the summary
//! figures the front end displays after a run.

use entities_block_table::{BlockStatus, BlockTable};
use serde::Serialize;
use usecases_deallocation::LatencyTrace;

/// Summary of one finished simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Rows in the final table
    pub block_count: usize,
    /// Free rows
    pub free_blocks: usize,
    /// Busy rows
    pub busy_blocks: usize,
    /// Unresolved placeholder rows
    pub pending_blocks: usize,
    /// Sum of all block sizes
    pub total_size: u64,
    /// Cumulative size of free blocks
    pub free_size: u64,
    /// Cumulative size of busy blocks
    pub busy_size: u64,
    /// Largest single block
    pub largest_block: u64,
    /// Number of latency samples
    pub samples: usize,
    /// Sum of all latency samples
    pub total_latency: f64,
    /// Average latency sample, 0 for an empty trace
    pub mean_latency: f64,
}

impl SimulationReport {
    /// Summarize a final table and its trace
    pub fn new(table: &BlockTable, trace: &LatencyTrace) -> Self {
        let counts = table.status_counts();
        let mut free_size = 0;
        let mut busy_size = 0;
        let mut largest_block = 0;

        for block in table.iter() {
            match block.status() {
                Some(BlockStatus::Free) => free_size += block.size(),
                Some(BlockStatus::Busy) => busy_size += block.size(),
                None => {}
            }
            largest_block = largest_block.max(block.size());
        }

        Self {
            block_count: table.len(),
            free_blocks: counts.free,
            busy_blocks: counts.busy,
            pending_blocks: counts.pending,
            total_size: table.total_size(),
            free_size,
            busy_size,
            largest_block,
            samples: trace.len(),
            total_latency: trace.total(),
            mean_latency: trace.mean(),
        }
    }
}
