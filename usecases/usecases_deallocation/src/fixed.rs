//! Fixed-Partition Deallocator
//!
//! Fixed partitions keep their original boundaries forever; deallocation only
//! changes occupancy. One pass over the table frees every busy block and
//! prices each release by its size. The block count never changes.

use entities_block_table::BlockTable;
use tracing::debug;

use crate::deallocator::{DeallocationOutcome, DeallocationStrategy};
use crate::latency::{LatencyModel, LatencyTrace};

/// Single-pass free operation, no merging
pub struct FixedDeallocator;

impl FixedDeallocator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixedDeallocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeallocationStrategy for FixedDeallocator {
    fn run(&self, table: &mut BlockTable, latency: &LatencyModel) -> DeallocationOutcome {
        let mut trace = LatencyTrace::new();
        let mut freed = 0;

        for position in 0..table.len() {
            if table[position].is_busy() {
                let cost = latency.latency(table[position].size());
                debug!(
                    address = ?table[position].address(),
                    size = table[position].size(),
                    cost,
                    "deallocating fixed partition"
                );
                trace.push(cost);
                table[position].free();
                freed += 1;
            }
        }

        debug!(freed, "fixed-partition deallocation finished");
        DeallocationOutcome {
            trace,
            blocks_deallocated: freed,
        }
    }
}
