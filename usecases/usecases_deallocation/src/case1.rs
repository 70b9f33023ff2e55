//! Dynamic Coalescing, Case 1: Iterative Adjacent-Pair Merge
//!
//! A busy block whose right neighbor is already free is released and absorbs
//! that neighbor, and the pair's cost is doubled to account for the wait
//! before the merge. Passes repeat until every remaining block shares one
//! status, or until a pass performs no merge, whichever comes first. A pass
//! scans against its start-of-pass indices; merged-away rows are dropped only
//! after the scan.
//!
//! Each merging pass strictly reduces the block count, so the loop finishes
//! in at most n-1 passes over any table.

use entities_block_table::BlockTable;
use tracing::debug;

use crate::deallocator::{DeallocationOutcome, DeallocationStrategy};
use crate::latency::{LatencyModel, LatencyTrace};

/// Iterative adjacent-pair merge policy
pub struct Case1Coalescer {
    /// Execute exactly one pass instead of iterating to the fixed point
    one_iter: bool,
}

impl Case1Coalescer {
    /// Create the policy; `one_iter` limits the run to a single pass for
    /// step-by-step inspection
    pub fn new(one_iter: bool) -> Self {
        Self { one_iter }
    }

    /// Run one scan-and-merge pass, returning the marked row positions
    fn merge_pass(
        &self,
        table: &mut BlockTable,
        latency: &LatencyModel,
        trace: &mut LatencyTrace,
    ) -> Vec<usize> {
        let mut rows_to_drop = Vec::new();

        for i in 0..table.len().saturating_sub(1) {
            if table[i].is_busy() && table[i + 1].is_free() {
                let cost = latency.latency(table[i].size());
                debug!(
                    address = ?table[i].address(),
                    cost,
                    "waiting for busy block to release"
                );
                table[i].free();
                let absorbed = table[i + 1].size();
                table[i].absorb(absorbed);
                debug!(
                    left = ?table[i].address(),
                    right = ?table[i + 1].address(),
                    merged_size = table[i].size(),
                    "joined adjacent blocks"
                );
                rows_to_drop.push(i + 1);
                trace.push(2.0 * cost);
            }
        }

        rows_to_drop
    }
}

impl DeallocationStrategy for Case1Coalescer {
    fn run(&self, table: &mut BlockTable, latency: &LatencyModel) -> DeallocationOutcome {
        let initial_len = table.len();
        let mut trace = LatencyTrace::new();
        let mut pass = 0;

        while !table.has_uniform_status() {
            pass += 1;
            debug!(pass, blocks = table.len(), "starting coalescing pass");

            let rows_to_drop = self.merge_pass(table, latency, &mut trace);
            let merged = !rows_to_drop.is_empty();
            table.drop_rows(&rows_to_drop);

            // A pass with no merge is a fixed point even when statuses stay
            // mixed; without this the loop would never leave e.g. [Free, Busy].
            if self.one_iter || !merged {
                break;
            }
        }

        debug!(
            passes = pass,
            deallocated = initial_len - table.len(),
            "adjacent-pair coalescing finished"
        );
        DeallocationOutcome {
            trace,
            blocks_deallocated: initial_len - table.len(),
        }
    }
}
