//! Dynamic Coalescing, Case 2: Three-Way Hole Coalescing
//!
//! A busy block sitting between two free neighbors is released and the whole
//! Free-Busy-Free window folds into the left neighbor. The middle row stays
//! behind as a pending placeholder recording the absorbed hole; the right row
//! is dropped. One forward pass, scanned with a two-block margin at the far
//! end of the table; the first and last blocks are never the middle of a
//! window.
//!
//! With cleanup requested, pending placeholders are deleted outright after
//! the pass; they carry no size once their hole has been absorbed.

use entities_block_table::BlockTable;
use tracing::debug;

use crate::deallocator::{DeallocationOutcome, DeallocationStrategy};
use crate::latency::{LatencyModel, LatencyTrace};

/// Three-way hole coalescing policy
pub struct Case2Coalescer {
    /// Delete pending placeholder rows after the pass
    remove_null: bool,
}

impl Case2Coalescer {
    /// Create the policy; `remove_null` finalizes merged holes by deleting
    /// their placeholder rows
    pub fn new(remove_null: bool) -> Self {
        Self { remove_null }
    }
}

impl DeallocationStrategy for Case2Coalescer {
    fn run(&self, table: &mut BlockTable, latency: &LatencyModel) -> DeallocationOutcome {
        let initial_len = table.len();
        let mut trace = LatencyTrace::new();
        let mut rows_to_drop = Vec::new();

        for i in 1..table.len().saturating_sub(2) {
            if table[i].is_busy() && table[i + 1].is_free() && table[i - 1].is_free() {
                let cost = latency.latency(table[i].size());
                debug!(
                    left = ?table[i - 1].address(),
                    middle = ?table[i].address(),
                    right = ?table[i + 1].address(),
                    cost,
                    "joining free-busy-free window"
                );
                table[i].free();

                // Fold the freed block and its right neighbor into the left one.
                let middle_size = table[i].size();
                table[i - 1].absorb(middle_size);
                let right_size = table[i + 1].size();
                table[i - 1].absorb(right_size);

                rows_to_drop.push(i + 1);
                table[i].clear_to_placeholder();
                // Marking the doomed row busy keeps the next window from
                // folding this hole a second time; the status dies with the
                // row at compaction.
                table[i + 1].set_busy();

                trace.push(2.0 * cost);
            }
        }

        table.drop_rows(&rows_to_drop);

        if self.remove_null {
            let removed = table.drop_pending();
            debug!(removed, "removed null entries");
        }

        debug!(
            deallocated = initial_len - table.len(),
            "hole coalescing finished"
        );
        DeallocationOutcome {
            trace,
            blocks_deallocated: initial_len - table.len(),
        }
    }
}
