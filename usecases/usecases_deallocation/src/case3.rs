//! Dynamic Coalescing, Case 3: Triple-Busy Detection with Confirmation
//!
//! Three consecutive busy blocks are a structurally dangerous pattern:
//! releasing the middle one requires both neighbors to release in step. The
//! policy runs in phases. Detection converts each matched middle block into a
//! pending placeholder, pricing it by its pre-conversion size and
//! snapshotting the table first. The actual release is gated on a boolean
//! confirmation supplied by the caller up front; the engine never prompts.
//! When confirmed, each placeholder's neighbors are released, its address and
//! size come back from the snapshot, and it is freed; every resolution counts
//! three deallocated blocks. Declined, the table is returned with its pending
//! markers intact.
//!
//! The per-neighbor release delay is a fixed bookkeeping cost; only the
//! detection samples enter the returned trace. No rows are ever removed, so
//! snapshot positions stay aligned with the live table.

use entities_block_table::BlockTable;
use tracing::debug;

use crate::deallocator::{DeallocationOutcome, DeallocationStrategy};
use crate::latency::{LatencyModel, LatencyTrace};

/// Triple-busy detection policy
pub struct Case3Coalescer {
    /// Caller's decision for the confirmation gate
    confirm: bool,
    /// Fixed delay charged per neighbor release during resolution
    freeing_latency: f64,
}

impl Case3Coalescer {
    /// Default neighbor-release delay
    pub const DEFAULT_FREEING_LATENCY: f64 = 2.0;

    /// Create the policy with the caller's confirmation decision
    pub fn new(confirm: bool, freeing_latency: f64) -> Self {
        Self {
            confirm,
            freeing_latency,
        }
    }

    /// Detection pass: convert every triple-busy middle block into a pending
    /// placeholder, pricing each by its pre-conversion size
    fn detect(
        &self,
        table: &mut BlockTable,
        latency: &LatencyModel,
        trace: &mut LatencyTrace,
    ) {
        for i in 1..table.len().saturating_sub(2) {
            if table[i - 1].is_busy() && table[i].is_busy() && table[i + 1].is_busy() {
                let cost = latency.latency(table[i].size());
                debug!(
                    address = ?table[i].address(),
                    left = ?table[i - 1].address(),
                    right = ?table[i + 1].address(),
                    cost,
                    "found busy block with two busy neighbors"
                );
                trace.push(cost);
                table[i].clear_to_placeholder();
            }
        }
    }

    /// Resolution pass: release both neighbors of every placeholder, then
    /// reinstate the placeholder from the snapshot and free it
    fn resolve(&self, table: &mut BlockTable, snapshot: &BlockTable) -> usize {
        let mut deallocated = 0;

        for i in 1..table.len().saturating_sub(2) {
            if table[i].is_pending() {
                table[i - 1].free();
                debug!(
                    address = ?table[i - 1].address(),
                    delay = self.freeing_latency,
                    "left neighbor released"
                );
                table[i + 1].free();
                debug!(
                    address = ?table[i + 1].address(),
                    delay = self.freeing_latency,
                    "right neighbor released"
                );

                let original = &snapshot[i];
                table[i].restore(original.address(), original.size());
                debug!(
                    address = ?table[i].address(),
                    size = table[i].size(),
                    "placeholder reinstated and freed"
                );
                deallocated += 3;
            }
        }

        deallocated
    }
}

impl DeallocationStrategy for Case3Coalescer {
    fn run(&self, table: &mut BlockTable, latency: &LatencyModel) -> DeallocationOutcome {
        let snapshot = table.clone();
        let mut trace = LatencyTrace::new();

        self.detect(table, latency, &mut trace);

        let blocks_deallocated = if self.confirm {
            self.resolve(table, &snapshot)
        } else {
            debug!("confirmation declined, pending blocks left in place");
            0
        };

        debug!(
            deallocated = blocks_deallocated,
            "triple-busy resolution finished"
        );
        DeallocationOutcome {
            trace,
            blocks_deallocated,
        }
    }
}
