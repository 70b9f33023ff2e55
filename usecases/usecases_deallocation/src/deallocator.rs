//! Deallocation Strategy Trait and Types
//!
//! Defines the strategy interface shared by the fixed-partition deallocator
//! and the three dynamic coalescing policies, the scheme selector, and the
//! configuration error taxonomy.
//!
//! ## Overview
//!
//! Every policy implements [`DeallocationStrategy`]: it takes exclusive
//! ownership of a block table for the duration of one call, mutates it in
//! place, and returns a [`DeallocationOutcome`] holding the latency trace and
//! the number of blocks deallocated. A caller picks exactly one policy per
//! table via [`PartitionScheme`].
//!
//! Configuration problems surface before any mutation begins; a table handed
//! to a policy with an invalid configuration is left exactly as received.
//! Pending placeholders left behind by case 2 without cleanup, or by case 3
//! when confirmation is declined, are an expected terminal state, not an
//! error.

use entities_block_table::BlockTable;
use thiserror::Error;

use crate::latency::{LatencyModel, LatencyTrace};

/// Partition management scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionScheme {
    /// Fixed partitions: free busy blocks, never merge
    Fixed,
    /// Dynamic partitions, iterative adjacent-pair merge
    DynamicCase1,
    /// Dynamic partitions, three-way hole coalescing with placeholder
    DynamicCase2,
    /// Dynamic partitions, triple-busy detection with confirmation
    DynamicCase3,
}

impl PartitionScheme {
    /// Human-readable scheme name
    pub fn name(self) -> &'static str {
        match self {
            PartitionScheme::Fixed => "fixed",
            PartitionScheme::DynamicCase1 => "dynamic case 1",
            PartitionScheme::DynamicCase2 => "dynamic case 2",
            PartitionScheme::DynamicCase3 => "dynamic case 3",
        }
    }
}

/// Configuration errors, raised before any table mutation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Too few jobs to build a meaningful table
    #[error("at least {min} jobs are required, got {num_jobs}")]
    TooFewJobs { num_jobs: usize, min: usize },

    /// A latency coefficient is negative
    #[error("latency coefficient {name} must be non-negative, got {value}")]
    NegativeCoefficient { name: &'static str, value: f64 },

    /// The address space cannot hold the requested number of distinct addresses
    #[error("max memory {max_memory} cannot place {num_jobs} distinct addresses")]
    AddressSpaceTooSmall { max_memory: u64, num_jobs: usize },
}

/// Result of one policy run over a table
#[derive(Debug, Clone, PartialEq)]
pub struct DeallocationOutcome {
    /// Synthetic time cost of each structural event, in event order
    pub trace: LatencyTrace,
    /// Blocks deallocated, as the policy counts them: freed rows for the
    /// fixed scheme, merged-away rows for cases 1 and 2, and three per
    /// resolved placeholder for case 3
    pub blocks_deallocated: usize,
}

/// Deallocation strategy interface
///
/// A strategy runs to completion synchronously and mutates the table it is
/// given; the table is exclusively owned by the call. Running a policy twice
/// over the same table is permitted but models two separate simulation steps.
pub trait DeallocationStrategy {
    /// Run the policy over `table`, pricing events with `latency`
    fn run(&self, table: &mut BlockTable, latency: &LatencyModel) -> DeallocationOutcome;
}
