//! Use Cases Layer: Partition Deallocation
//!
//! Deallocation and coalescing policies for the partition simulator. This
//! crate is the simulation engine: it scans an ordered block table, frees
//! busy blocks, merges adjacent free regions under the selected policy, and
//! produces a per-operation latency trace.
//!
//! ## Overview
//!
//! The engine accepts a [`BlockTable`](entities_block_table::BlockTable)
//! built by the generation adapter, mutates it in place through exactly one
//! policy, and returns the observed latencies. It renders nothing and reads
//! no input itself; the front end owns all of that.
//!
//! ## Policies
//!
//! - **[`fixed`]**: fixed partitions. Every busy block is freed in a single
//!   pass, boundaries never move.
//! - **[`case1`]**: iterative adjacent-pair merge. A freed block absorbs an
//!   already-free right neighbor, repeated to a fixed point.
//! - **[`case2`]**: three-way hole coalescing. A busy block between two free
//!   neighbors folds into the left one, leaving a pending placeholder.
//! - **[`case3`]**: triple-busy detection. A busy block between busy
//!   neighbors becomes a placeholder whose release waits on an explicit
//!   confirmation from the caller.
//!
//! ## Time model
//!
//! Every structural event costs `size * alpha / 1000 + beta` synthetic time
//! units ([`latency`]). Durations are accumulated into the trace, never
//! slept: no observable ordering depends on wall-clock delay.

pub mod case1;
pub mod case2;
pub mod case3;
pub mod config;
pub mod deallocator;
pub mod fixed;
pub mod latency;

pub use case1::Case1Coalescer;
pub use case2::Case2Coalescer;
pub use case3::Case3Coalescer;
pub use config::SimulationConfig;
pub use deallocator::{ConfigError, DeallocationOutcome, DeallocationStrategy, PartitionScheme};
pub use fixed::FixedDeallocator;
pub use latency::{LatencyModel, LatencyTrace};
