//! Command-Line Argument Parsing Module
//!
//! Provides argument parsing for the simulator binary.
//! Uses clap for type-safe argument parsing.

use clap::{Parser, ValueEnum};
use usecases_deallocation::{PartitionScheme, SimulationConfig};

/// Partition scheme selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    /// Fixed partitions, no merging
    #[value(name = "fixed")]
    Fixed,
    /// Dynamic partitions, iterative adjacent-pair merge
    #[value(name = "case1")]
    Case1,
    /// Dynamic partitions, three-way hole coalescing
    #[value(name = "case2")]
    Case2,
    /// Dynamic partitions, triple-busy detection with confirmation
    #[value(name = "case3")]
    Case3,
}

/// Deallocation simulator command-line arguments
#[derive(Parser, Debug)]
#[command(name = "memsim")]
#[command(about = "Memory partition deallocation simulator")]
pub struct SimulatorArgs {
    /// Partition scheme to simulate
    #[arg(long, value_enum, default_value = "fixed")]
    pub scheme: SchemeArg,

    /// Number of initial blocks
    #[arg(long, default_value_t = 30)]
    pub num_jobs: usize,

    /// Upper bound for synthesized addresses
    #[arg(long, default_value_t = 15_000)]
    pub max_memory: u64,

    /// Latency slope coefficient
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Latency base cost
    #[arg(long, default_value_t = 1.5)]
    pub beta: f64,

    /// Seed for the table generator; omit for a fresh table every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Case 1: run exactly one pass instead of iterating to the fixed point
    #[arg(long)]
    pub one_iter: bool,

    /// Case 2: delete pending placeholder rows after the pass
    #[arg(long)]
    pub remove_null: bool,

    /// Case 3: confirm the release of pending blocks
    #[arg(long)]
    pub confirm: bool,

    /// Case 3: fixed delay per neighbor release
    #[arg(long)]
    pub freeing_latency: Option<f64>,

    /// Emit the final table, trace, and report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimulatorArgs {
    /// Validate flag combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.one_iter && self.scheme != SchemeArg::Case1 {
            return Err("--one-iter only applies to --scheme case1".to_string());
        }
        if self.remove_null && self.scheme != SchemeArg::Case2 {
            return Err("--remove-null only applies to --scheme case2".to_string());
        }
        if self.confirm && self.scheme != SchemeArg::Case3 {
            return Err("--confirm only applies to --scheme case3".to_string());
        }
        if let Some(freeing_latency) = self.freeing_latency {
            if self.scheme != SchemeArg::Case3 {
                return Err("--freeing-latency only applies to --scheme case3".to_string());
            }
            if freeing_latency <= 0.0 {
                return Err("--freeing-latency must be positive".to_string());
            }
        }
        Ok(())
    }

    /// Engine-facing scheme selection
    pub fn scheme(&self) -> PartitionScheme {
        match self.scheme {
            SchemeArg::Fixed => PartitionScheme::Fixed,
            SchemeArg::Case1 => PartitionScheme::DynamicCase1,
            SchemeArg::Case2 => PartitionScheme::DynamicCase2,
            SchemeArg::Case3 => PartitionScheme::DynamicCase3,
        }
    }

    /// Engine-facing simulation configuration
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            num_jobs: self.num_jobs,
            max_memory: self.max_memory,
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}
