//! Adapters Layer: Simulation Statistics
//!
//! Numeric summaries of a finished run: the latency totals and the status and
//! size distributions of the final table. The report is plain data for a
//! front end to format; no rendering happens here.

pub mod report;

pub use report::SimulationReport;
