//! Text Rendering Module
//!
//! Formats block tables and run summaries for the terminal. Placeholder
//! addresses render as `*` and pending statuses as `-`, matching how the
//! table reads while a coalescing policy is mid-lifecycle.

use adapters_statistics::SimulationReport;
use entities_block_table::{BlockStatus, BlockTable, MemoryBlock};

fn address_cell(block: &MemoryBlock) -> String {
    match block.address() {
        Some(address) => address.to_string(),
        None => "*".to_string(),
    }
}

fn status_cell(block: &MemoryBlock) -> &'static str {
    match block.status() {
        Some(BlockStatus::Free) => "Free",
        Some(BlockStatus::Busy) => "Busy",
        None => "-",
    }
}

/// Render a table as aligned text columns
pub fn render_table(table: &BlockTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8}  {:>10}  {:>10}  {:>8}\n",
        "Position", "Address", "Size", "Status"
    ));
    for (position, block) in table.iter().enumerate() {
        out.push_str(&format!(
            "{:>8}  {:>10}  {:>10}  {:>8}\n",
            position,
            address_cell(block),
            block.size(),
            status_cell(block)
        ));
    }
    out
}

/// Render the run summary
pub fn render_report(report: &SimulationReport, blocks_deallocated: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total memory deallocated: {}\n", blocks_deallocated));
    out.push_str(&format!(
        "Blocks: {} ({} free, {} busy, {} pending)\n",
        report.block_count, report.free_blocks, report.busy_blocks, report.pending_blocks
    ));
    out.push_str(&format!(
        "Sizes: {} total ({} free, {} busy), largest {}\n",
        report.total_size, report.free_size, report.busy_size, report.largest_block
    ));
    out.push_str(&format!(
        "Latency: {} events, total {:.4}, average {:.4}\n",
        report.samples, report.total_latency, report.mean_latency
    ));
    out
}
