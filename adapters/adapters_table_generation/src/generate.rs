//! Block Table Generators
//!
//! A generated table has `num_jobs` rows whose addresses lie in
//! `[1, max_memory]` and increase strictly by position. Each block's size is
//! the gap to its successor; the last block draws its size from `[1, 1000)`.
//! Statuses are uniform coin flips, optionally reshaped by a case preset.

use std::collections::BTreeSet;

use entities_block_table::{BlockStatus, BlockTable, MemoryBlock};
use rand::rngs::StdRng;
use rand::Rng;
use usecases_deallocation::{ConfigError, SimulationConfig};

/// Upper bound (exclusive) for the trailing block's random size
const LAST_BLOCK_SIZE_BOUND: u64 = 1000;

/// Status pattern seeded into a dynamic table so the matching policy has
/// something to demonstrate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePreset {
    /// Force the last block free; the adjacent-pair merge then always
    /// converges
    Case1,
    /// Alternate free/busy with both ends free, the hole-coalescing shape
    Case2,
    /// Force the first three blocks busy, a guaranteed triple
    Case3,
}

/// Generate a fixed-partition table: evenly spaced addresses, random statuses
pub fn generate_fixed_table(
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<BlockTable, ConfigError> {
    config.validate()?;
    let addresses = linspace(1, config.max_memory, config.num_jobs);
    Ok(assemble(&addresses, None, rng))
}

/// Generate a dynamic-partition table: distinct sorted random addresses with
/// the preset's status pattern
pub fn generate_dynamic_table(
    config: &SimulationConfig,
    preset: CasePreset,
    rng: &mut StdRng,
) -> Result<BlockTable, ConfigError> {
    config.validate()?;

    // Distinct sampling keeps addresses strictly increasing; the validated
    // config guarantees the range can hold num_jobs of them.
    let mut chosen: BTreeSet<u64> = BTreeSet::new();
    while chosen.len() < config.num_jobs {
        chosen.insert(rng.gen_range(1..=config.max_memory));
    }
    let addresses: Vec<u64> = chosen.into_iter().collect();

    Ok(assemble(&addresses, Some(preset), rng))
}

/// Evenly spaced integer points from `start` to `stop`, inclusive
fn linspace(start: u64, stop: u64, count: usize) -> Vec<u64> {
    let step = (stop - start) as f64 / (count - 1) as f64;
    let mut points: Vec<u64> = (0..count)
        .map(|i| (start as f64 + step * i as f64) as u64)
        .collect();
    // Pin the endpoint; truncation must not round it away.
    if let Some(last) = points.last_mut() {
        *last = stop;
    }
    points
}

/// Build blocks from sorted addresses: coin-flip statuses (reshaped by the
/// preset), gap sizes, random trailing size
fn assemble(addresses: &[u64], preset: Option<CasePreset>, rng: &mut StdRng) -> BlockTable {
    let mut statuses: Vec<BlockStatus> = (0..addresses.len())
        .map(|_| {
            if rng.gen_bool(0.5) {
                BlockStatus::Busy
            } else {
                BlockStatus::Free
            }
        })
        .collect();

    match preset {
        Some(CasePreset::Case1) => {
            if let Some(last) = statuses.last_mut() {
                *last = BlockStatus::Free;
            }
        }
        Some(CasePreset::Case2) => {
            for (position, status) in statuses.iter_mut().enumerate() {
                *status = if position % 2 == 0 {
                    BlockStatus::Free
                } else {
                    BlockStatus::Busy
                };
            }
            if let Some(last) = statuses.last_mut() {
                *last = BlockStatus::Free;
            }
        }
        Some(CasePreset::Case3) => {
            for status in statuses.iter_mut().take(3) {
                *status = BlockStatus::Busy;
            }
        }
        None => {}
    }

    let blocks: Vec<MemoryBlock> = addresses
        .iter()
        .enumerate()
        .map(|(position, &address)| {
            let size = if position + 1 < addresses.len() {
                addresses[position + 1] - address
            } else {
                rng.gen_range(1..LAST_BLOCK_SIZE_BOUND)
            };
            MemoryBlock::new(address, size, statuses[position])
        })
        .collect();

    BlockTable::new(blocks)
}
