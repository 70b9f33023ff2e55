//! Block Table
//!
//! Ordered, position-indexed sequence of memory blocks. Insertion order
//! equals address order at creation time and is preserved across merges:
//! removal always compacts the survivors without reordering them.
//!
//! Deallocation policies mark rows for removal while scanning against the
//! pass-start indices, then drop the marked rows in one step. The table
//! never reindexes behind the caller's back mid-scan.

use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::block::{BlockStatus, MemoryBlock};

/// Per-status row counts for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Rows with a free status
    pub free: usize,
    /// Rows with a busy status
    pub busy: usize,
    /// Unresolved placeholder rows
    pub pending: usize,
}

/// Ordered sequence of memory blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTable {
    blocks: Vec<MemoryBlock>,
}

impl BlockTable {
    /// Create a table from blocks already in address order
    pub fn new(blocks: Vec<MemoryBlock>) -> Self {
        Self { blocks }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Row at `position`, if in range
    pub fn get(&self, position: usize) -> Option<&MemoryBlock> {
        self.blocks.get(position)
    }

    /// Mutable row at `position`, if in range
    pub fn get_mut(&mut self, position: usize) -> Option<&mut MemoryBlock> {
        self.blocks.get_mut(position)
    }

    /// All rows in table order
    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Iterator over rows in table order
    pub fn iter(&self) -> std::slice::Iter<'_, MemoryBlock> {
        self.blocks.iter()
    }

    /// Sum of all block sizes
    ///
    /// Invariant under every merge operation: merging only reassigns size to
    /// a surviving block and removes zero-size rows.
    pub fn total_size(&self) -> u64 {
        self.blocks.iter().map(MemoryBlock::size).sum()
    }

    /// True if non-placeholder addresses are strictly increasing by position
    pub fn is_address_ordered(&self) -> bool {
        let mut previous: Option<u64> = None;
        for block in &self.blocks {
            if let Some(address) = block.address() {
                if let Some(prev) = previous {
                    if address <= prev {
                        return false;
                    }
                }
                previous = Some(address);
            }
        }
        true
    }

    /// True if every row carries the same status
    ///
    /// The terminal condition of the iterative adjacent-pair merge: the loop
    /// stops once all remaining blocks are free (or all busy). Empty and
    /// single-row tables are trivially uniform.
    pub fn has_uniform_status(&self) -> bool {
        match self.blocks.first() {
            None => true,
            Some(first) => {
                let status = first.status();
                self.blocks.iter().all(|b| b.status() == status)
            }
        }
    }

    /// Row counts per status
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for block in &self.blocks {
            match block.status() {
                Some(BlockStatus::Free) => counts.free += 1,
                Some(BlockStatus::Busy) => counts.busy += 1,
                None => counts.pending += 1,
            }
        }
        counts
    }

    /// Remove the rows at the given positions and compact
    ///
    /// Positions refer to the table as it was when they were recorded;
    /// survivors keep their relative order. Out-of-range or duplicate
    /// positions are ignored.
    pub fn drop_rows(&mut self, positions: &[usize]) {
        if positions.is_empty() {
            return;
        }
        let marked: BTreeSet<usize> = positions.iter().copied().collect();
        let blocks = std::mem::take(&mut self.blocks);
        self.blocks = blocks
            .into_iter()
            .enumerate()
            .filter(|(position, _)| !marked.contains(position))
            .map(|(_, block)| block)
            .collect();
    }

    /// Remove every unresolved placeholder row, returning how many were cut
    ///
    /// After this the remaining statuses are all concrete free/busy values.
    pub fn drop_pending(&mut self) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|block| !block.is_pending());
        before - self.blocks.len()
    }
}

impl Index<usize> for BlockTable {
    type Output = MemoryBlock;

    fn index(&self, position: usize) -> &MemoryBlock {
        &self.blocks[position]
    }
}

impl IndexMut<usize> for BlockTable {
    fn index_mut(&mut self, position: usize) -> &mut MemoryBlock {
        &mut self.blocks[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(u64, u64, BlockStatus)]) -> BlockTable {
        BlockTable::new(
            rows.iter()
                .map(|&(address, size, status)| MemoryBlock::new(address, size, status))
                .collect(),
        )
    }

    #[test]
    fn test_total_size() {
        let t = table(&[
            (1, 10, BlockStatus::Busy),
            (11, 5, BlockStatus::Free),
            (16, 20, BlockStatus::Busy),
        ]);
        assert_eq!(t.total_size(), 35);
    }

    #[test]
    fn test_address_ordering() {
        let t = table(&[(1, 4, BlockStatus::Free), (5, 4, BlockStatus::Busy)]);
        assert!(t.is_address_ordered());

        let unordered = table(&[(5, 4, BlockStatus::Free), (1, 4, BlockStatus::Busy)]);
        assert!(!unordered.is_address_ordered());
    }

    #[test]
    fn test_address_ordering_skips_placeholders() {
        let mut t = table(&[
            (1, 4, BlockStatus::Free),
            (5, 4, BlockStatus::Busy),
            (9, 4, BlockStatus::Free),
        ]);
        t[1].clear_to_placeholder();
        assert!(t.is_address_ordered());
    }

    #[test]
    fn test_uniform_status() {
        let mixed = table(&[(1, 4, BlockStatus::Free), (5, 4, BlockStatus::Busy)]);
        assert!(!mixed.has_uniform_status());

        let uniform = table(&[(1, 4, BlockStatus::Free), (5, 4, BlockStatus::Free)]);
        assert!(uniform.has_uniform_status());

        assert!(BlockTable::new(Vec::new()).has_uniform_status());
    }

    #[test]
    fn test_uniform_status_counts_pending_as_distinct() {
        let mut t = table(&[(1, 4, BlockStatus::Free), (5, 4, BlockStatus::Free)]);
        t[1].clear_to_placeholder();
        assert!(!t.has_uniform_status());
    }

    #[test]
    fn test_drop_rows_compacts_in_order() {
        let mut t = table(&[
            (1, 4, BlockStatus::Free),
            (5, 4, BlockStatus::Busy),
            (9, 4, BlockStatus::Free),
            (13, 4, BlockStatus::Busy),
        ]);
        t.drop_rows(&[1, 3]);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].address(), Some(1));
        assert_eq!(t[1].address(), Some(9));
        assert!(t.is_address_ordered());
    }

    #[test]
    fn test_drop_rows_ignores_out_of_range() {
        let mut t = table(&[(1, 4, BlockStatus::Free)]);
        t.drop_rows(&[7]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_drop_pending() {
        let mut t = table(&[
            (1, 4, BlockStatus::Free),
            (5, 4, BlockStatus::Busy),
            (9, 4, BlockStatus::Free),
        ]);
        t[1].clear_to_placeholder();
        let removed = t.drop_pending();
        assert_eq!(removed, 1);
        assert_eq!(t.len(), 2);
        assert_eq!(t.status_counts().pending, 0);
    }

    #[test]
    fn test_status_counts() {
        let mut t = table(&[
            (1, 4, BlockStatus::Free),
            (5, 4, BlockStatus::Busy),
            (9, 4, BlockStatus::Busy),
        ]);
        t[2].clear_to_placeholder();
        let counts = t.status_counts();
        assert_eq!(counts.free, 1);
        assert_eq!(counts.busy, 1);
        assert_eq!(counts.pending, 1);
    }
}
