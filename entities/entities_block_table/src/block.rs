//! Memory Block
//!
//! A single row of the block table: an address, a size, and a job status.
//! The status is nullable: `None` marks an unresolved placeholder left
//! behind by a coalescing policy, never a committed third occupancy state.

use serde::{Deserialize, Serialize};

/// Occupancy of a memory block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    /// Block holds no job and may be coalesced
    Free,
    /// Block is occupied by a job
    Busy,
}

/// One row of the block table
///
/// The address is `None` for a placeholder block (rendered as `*`), and the
/// status is `None` while a placeholder awaits confirmation or cleanup. All
/// mutation goes through the methods below so that size conservation and
/// address ordering stay checkable at the table level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Start address, or `None` for a placeholder
    address: Option<u64>,
    /// Size of the region; a placeholder has size 0
    size: u64,
    /// Occupancy, or `None` while the block is an unresolved placeholder
    status: Option<BlockStatus>,
}

impl MemoryBlock {
    /// Create a block with a concrete address and status
    pub fn new(address: u64, size: u64, status: BlockStatus) -> Self {
        Self {
            address: Some(address),
            size,
            status: Some(status),
        }
    }

    /// Start address, or `None` for a placeholder
    pub fn address(&self) -> Option<u64> {
        self.address
    }

    /// Size of the region
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Occupancy, or `None` for an unresolved placeholder
    pub fn status(&self) -> Option<BlockStatus> {
        self.status
    }

    /// True if the block is occupied by a job
    pub fn is_busy(&self) -> bool {
        self.status == Some(BlockStatus::Busy)
    }

    /// True if the block is free
    pub fn is_free(&self) -> bool {
        self.status == Some(BlockStatus::Free)
    }

    /// True if the block is an unresolved placeholder
    pub fn is_pending(&self) -> bool {
        self.status.is_none()
    }

    /// Release the block's job
    pub fn free(&mut self) {
        self.status = Some(BlockStatus::Free);
    }

    /// Mark the block occupied
    pub fn set_busy(&mut self) {
        self.status = Some(BlockStatus::Busy);
    }

    /// Grow this block by the size of an absorbed neighbor
    ///
    /// The neighbor's row must be removed (or zeroed) by the caller in the
    /// same operation, otherwise the table's total size would change.
    pub fn absorb(&mut self, extra: u64) {
        self.size += extra;
    }

    /// Turn the block into an unresolved placeholder
    ///
    /// Address and status are cleared and the size drops to 0; the absorbed
    /// size must already have been folded into a surviving neighbor.
    pub fn clear_to_placeholder(&mut self) {
        self.address = None;
        self.size = 0;
        self.status = None;
    }

    /// Reinstate a placeholder from its snapshotted identity and free it
    pub fn restore(&mut self, address: Option<u64>, size: u64) {
        self.address = address;
        self.size = size;
        self.status = Some(BlockStatus::Free);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block() {
        let block = MemoryBlock::new(100, 50, BlockStatus::Busy);
        assert_eq!(block.address(), Some(100));
        assert_eq!(block.size(), 50);
        assert!(block.is_busy());
        assert!(!block.is_free());
        assert!(!block.is_pending());
    }

    #[test]
    fn test_free_and_set_busy() {
        let mut block = MemoryBlock::new(1, 10, BlockStatus::Busy);
        block.free();
        assert!(block.is_free());
        block.set_busy();
        assert!(block.is_busy());
    }

    #[test]
    fn test_absorb() {
        let mut block = MemoryBlock::new(1, 10, BlockStatus::Free);
        block.absorb(5);
        assert_eq!(block.size(), 15);
    }

    #[test]
    fn test_clear_to_placeholder() {
        let mut block = MemoryBlock::new(1, 10, BlockStatus::Busy);
        block.clear_to_placeholder();
        assert_eq!(block.address(), None);
        assert_eq!(block.size(), 0);
        assert!(block.is_pending());
        assert!(!block.is_busy());
        assert!(!block.is_free());
    }

    #[test]
    fn test_restore_frees_block() {
        let mut block = MemoryBlock::new(1, 10, BlockStatus::Busy);
        block.clear_to_placeholder();
        block.restore(Some(1), 10);
        assert_eq!(block.address(), Some(1));
        assert_eq!(block.size(), 10);
        assert!(block.is_free());
    }
}
