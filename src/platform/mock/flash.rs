//! Mock flash implementation for testing
//!
//! In-memory flash simulation with real NOR semantics (erase to 0xFF,
//! writes only clear bits), plus fault injection: corruption, erase count
//! tracking for wear monitoring, and simulated power loss mid-write.

use crate::platform::{error::FlashError, traits::flash::FlashInterface, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Flash capacity (64 KB is plenty for the reserved-region tests)
const FLASH_CAPACITY: u32 = 64 * 1024;

/// Firmware region (protected, first 32 KB)
const FIRMWARE_SIZE: u32 = 0x8000;

/// Mock flash device
///
/// # Example
///
/// ```
/// use peregrine_core::platform::mock::MockFlash;
/// use peregrine_core::platform::FlashInterface;
///
/// let mut flash = MockFlash::new();
/// flash.erase(0xF000, 4096).unwrap();
/// flash.write(0xF000, &[0x50, 0x50, 0x52, 0x4D]).unwrap();
///
/// let mut buf = [0u8; 4];
/// flash.read(0xF000, &mut buf).unwrap();
/// assert_eq!(&buf, b"PPRM");
/// ```
#[derive(Debug)]
pub struct MockFlash {
    /// Flash contents, initialized to the erased state (0xFF)
    storage: Vec<u8>,
    /// Erase count per block, for wear monitoring tests
    erase_counts: Vec<u32>,
    /// When set, the next write commits only this many bytes then fails
    power_loss_after: Option<usize>,
    /// When set, the next write fails without committing anything
    fail_next_write: bool,
}

impl MockFlash {
    /// Create a new mock flash in the fully erased state
    pub fn new() -> Self {
        Self {
            storage: vec![0xFF; FLASH_CAPACITY as usize],
            erase_counts: vec![0; (FLASH_CAPACITY / BLOCK_SIZE) as usize],
            power_loss_after: None,
            fail_next_write: false,
        }
    }

    /// Get flash contents for test verification
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        self.storage[address as usize..address as usize + len].to_vec()
    }

    /// Overwrite a range with a corrupt pattern, bypassing NOR semantics
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        for byte in &mut self.storage[address as usize..address as usize + len] {
            *byte = 0xAA;
        }
    }

    /// Number of times the block containing `address` has been erased
    pub fn erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Fail the next write call without committing any bytes
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// Simulate power loss during the next write: only the first
    /// `committed_bytes` land, then the write reports failure.
    pub fn power_loss_after(&mut self, committed_bytes: usize) {
        self.power_loss_after = Some(committed_bytes);
    }

    fn check_writable(&self, address: u32, len: usize) -> Result<()> {
        if address < FIRMWARE_SIZE || address as usize + len > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let start = address as usize;
        let end = start + buf.len();
        if end > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }
        buf.copy_from_slice(&self.storage[start..end]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.check_writable(address, data.len())?;

        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(FlashError::WriteFailed.into());
        }

        let commit = match self.power_loss_after.take() {
            Some(n) => n.min(data.len()),
            None => data.len(),
        };

        for (i, &byte) in data[..commit].iter().enumerate() {
            // NOR flash: writes can only clear bits
            self.storage[address as usize + i] &= byte;
        }

        if commit < data.len() {
            return Err(FlashError::WriteFailed.into());
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if address % BLOCK_SIZE != 0 || size % BLOCK_SIZE != 0 {
            return Err(FlashError::InvalidAddress.into());
        }
        self.check_writable(address, size as usize)?;

        for byte in &mut self.storage[address as usize..(address + size) as usize] {
            *byte = 0xFF;
        }
        for block in address / BLOCK_SIZE..(address + size) / BLOCK_SIZE {
            self.erase_counts[block as usize] += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}
