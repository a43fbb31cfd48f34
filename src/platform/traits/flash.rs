//! Flash interface trait
//!
//! Flash access used for the persistent parameter record. The reserved
//! region sits outside the zone erased by ordinary firmware updates.
//!
//! # Flash Characteristics
//!
//! - Organized in blocks (typically 4 KB); erase sets all bytes to 0xFF
//! - Writes can only clear bits 1→0; the target must be erased first
//! - Erase/write are blocking and can take 100 ms+; callers must confine
//!   them to non-time-critical windows (boot, disarmed), never an interrupt
//!   handler or the failsafe tick

use crate::platform::Result;

/// Flash interface trait
///
/// Platform implementations provide read/write/erase over the raw device.
/// Implementations must reject addresses inside the firmware region.
pub trait FlashInterface {
    /// Read `buf.len()` bytes from `address`.
    ///
    /// # Errors
    ///
    /// `FlashError::InvalidAddress` if out of bounds,
    /// `FlashError::ReadFailed` if the device read fails.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`. The region must be erased first.
    ///
    /// # Errors
    ///
    /// `FlashError::InvalidAddress` if the target is protected,
    /// `FlashError::WriteFailed` if the device write fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`.
    ///
    /// Both must be aligned to [`block_size`](Self::block_size).
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size in bytes.
    fn block_size(&self) -> u32;

    /// Total flash capacity in bytes.
    fn capacity(&self) -> u32;
}
