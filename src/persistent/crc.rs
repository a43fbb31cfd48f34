//! Record checksum
//!
//! CRC-32 (ISO HDLC) over the record payload. The polynomial matters less
//! than detecting torn writes and bit rot; this one has hardware support on
//! the usual MCU targets.

use crc::{Crc, CRC_32_ISO_HDLC};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 checksum of `data`
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        // Standard check value for CRC-32/ISO-HDLC
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_detects_single_bit_flip() {
        let clean = crc32(b"FS_LONG_TIMEOUT=5\n");
        let flipped = crc32(b"FS_LONG_TIMEOUT=4\n");
        assert_ne!(clean, flipped);
    }
}
