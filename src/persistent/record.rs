//! Persistent record format
//!
//! The record survives firmware updates in a reserved flash region. Layout:
//!
//! ```text
//! +0   magic   u32 LE  "PPRM"
//! +4   version u16 LE
//! +6   length  u16 LE  payload bytes
//! +8   crc     u32 LE  CRC-32 over the payload
//! +12  payload         "NAME=VALUE\n" text lines
//! ```
//!
//! The payload is plain text so a field can be looked up by name without
//! schema knowledge, and so a record written by older firmware stays
//! readable field-by-field.

use crate::parameters::{ParamValue, ParameterStore};
use core::fmt::Write;
use heapless::String;

/// Record magic, "PPRM" as little-endian bytes
pub const RECORD_MAGIC: u32 = u32::from_le_bytes(*b"PPRM");

/// Record format version
pub const RECORD_VERSION: u16 = 1;

/// Header size in bytes
pub const HEADER_LEN: usize = 12;

/// Maximum payload size
pub const PAYLOAD_MAX: usize = 2048;

/// Size of the reserved flash region
pub const PERSISTENT_REGION_SIZE: usize = 4096;

// Header and payload must fit the reserved region
const _: () = assert!(HEADER_LEN + PAYLOAD_MAX <= PERSISTENT_REGION_SIZE);

/// Record header, stored little-endian at the start of the region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub magic: u32,
    pub version: u16,
    pub length: u16,
    pub crc: u32,
}

impl RecordHeader {
    /// Header for a payload, with CRC computed
    pub fn for_payload(payload: &[u8]) -> Self {
        Self {
            magic: RECORD_MAGIC,
            version: RECORD_VERSION,
            length: payload.len() as u16,
            crc: super::crc::crc32(payload),
        }
    }

    /// Serialize to the on-flash layout
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.length.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.crc.to_le_bytes());
        bytes
    }

    /// Deserialize from the on-flash layout
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        Self {
            magic: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            version: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
            length: u16::from_le_bytes(bytes[6..8].try_into().unwrap()),
            crc: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
        }
    }

    /// Basic shape checks, before the CRC is verified against the payload
    pub fn is_plausible(&self) -> bool {
        self.magic == RECORD_MAGIC
            && self.version == RECORD_VERSION
            && (self.length as usize) <= PAYLOAD_MAX
    }
}

/// A persistent record's payload: bounded "NAME=VALUE\n" text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentRecord {
    payload: String<PAYLOAD_MAX>,
}

impl PersistentRecord {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding every parameter in `store`
    pub fn from_store(store: &ParameterStore) -> Option<Self> {
        let mut record = Self::new();
        for (name, value) in store.iter() {
            record.push_field(name, value).ok()?;
        }
        Some(record)
    }

    /// Parse a payload read back from flash. None on malformed UTF-8 or
    /// oversized input.
    pub fn from_payload(bytes: &[u8]) -> Option<Self> {
        let text = core::str::from_utf8(bytes).ok()?;
        let mut payload = String::new();
        payload.push_str(text).ok()?;
        Some(Self { payload })
    }

    /// Append one field. Fails when the payload is full, leaving the
    /// record unchanged: a field lands complete or not at all, so a
    /// truncated value can never be persisted as valid.
    pub fn push_field(&mut self, name: &str, value: &ParamValue) -> Result<(), core::fmt::Error> {
        let committed = self.payload.len();
        let result = match value {
            ParamValue::Bool(v) => writeln!(self.payload, "{}={}", name, *v as u8),
            ParamValue::Int(v) => writeln!(self.payload, "{}={}", name, v),
            // {:?} keeps a decimal point on whole floats, preserving the
            // type across a round trip
            ParamValue::Float(v) => writeln!(self.payload, "{}={:?}", name, v),
        };
        if result.is_err() {
            self.payload.truncate(committed);
        }
        result
    }

    /// Payload bytes as written to flash
    pub fn payload(&self) -> &[u8] {
        self.payload.as_bytes()
    }

    /// Iterate fields as (name, value-text) pairs, skipping malformed lines
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.payload
            .lines()
            .filter_map(|line| line.split_once('='))
    }

    /// Look up a field's value text by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Parse a field's value text back into a typed value
pub fn parse_value(text: &str) -> Option<ParamValue> {
    if let Ok(v) = text.parse::<i32>() {
        return Some(ParamValue::Int(v));
    }
    text.parse::<f32>().ok().map(ParamValue::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = RecordHeader::for_payload(b"GYR_CAL_TEMP=23.5\n");
        let restored = RecordHeader::from_bytes(&header.to_bytes());
        assert_eq!(header, restored);
        assert!(restored.is_plausible());
    }

    #[test]
    fn test_header_magic_bytes() {
        let header = RecordHeader::for_payload(b"");
        assert_eq!(&header.to_bytes()[0..4], b"PPRM");
    }

    #[test]
    fn test_bad_magic_not_plausible() {
        let mut header = RecordHeader::for_payload(b"X=1\n");
        header.magic = 0xFFFF_FFFF;
        assert!(!header.is_plausible());
    }

    #[test]
    fn test_oversized_length_not_plausible() {
        let mut header = RecordHeader::for_payload(b"X=1\n");
        header.length = (PAYLOAD_MAX + 1) as u16;
        assert!(!header.is_plausible());
    }

    #[test]
    fn test_push_and_get_fields() {
        let mut record = PersistentRecord::new();
        record.push_field("GYR_OFS_X", &ParamValue::Float(0.25)).unwrap();
        record.push_field("INS_CAL_DONE", &ParamValue::Bool(true)).unwrap();

        assert_eq!(record.get("GYR_OFS_X"), Some("0.25"));
        assert_eq!(record.get("INS_CAL_DONE"), Some("1"));
        assert_eq!(record.get("MISSING"), None);
    }

    #[test]
    fn test_whole_float_keeps_decimal_point() {
        let mut record = PersistentRecord::new();
        record.push_field("FS_LONG_TIMEOUT", &ParamValue::Float(5.0)).unwrap();
        assert_eq!(record.get("FS_LONG_TIMEOUT"), Some("5.0"));
        assert_eq!(parse_value("5.0"), Some(ParamValue::Float(5.0)));
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("42"), Some(ParamValue::Int(42)));
        assert_eq!(parse_value("-1.5"), Some(ParamValue::Float(-1.5)));
        assert_eq!(parse_value("junk"), None);
    }

    #[test]
    fn test_from_payload_rejects_bad_utf8() {
        assert_eq!(PersistentRecord::from_payload(&[0xFF, 0xFE]), None);
    }

    #[test]
    fn test_payload_full() {
        let mut record = PersistentRecord::new();
        loop {
            if record.push_field("PADDING_NAME", &ParamValue::Int(123456)).is_err() {
                break;
            }
        }
        assert!(record.payload().len() <= PAYLOAD_MAX);
    }

    #[test]
    fn test_failed_push_leaves_only_complete_lines() {
        let mut record = PersistentRecord::new();
        while record
            .push_field("GYR_OFS_LONGNAME", &ParamValue::Float(0.125))
            .is_ok()
        {}

        // The rejected field must not leave a truncated trailing line
        assert!(record.payload().ends_with(b"\n"));
        let text = core::str::from_utf8(record.payload()).unwrap();
        assert!(text.lines().all(|line| line == "GYR_OFS_LONGNAME=0.125"));
        assert_eq!(record.fields().count(), text.lines().count());
        assert_eq!(record.get("GYR_OFS_LONGNAME"), Some("0.125"));

        // A full record stays usable and rejects further pushes cleanly
        let len = record.payload().len();
        assert!(record.push_field("ANOTHER", &ParamValue::Int(1)).is_err());
        assert_eq!(record.payload().len(), len);
    }
}
