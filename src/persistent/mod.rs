//! Persistent Parameter Storage
//!
//! A small record of calibration and bookkeeping values that survives
//! firmware updates, kept in a reserved flash region the updater never
//! touches. Loaded once at boot and applied to the parameter store as
//! defaults; explicit user settings always win.

pub mod crc;
pub mod record;
pub mod store;

pub use record::{PersistentRecord, RecordHeader};
pub use store::{LoadOutcome, PersistentStore, PERSISTENT_REGION_BASE};
