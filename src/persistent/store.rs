//! Persistent parameter store
//!
//! Owns the reserved flash region and the loaded record. A record that fails
//! any validation step is treated as absent, never as an error: boot
//! continues with factory defaults either way. Save ordering is payload
//! first, header last, so a write torn by power loss can never validate on
//! the next boot.

use super::record::{
    PersistentRecord, RecordHeader, HEADER_LEN, PAYLOAD_MAX, PERSISTENT_REGION_SIZE,
};
use crate::parameters::ParameterStore;
use crate::platform::{FlashInterface, HardwareCaps, PlatformError, Result};

/// Default base address of the reserved region; must be block-aligned and
/// outside the firmware image
pub const PERSISTENT_REGION_BASE: u32 = 0xF000;

/// Result of a load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A validated record is available
    Valid,
    /// No usable record: never written, corrupt, torn, or unsupported
    Absent,
}

/// Persistent parameter store bound to a flash device
pub struct PersistentStore<F: FlashInterface> {
    flash: F,
    caps: HardwareCaps,
    region_base: u32,
    record: Option<PersistentRecord>,
    loaded: bool,
}

impl<F: FlashInterface> PersistentStore<F> {
    pub fn new(flash: F, caps: HardwareCaps, region_base: u32) -> Self {
        Self {
            flash,
            caps,
            region_base,
            record: None,
            loaded: false,
        }
    }

    /// Read and validate the record from flash
    ///
    /// Call once during boot, before parameter application. Safe to call
    /// again; the region is simply re-read.
    pub fn load(&mut self) -> LoadOutcome {
        self.loaded = true;
        self.record = self.read_record();
        match self.record {
            Some(_) => LoadOutcome::Valid,
            None => LoadOutcome::Absent,
        }
    }

    fn read_record(&mut self) -> Option<PersistentRecord> {
        if !self.caps.persistent_params {
            return None;
        }

        let mut header_bytes = [0u8; HEADER_LEN];
        if self.flash.read(self.region_base, &mut header_bytes).is_err() {
            crate::log_warn!("Persistent region unreadable");
            return None;
        }

        let header = RecordHeader::from_bytes(&header_bytes);
        if !header.is_plausible() {
            return None;
        }

        let mut payload = [0u8; PAYLOAD_MAX];
        let payload = &mut payload[..header.length as usize];
        if self
            .flash
            .read(self.region_base + HEADER_LEN as u32, payload)
            .is_err()
        {
            crate::log_warn!("Persistent payload unreadable");
            return None;
        }

        if super::crc::crc32(payload) != header.crc {
            crate::log_warn!("Persistent record CRC mismatch, ignoring");
            return None;
        }

        PersistentRecord::from_payload(payload)
    }

    /// Write a record to flash, replacing any previous one
    ///
    /// Erases the region, writes the payload, then commits the header with
    /// its CRC. Blocking; boot or disarmed contexts only.
    pub fn save(&mut self, record: &PersistentRecord) -> Result<()> {
        if !self.caps.persistent_params {
            return Err(PlatformError::Unsupported("persistent params"));
        }

        self.flash
            .erase(self.region_base, PERSISTENT_REGION_SIZE as u32)?;
        self.flash
            .write(self.region_base + HEADER_LEN as u32, record.payload())?;

        let header = RecordHeader::for_payload(record.payload());
        self.flash.write(self.region_base, &header.to_bytes())?;

        self.record = Some(record.clone());
        self.loaded = true;
        crate::log_info!("Persistent record saved ({} bytes)", record.payload().len());
        Ok(())
    }

    /// Look up one field's value text without schema knowledge
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.record.as_ref()?.get(name)
    }

    /// Push every loaded field into `store` as a default
    ///
    /// Values the user has explicitly set are left alone. Returns the number
    /// of fields applied.
    pub fn apply(&self, store: &mut ParameterStore) -> usize {
        let Some(record) = &self.record else {
            return 0;
        };

        let mut applied = 0;
        for (name, text) in record.fields() {
            let Some(value) = super::record::parse_value(text) else {
                crate::log_warn!("Persistent field {} unparseable", name);
                continue;
            };
            if store.set_default(name, value).is_ok() {
                applied += 1;
            }
        }
        crate::log_info!("Applied {} persistent parameters", applied);
        applied
    }

    /// Whether load() has run
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The validated record, if one is present
    pub fn record(&self) -> Option<&PersistentRecord> {
        self.record.as_ref()
    }

    /// Give the flash device back, e.g. to hand it to another service
    pub fn into_flash(self) -> F {
        self.flash
    }
}
