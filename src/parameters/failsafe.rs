//! Failsafe Parameter Definitions
//!
//! Failsafe policy parameters, read once at classifier init:
//!
//! - `FS_SHORT_ACTN` - action on short link loss
//! - `FS_LONG_ACTN` - action on long link loss
//! - `FS_SHORT_TIMEOUT` - seconds of loss before the SHORT tier (default 1.5)
//! - `FS_LONG_TIMEOUT` - seconds of loss before the LONG tier (default 5)
//! - `FS_GCS_ENABL` - ground-station failsafe mode (off / heartbeat /
//!   heartbeat+signal / heartbeat-in-auto-only)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Failsafe parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct FailsafeParams {
    /// Short-loss action selector (see `failsafe::policy::ShortAction`)
    pub short_action: u8,
    /// Long-loss action selector (see `failsafe::policy::LongAction`)
    pub long_action: u8,
    /// Seconds of sustained loss before the SHORT tier
    pub short_timeout: f32,
    /// Seconds of sustained loss before the LONG tier
    pub long_timeout: f32,
    /// GCS failsafe mode selector (see `failsafe::policy::GcsFailsafeMode`)
    pub gcs_enable: u8,
}

impl FailsafeParams {
    /// Register failsafe parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("FS_SHORT_ACTN", ParamValue::Int(0), ParamFlags::empty())?;
        store.register("FS_LONG_ACTN", ParamValue::Int(0), ParamFlags::empty())?;
        store.register(
            "FS_SHORT_TIMEOUT",
            ParamValue::Float(1.5),
            ParamFlags::empty(),
        )?;
        store.register(
            "FS_LONG_TIMEOUT",
            ParamValue::Float(5.0),
            ParamFlags::empty(),
        )?;
        store.register("FS_GCS_ENABL", ParamValue::Int(1), ParamFlags::empty())?;
        Ok(())
    }

    /// Load failsafe parameters from the store, falling back to defaults
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            short_action: int_or(store, "FS_SHORT_ACTN", 0) as u8,
            long_action: int_or(store, "FS_LONG_ACTN", 0) as u8,
            short_timeout: float_or(store, "FS_SHORT_TIMEOUT", 1.5),
            long_timeout: float_or(store, "FS_LONG_TIMEOUT", 5.0),
            gcs_enable: int_or(store, "FS_GCS_ENABL", 1) as u8,
        }
    }

    /// Check if the timeout configuration is sane
    pub fn is_configured(&self) -> bool {
        self.short_timeout > 0.0 && self.long_timeout >= self.short_timeout
    }
}

fn int_or(store: &ParameterStore, name: &str, default: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => *v,
        Some(ParamValue::Float(v)) => *v as i32,
        _ => default,
    }
}

fn float_or(store: &ParameterStore, name: &str, default: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) => *v,
        Some(ParamValue::Int(v)) => *v as f32,
        _ => default,
    }
}
