//! System parameter definitions
//!
//! Bitmask parameters consumed by this layer and its external callers:
//!
//! - `LOG_BITMASK` - logging category selector
//! - `CRASH_DETECT` - crash-detection action bitmask
//! - `FLIGHT_OPTIONS` - vehicle option flags

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::flags::{CrashAction, FlightOptions, LogMask};

/// System bitmask parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct SystemParams {
    /// Logging category selection
    pub log_mask: LogMask,
    /// Crash-detection actions
    pub crash_action: CrashAction,
    /// Vehicle option flags
    pub options: FlightOptions,
}

impl SystemParams {
    /// Register system parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "LOG_BITMASK",
            ParamValue::Int(LogMask::all().bits() as i32),
            ParamFlags::empty(),
        )?;
        store.register("CRASH_DETECT", ParamValue::Int(0), ParamFlags::empty())?;
        store.register("FLIGHT_OPTIONS", ParamValue::Int(0), ParamFlags::empty())?;
        Ok(())
    }

    /// Load system parameters from the store
    ///
    /// Unknown bits set by a newer configuration are dropped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let raw = |name: &str, default: i32| match store.get(name) {
            Some(ParamValue::Int(v)) => *v,
            Some(ParamValue::Float(v)) => *v as i32,
            _ => default,
        };

        Self {
            log_mask: LogMask::from_bits_truncate(
                raw("LOG_BITMASK", LogMask::all().bits() as i32) as u32,
            ),
            crash_action: CrashAction::from_bits_truncate(raw("CRASH_DETECT", 0) as u8),
            options: FlightOptions::from_bits_truncate(raw("FLIGHT_OPTIONS", 0) as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mut store = ParameterStore::new();
        SystemParams::register_defaults(&mut store).unwrap();

        let params = SystemParams::from_store(&store);
        assert!(params.log_mask.should_log(LogMask::GPS));
        assert!(!params.crash_action.contains(CrashAction::DISARM));
        assert!(params.options.is_empty());
    }

    #[test]
    fn test_option_flags_round_trip() {
        let mut store = ParameterStore::new();
        SystemParams::register_defaults(&mut store).unwrap();
        store
            .set("FLIGHT_OPTIONS", ParamValue::Int(1 << 13))
            .unwrap();

        let params = SystemParams::from_store(&store);
        assert!(params
            .options
            .contains(FlightOptions::INDICATE_WAITING_FOR_RUDDER_NEUTRAL));
    }
}
