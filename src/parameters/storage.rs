//! Parameter Storage Types
//!
//! The live parameter store consumed by all subsystems. Values set through
//! normal storage (GCS, calibration flows) are tracked with a MODIFIED flag
//! so persistent-record fields can be applied as defaults only: an
//! explicitly set value always takes precedence.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is read-only (cannot be modified at runtime)
        const READ_ONLY = 0b00000001;
        /// Parameter has been explicitly set (not at its registered default)
        const MODIFIED = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Value coerced to f32, the common currency of calibration data
    pub fn as_f32(&self) -> f32 {
        match self {
            ParamValue::Bool(v) => *v as u8 as f32,
            ParamValue::Int(v) => *v as f32,
            ParamValue::Float(v) => *v,
        }
    }
}

/// Parameter store for configuration management
///
/// Bounded key-value map with per-parameter flags. Registration installs
/// defaults idempotently; `set` marks a parameter MODIFIED so later default
/// application (from the persistent record) cannot override it.
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    flags: FnvIndexMap<String<PARAM_NAME_LEN>, ParamFlags, MAX_PARAMS>,
    /// Dirty flag (needs flash write by the parameter saver)
    dirty: bool,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            flags: FnvIndexMap::new(),
            dirty: false,
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
        let mut key = String::new();
        key.push_str(name)
            .map_err(|_| ParameterError::InvalidConfig)?;
        Ok(key)
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Set parameter value explicitly
    ///
    /// Marks the parameter MODIFIED and the store dirty.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::InvalidConfig);
        }
        if let Some(flags) = self.flags.get(&key) {
            if flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters.insert(key.clone(), value).ok();
        if let Some(flags) = self.flags.get_mut(&key) {
            flags.insert(ParamFlags::MODIFIED);
        }
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.flags
            .insert(key, flags)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Install a default value, yielding to any explicitly set value
    ///
    /// This is the application path for persistent-record fields: if the
    /// parameter was set through normal storage (MODIFIED) the stored value
    /// wins and the default is dropped. Unknown parameters are registered.
    pub fn set_default(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        match self.flags.get(&key) {
            Some(flags) if flags.contains(ParamFlags::MODIFIED) => Ok(()),
            Some(_) => {
                self.parameters.insert(key, value).ok();
                Ok(())
            }
            None => self.register(name, value, ParamFlags::empty()),
        }
    }

    /// Check whether a parameter has been explicitly set
    pub fn is_modified(&self, name: &str) -> bool {
        Self::key(name)
            .ok()
            .and_then(|key| self.flags.get(&key))
            .is_some_and(|flags| flags.contains(ParamFlags::MODIFIED))
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over all parameters as (name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String<PARAM_NAME_LEN>, &ParamValue)> {
        self.parameters.iter()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear dirty flag (called after a successful flash save)
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(42)));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_marks_modified_and_dirty() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();

        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
        assert!(store.is_modified("TEST"));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_set_unknown_rejected() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_register_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_read_only_rejected() {
        let mut store = ParameterStore::new();
        store
            .register("LOCKED", ParamValue::Int(1), ParamFlags::READ_ONLY)
            .unwrap();
        assert_eq!(
            store.set("LOCKED", ParamValue::Int(2)),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_set_default_yields_to_explicit_set() {
        let mut store = ParameterStore::new();
        store
            .register("GYR_OFS_X", ParamValue::Float(0.0), ParamFlags::empty())
            .unwrap();
        store.set("GYR_OFS_X", ParamValue::Float(0.5)).unwrap();

        store.set_default("GYR_OFS_X", ParamValue::Float(0.2)).unwrap();
        assert_eq!(store.get("GYR_OFS_X"), Some(&ParamValue::Float(0.5)));
    }

    #[test]
    fn test_set_default_overrides_registered_default() {
        let mut store = ParameterStore::new();
        store
            .register("GYR_OFS_X", ParamValue::Float(0.0), ParamFlags::empty())
            .unwrap();

        store.set_default("GYR_OFS_X", ParamValue::Float(0.2)).unwrap();
        assert_eq!(store.get("GYR_OFS_X"), Some(&ParamValue::Float(0.2)));
        assert!(!store.is_modified("GYR_OFS_X"));
    }

    #[test]
    fn test_set_default_registers_unknown() {
        let mut store = ParameterStore::new();
        store.set_default("NEW", ParamValue::Float(1.5)).unwrap();
        assert_eq!(store.get("NEW"), Some(&ParamValue::Float(1.5)));
    }

    #[test]
    fn test_param_value_as_f32() {
        assert_eq!(ParamValue::Bool(true).as_f32(), 1.0);
        assert_eq!(ParamValue::Int(-3).as_f32(), -3.0);
        assert_eq!(ParamValue::Float(2.5).as_f32(), 2.5);
    }
}
