//! Parameter management types and utilities
//!
//! The live parameter store plus the parameter group definitions this layer
//! consumes (failsafe policy, system bitmasks). Flash persistence of the
//! factory-calibration record is in [`crate::persistent`].

pub mod error;
pub mod failsafe;
pub mod storage;
pub mod system;

pub use error::ParameterError;
pub use failsafe::FailsafeParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
pub use system::SystemParams;
