//! Platform error types
//!
//! Error taxonomy for platform services. Expected conditions (link loss,
//! absent persistent data) are not errors and never appear here; an
//! unsupported hardware feature is reported distinctly from a failure.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid configuration provided
    InvalidConfig,
    /// Resource not available
    ResourceUnavailable,
    /// Feature not present on this hardware target
    Unsupported(&'static str),
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds or in a protected region)
    InvalidAddress,
    /// Flash controller is busy
    Busy,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Flash(e) => write!(f, "Flash error: {:?}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
            PlatformError::ResourceUnavailable => write!(f, "Resource not available"),
            PlatformError::Unsupported(feature) => {
                write!(f, "Feature not supported on this hardware: {}", feature)
            }
        }
    }
}

impl From<FlashError> for PlatformError {
    fn from(error: FlashError) -> Self {
        PlatformError::Flash(error)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn test_flash_error_conversion() {
        let err: PlatformError = FlashError::WriteFailed.into();
        assert_eq!(err, PlatformError::Flash(FlashError::WriteFailed));
    }

    #[test]
    fn test_unsupported_is_distinct_from_failure() {
        let unsupported = PlatformError::Unsupported("crash dump");
        let failed = PlatformError::Flash(FlashError::ReadFailed);
        assert_ne!(unsupported, failed);
        assert_eq!(
            format!("{}", unsupported),
            "Feature not supported on this hardware: crash dump"
        );
    }
}
