//! Hardware capability descriptor
//!
//! Replaces scattered conditional compilation: the platform resolves its
//! capabilities once at startup and passes the descriptor into each service.
//! A missing capability makes the corresponding operation report
//! "unsupported" (or "absent" where the data is optional), never an error.

/// Capabilities of the current hardware target, resolved at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareCaps {
    /// Reserved flash region for persistent parameters exists
    pub persistent_params: bool,
    /// A fault handler captures crash dumps that survive until next reboot
    pub crash_dump: bool,
    /// Hardware true-random number generator present
    pub true_rng: bool,
    /// Hardware watchdog present (boot reason detection meaningful)
    pub watchdog: bool,
}

impl HardwareCaps {
    /// Descriptor for a fully featured target.
    pub const fn full() -> Self {
        Self {
            persistent_params: true,
            crash_dump: true,
            true_rng: true,
            watchdog: true,
        }
    }

    /// Descriptor for a minimal target with none of the optional features.
    pub const fn none() -> Self {
        Self {
            persistent_params: false,
            crash_dump: false,
            true_rng: false,
            watchdog: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_presets() {
        assert!(HardwareCaps::full().persistent_params);
        assert!(HardwareCaps::full().crash_dump);
        assert!(!HardwareCaps::none().true_rng);
        assert!(!HardwareCaps::none().watchdog);
    }
}
