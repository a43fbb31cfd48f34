//! Boot diagnosis
//!
//! Captured once at startup, before services spin up, and consulted later
//! by arming checks and telemetry. Keeps "this hardware cannot capture a
//! crash dump" distinct from "no crash happened": the two answer different
//! operator questions.

use crate::platform::traits::monitor::{CrashDump, ResetCause, SystemMonitor};
use crate::platform::HardwareCaps;

/// A capability-gated value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature<T> {
    /// The hardware cannot provide this at all
    Unsupported,
    /// Supported, but nothing was captured
    Absent,
    /// Captured value
    Present(T),
}

impl<T> Feature<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Feature::Present(_))
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Feature::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// Why and how the previous run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootDiagnosis {
    pub reset_cause: ResetCause,
    /// True when the previous run was killed by the hardware watchdog
    pub was_watchdog_reset: bool,
    /// Crash dump left by the previous run's fault handler
    pub crash_dump: Feature<CrashDump>,
}

impl BootDiagnosis {
    /// Capture the diagnosis; call once at startup
    pub fn capture(monitor: &impl SystemMonitor, caps: &HardwareCaps) -> Self {
        let reset_cause = monitor.reset_cause();
        let was_watchdog_reset = caps.watchdog && reset_cause == ResetCause::Watchdog;

        let crash_dump = if !caps.crash_dump {
            Feature::Unsupported
        } else {
            match monitor.crash_dump() {
                Some(dump) => Feature::Present(dump),
                None => Feature::Absent,
            }
        };

        if was_watchdog_reset {
            crate::log_warn!("Watchdog reset detected");
        } else {
            crate::log_info!("Boot: {:?} reset", reset_cause);
        }
        if let Feature::Present(dump) = &crash_dump {
            crate::log_warn!("Crash dump from previous run: {} bytes", dump.len);
        }

        Self {
            reset_cause,
            was_watchdog_reset,
            crash_dump,
        }
    }
}
