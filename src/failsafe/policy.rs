//! Failsafe policy types
//!
//! Tier, action and gating enumerations plus the policy configuration
//! fixed at classifier init. Selector values match the parameter encoding
//! (`FS_SHORT_ACTN`, `FS_LONG_ACTN`, `FS_GCS_ENABL`).

use crate::flags::FlightOptions;
use crate::parameters::FailsafeParams;

/// Failsafe severity tier
///
/// Mutated only by the classifier; read by the flight-mode controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailsafeState {
    /// No loss condition active
    None = 0,
    /// Loss past the short threshold
    Short = 1,
    /// Loss past the long threshold
    Long = 2,
    /// Ground-station loss past the long threshold
    Gcs = 3,
}

impl FailsafeState {
    /// Severity for monotonic-escalation comparisons
    ///
    /// GCS is a long-tier state, not a higher tier of its own.
    pub fn severity(&self) -> u8 {
        match self {
            FailsafeState::None => 0,
            FailsafeState::Short => 1,
            FailsafeState::Long | FailsafeState::Gcs => 2,
        }
    }
}

/// Action on entering the SHORT tier (FS_SHORT_ACTN)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShortAction {
    /// Circle, or no change if already in a failsafe-equivalent mode
    BestGuess = 0,
    Circle = 1,
    Fbwa = 2,
    /// Explicitly configured no-action; the tier still enters and is logged
    Disabled = 3,
    Fbwb = 4,
}

impl ShortAction {
    /// Decode the parameter value; unknown selectors fall back to BestGuess
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ShortAction::Circle,
            2 => ShortAction::Fbwa,
            3 => ShortAction::Disabled,
            4 => ShortAction::Fbwb,
            _ => ShortAction::BestGuess,
        }
    }
}

/// Action on entering the LONG tier (FS_LONG_ACTN)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LongAction {
    /// Continue the current mission; an explicit no-action policy
    Continue = 0,
    Rtl = 1,
    Glide = 2,
    Parachute = 3,
    Auto = 4,
    AutoLand = 5,
}

impl LongAction {
    /// Decode the parameter value; unknown selectors fall back to Continue
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LongAction::Rtl,
            2 => LongAction::Glide,
            3 => LongAction::Parachute,
            4 => LongAction::Auto,
            5 => LongAction::AutoLand,
            _ => LongAction::Continue,
        }
    }
}

/// Ground-station failsafe gating (FS_GCS_ENABL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcsFailsafeMode {
    /// GCS loss never contributes
    Off = 0,
    /// Failsafe when heartbeats stop
    Heartbeat = 1,
    /// Failsafe when heartbeats stop or remote signal strength drops to zero
    HeartbeatRssi = 2,
    /// Failsafe when heartbeats stop, but only while in AUTO mode
    HeartbeatAuto = 3,
}

impl GcsFailsafeMode {
    /// Decode the parameter value; unknown selectors fall back to Off
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => GcsFailsafeMode::Heartbeat,
            2 => GcsFailsafeMode::HeartbeatRssi,
            3 => GcsFailsafeMode::HeartbeatAuto,
            _ => GcsFailsafeMode::Off,
        }
    }
}

/// Cause of a tier entry or recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailsafeReason {
    /// Pilot radio link lost
    RadioLoss,
    /// Ground-station heartbeat/signal lost
    GcsLoss,
}

/// Current flight mode, as reported by the external mode controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    Manual,
    Stabilize,
    Fbwa,
    Fbwb,
    Cruise,
    Circle,
    Auto,
    Rtl,
    Loiter,
    Guided,
}

impl FlightMode {
    /// Modes that already behave like a failsafe response; the best-guess
    /// short action leaves them alone instead of forcing a mode change.
    pub fn is_failsafe_equivalent(&self) -> bool {
        matches!(
            self,
            FlightMode::Auto | FlightMode::Guided | FlightMode::Loiter
        )
    }
}

/// Classifier policy, fixed at init and not hot-reloaded mid-failsafe
#[derive(Debug, Clone, Copy)]
pub struct FailsafeConfig {
    pub short_action: ShortAction,
    pub long_action: LongAction,
    pub gcs_mode: GcsFailsafeMode,
    /// Milliseconds of sustained loss before the SHORT tier
    pub short_timeout_ms: u64,
    /// Milliseconds of sustained loss before the LONG tier
    pub long_timeout_ms: u64,
    /// Vehicle option flags (rudder-neutral warning gate)
    pub options: FlightOptions,
}

impl FailsafeConfig {
    /// Build the policy from the failsafe parameter group
    pub fn from_params(params: &FailsafeParams, options: FlightOptions) -> Self {
        Self {
            short_action: ShortAction::from_u8(params.short_action),
            long_action: LongAction::from_u8(params.long_action),
            gcs_mode: GcsFailsafeMode::from_u8(params.gcs_enable),
            short_timeout_ms: (params.short_timeout * 1000.0) as u64,
            long_timeout_ms: (params.long_timeout * 1000.0) as u64,
            options,
        }
    }
}

impl Default for FailsafeConfig {
    fn default() -> Self {
        Self {
            short_action: ShortAction::BestGuess,
            long_action: LongAction::Continue,
            gcs_mode: GcsFailsafeMode::Heartbeat,
            short_timeout_ms: 1500,
            long_timeout_ms: 5000,
            options: FlightOptions::empty(),
        }
    }
}
