//! Failsafe Classifier
//!
//! Pure tick-driven state machine: periodic health samples in, at most a
//! handful of events out. Never blocks; runs on the fixed-rate cooperative
//! tick. Independent timers track radio-link and ground-station loss, and
//! each configured action fires exactly once on tier entry. The
//! "waiting for rudder neutral" warning is the one repeating exception.

use super::policy::{
    FailsafeConfig, FailsafeReason, FailsafeState, FlightMode, GcsFailsafeMode, LongAction,
    ShortAction,
};
use crate::flags::FlightOptions;
use heapless::Vec;

/// Interval at which the rudder-neutral warning repeats while pending
pub const RUDDER_WARN_INTERVAL_MS: u64 = 3000;

/// Maximum events a single tick can produce
pub const MAX_EVENTS_PER_TICK: usize = 4;

/// Periodic link-health sample fed to the classifier
#[derive(Debug, Clone, Copy)]
pub struct HealthSample {
    /// Pilot radio link is present and usable
    pub radio_ok: bool,
    /// A ground-station heartbeat arrived within the expected window
    pub gcs_heartbeat_ok: bool,
    /// Remote signal strength reported as zero by the telemetry radio
    pub gcs_rssi_zero: bool,
    /// Current flight mode
    pub mode: FlightMode,
    /// Arming is waiting for the rudder stick to return to neutral
    pub rudder_neutral_pending: bool,
}

impl HealthSample {
    /// Sample with both links healthy
    pub fn healthy(mode: FlightMode) -> Self {
        Self {
            radio_ok: true,
            gcs_heartbeat_ok: true,
            gcs_rssi_zero: false,
            mode,
            rudder_neutral_pending: false,
        }
    }
}

/// Event dispatched to the flight-mode controller
///
/// An emitted `ShortAction::Disabled` means "hold the current mode": either
/// the operator configured no action, or best-guess resolved to no change
/// because the vehicle is already in a failsafe-equivalent mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailsafeEvent {
    /// SHORT tier entered; fires exactly once per entry
    ShortEntry {
        action: ShortAction,
        reason: FailsafeReason,
    },
    /// LONG (or GCS) tier entered; fires exactly once per entry
    LongEntry {
        action: LongAction,
        reason: FailsafeReason,
    },
    /// All loss conditions cleared; tier returned to NONE
    Recovered {
        from: FailsafeState,
        reason: FailsafeReason,
    },
    /// Repeating reminder that arming still waits for rudder neutral
    RudderNeutralWarning,
}

/// Failsafe classifier and escalation state machine
///
/// Policy is read once at construction and is not hot-reloaded.
pub struct FailsafeClassifier {
    config: FailsafeConfig,
    state: FailsafeState,
    radio_loss_since: Option<u64>,
    gcs_loss_since: Option<u64>,
    /// Cause of the most recent tier entry; retained across recovery
    last_reason: Option<FailsafeReason>,
    short_count: u32,
    long_count: u32,
    last_rudder_warn_ms: Option<u64>,
}

impl FailsafeClassifier {
    /// Create a classifier with a fixed policy
    pub fn new(config: FailsafeConfig) -> Self {
        Self {
            config,
            state: FailsafeState::None,
            radio_loss_since: None,
            gcs_loss_since: None,
            last_reason: None,
            short_count: 0,
            long_count: 0,
            last_rudder_warn_ms: None,
        }
    }

    /// Current failsafe tier
    pub fn state(&self) -> FailsafeState {
        self.state
    }

    /// SHORT tier entries since boot
    pub fn short_count(&self) -> u32 {
        self.short_count
    }

    /// LONG/GCS tier entries since boot
    pub fn long_count(&self) -> u32 {
        self.long_count
    }

    /// Cause of the most recent tier entry, retained after recovery
    pub fn last_reason(&self) -> Option<FailsafeReason> {
        self.last_reason
    }

    /// Process one health sample
    ///
    /// Returns the events to dispatch this tick; empty in the steady state.
    pub fn tick(&mut self, sample: &HealthSample, now_ms: u64) -> Vec<FailsafeEvent, MAX_EVENTS_PER_TICK> {
        let mut events = Vec::new();

        self.update_timers(sample, now_ms);

        let target = self.classify(now_ms);

        match target {
            Some((tier, reason)) if tier.severity() > self.state.severity() => {
                self.enter_tier(tier, reason, sample.mode, &mut events);
            }
            None if self.state != FailsafeState::None => {
                let from = self.state;
                let reason = self.last_reason.unwrap_or(FailsafeReason::RadioLoss);
                self.state = FailsafeState::None;
                self.last_rudder_warn_ms = None;
                crate::log_info!("Failsafe cleared: {:?} (was {:?})", reason, from);
                let _ = events.push(FailsafeEvent::Recovered { from, reason });
            }
            _ => {}
        }

        self.check_rudder_warning(sample, now_ms, &mut events);

        events
    }

    fn update_timers(&mut self, sample: &HealthSample, now_ms: u64) {
        if sample.radio_ok {
            self.radio_loss_since = None;
        } else {
            self.radio_loss_since.get_or_insert(now_ms);
        }

        if self.gcs_loss_active(sample) {
            self.gcs_loss_since.get_or_insert(now_ms);
        } else {
            self.gcs_loss_since = None;
        }
    }

    /// Whether ground-station loss contributes at all under the configured
    /// gating mode.
    fn gcs_loss_active(&self, sample: &HealthSample) -> bool {
        match self.config.gcs_mode {
            GcsFailsafeMode::Off => false,
            GcsFailsafeMode::Heartbeat => !sample.gcs_heartbeat_ok,
            GcsFailsafeMode::HeartbeatRssi => !sample.gcs_heartbeat_ok || sample.gcs_rssi_zero,
            GcsFailsafeMode::HeartbeatAuto => {
                !sample.gcs_heartbeat_ok && sample.mode == FlightMode::Auto
            }
        }
    }

    /// Derive the target tier from the loss timers
    fn classify(&self, now_ms: u64) -> Option<(FailsafeState, FailsafeReason)> {
        let radio_ms = self.radio_loss_since.map(|t| now_ms.saturating_sub(t));
        let gcs_ms = self.gcs_loss_since.map(|t| now_ms.saturating_sub(t));

        let past = |dur: Option<u64>, threshold: u64| dur.is_some_and(|d| d >= threshold);

        if past(radio_ms, self.config.long_timeout_ms) {
            Some((FailsafeState::Long, FailsafeReason::RadioLoss))
        } else if past(gcs_ms, self.config.long_timeout_ms) {
            Some((FailsafeState::Gcs, FailsafeReason::GcsLoss))
        } else if past(radio_ms, self.config.short_timeout_ms) {
            Some((FailsafeState::Short, FailsafeReason::RadioLoss))
        } else if past(gcs_ms, self.config.short_timeout_ms) {
            Some((FailsafeState::Short, FailsafeReason::GcsLoss))
        } else if radio_ms.is_some() || gcs_ms.is_some() {
            // Loss is present but below the short threshold: hold the
            // current tier, do not recover yet.
            Some((self.state, self.last_reason.unwrap_or(FailsafeReason::RadioLoss)))
        } else {
            None
        }
    }

    fn enter_tier(
        &mut self,
        tier: FailsafeState,
        reason: FailsafeReason,
        mode: FlightMode,
        events: &mut Vec<FailsafeEvent, MAX_EVENTS_PER_TICK>,
    ) {
        self.state = tier;
        self.last_reason = Some(reason);

        match tier {
            FailsafeState::Short => {
                self.short_count += 1;
                let action = self.resolve_short_action(mode);
                crate::log_warn!("Failsafe SHORT: {:?} -> {:?}", reason, action);
                let _ = events.push(FailsafeEvent::ShortEntry { action, reason });
            }
            FailsafeState::Long | FailsafeState::Gcs => {
                self.long_count += 1;
                let action = self.config.long_action;
                crate::log_warn!("Failsafe LONG: {:?} -> {:?}", reason, action);
                let _ = events.push(FailsafeEvent::LongEntry { action, reason });
            }
            FailsafeState::None => {}
        }
    }

    /// Resolve best-guess at fire time: no change when the vehicle is
    /// already in a failsafe-equivalent mode, Circle otherwise.
    fn resolve_short_action(&self, mode: FlightMode) -> ShortAction {
        match self.config.short_action {
            ShortAction::BestGuess if mode.is_failsafe_equivalent() => ShortAction::Disabled,
            ShortAction::BestGuess => ShortAction::Circle,
            action => action,
        }
    }

    fn check_rudder_warning(
        &mut self,
        sample: &HealthSample,
        now_ms: u64,
        events: &mut Vec<FailsafeEvent, MAX_EVENTS_PER_TICK>,
    ) {
        let enabled = self
            .config
            .options
            .contains(FlightOptions::INDICATE_WAITING_FOR_RUDDER_NEUTRAL);

        if !enabled || !sample.rudder_neutral_pending || self.state == FailsafeState::None {
            self.last_rudder_warn_ms = None;
            return;
        }

        let due = match self.last_rudder_warn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= RUDDER_WARN_INTERVAL_MS,
        };
        if due {
            self.last_rudder_warn_ms = Some(now_ms);
            crate::log_warn!("Waiting for rudder neutral");
            let _ = events.push(FailsafeEvent::RudderNeutralWarning);
        }
    }
}
