//! Failsafe classifier and escalation policy
//!
//! Monitors radio-link and ground-station health, classifies sustained loss
//! into severity tiers and dispatches the configured recovery action to the
//! flight-mode controller: once per tier entry, never repeatedly while a
//! tier is held.

pub mod classifier;
pub mod policy;

pub use classifier::{FailsafeClassifier, FailsafeEvent, HealthSample};
pub use policy::{
    FailsafeConfig, FailsafeReason, FailsafeState, FlightMode, GcsFailsafeMode, LongAction,
    ShortAction,
};
