//! peregrine_core - runtime support and safety layer for a small autopilot
//!
//! This crate sits directly above the RTOS and hardware: it classifies
//! link-loss conditions into failsafe tiers, persists factory calibration
//! parameters across firmware updates, hands out placement-aware memory,
//! and reports boot/fault diagnostics. Flight-mode controllers, sensor
//! drivers and the telemetry codec are external callers.
//!
//! # Design Principles
//!
//! - **Pure no_std**: host-testable without feature flags; `alloc` is used
//!   only for caller-owned report buffers and test mocks
//! - **Trait abstractions**: platform services (flash, TRNG, system
//!   monitor, time) injected via traits with mock implementations
//! - **Capabilities, not cfg**: hardware differences are a
//!   [`platform::HardwareCaps`] descriptor resolved once at startup,
//!   not conditional compilation
//!
//! # Modules
//!
//! - [`traits`]: platform-agnostic trait abstractions (TimeSource)
//! - [`platform`]: platform service traits, errors, capability descriptor, mocks
//! - [`flags`]: logging/option/crash-action bitmasks
//! - [`parameters`]: live parameter store and parameter group definitions
//! - [`failsafe`]: link-loss classifier and escalation policy
//! - [`persistent`]: crash-durable parameter record in the reserved flash region
//! - [`memory`]: typed (placement-aware) memory allocator
//! - [`diagnostics`]: boot/fault diagnosis and on-demand system reports
//! - [`entropy`]: pseudo-random and hardware-backed random bytes

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod diagnostics;
pub mod entropy;
pub mod failsafe;
pub mod flags;
pub mod logging;
pub mod memory;
pub mod parameters;
pub mod persistent;
pub mod platform;
pub mod traits;
