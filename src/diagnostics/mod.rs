//! Boot and Fault Diagnostics
//!
//! Two halves: a boot diagnosis captured once at startup (reset cause,
//! watchdog detection, crash dump from the previous run), and on-demand
//! text reports over live system snapshots. Diagnostics never block boot;
//! a platform that cannot answer reports the feature unsupported.

pub mod boot;
pub mod buffer;
pub mod stats;

pub use boot::{BootDiagnosis, Feature};
pub use buffer::ExpandingString;
pub use stats::{dma_report, mem_report, thread_report, timer_report, uart_report};
