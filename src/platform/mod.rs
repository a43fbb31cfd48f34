//! Platform abstraction layer
//!
//! Service traits the runtime-support layer needs from the hardware
//! (flash, hardware RNG, system monitor), the error taxonomy for those
//! services, and the capability descriptor resolved once at startup.
//!
//! Mock implementations for host testing live in [`mock`].

pub mod caps;
pub mod error;
pub mod mock;
pub mod traits;

pub use caps::HardwareCaps;
pub use error::{FlashError, PlatformError, Result};
pub use traits::flash::FlashInterface;
pub use traits::monitor::{
    CrashDump, DmaChannelStats, HeapStats, ResetCause, SystemMonitor, TaskStackInfo, TimerStats,
    UartStats,
};
pub use traits::trng::TrngInterface;
