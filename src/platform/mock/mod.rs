//! Mock platform implementations for host testing

pub mod flash;
pub mod monitor;
pub mod trng;

pub use flash::MockFlash;
pub use monitor::MockMonitor;
pub use trng::MockTrng;
