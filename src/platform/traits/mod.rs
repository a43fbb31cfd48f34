//! Platform service trait definitions

pub mod flash;
pub mod monitor;
pub mod trng;
