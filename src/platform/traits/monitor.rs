//! System monitor trait
//!
//! Read-only view of RTOS and peripheral state used by boot diagnosis and
//! the on-demand diagnostic reports. Snapshots are best-effort: they are
//! taken concurrently with normal operation and need no strict atomicity.

use heapless::Vec;

/// Maximum tasks reported in a stack snapshot
pub const MAX_TASKS: usize = 16;
/// Maximum DMA streams reported
pub const MAX_DMA_STREAMS: usize = 16;
/// Maximum UART ports reported
pub const MAX_UARTS: usize = 8;
/// Maximum hardware timers reported
pub const MAX_TIMERS: usize = 16;

/// Cause of the most recent reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause {
    /// Normal power-on reset
    PowerOn,
    /// Software-requested reset (reboot command, firmware update)
    Software,
    /// Hardware watchdog fired because the main loop stopped reporting
    Watchdog,
}

/// Crash dump captured by a prior fault handler
///
/// The memory is read-only and valid until the next reboot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashDump {
    /// Start of the dump region
    pub ptr: *const u8,
    /// Dump size in bytes
    pub len: usize,
}

/// Per-task stack usage snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStackInfo {
    /// Task name
    pub name: &'static str,
    /// Total stack size in bytes
    pub stack_total: u32,
    /// Minimum free stack ever observed (high-water mark)
    pub stack_free_min: u32,
}

/// Heap usage snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    /// Total heap size in bytes
    pub total: u32,
    /// Currently free bytes
    pub free: u32,
    /// Largest contiguous free block (fragmentation indicator)
    pub largest_free: u32,
}

/// Per-stream DMA contention counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaChannelStats {
    /// Stream identifier (controller.stream)
    pub stream: &'static str,
    /// Completed transfers
    pub transfers: u32,
    /// Times a peripheral had to wait for the stream
    pub contended: u32,
}

/// Per-port UART throughput and error counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartStats {
    /// Port name
    pub name: &'static str,
    /// Bytes transmitted since the previous snapshot
    pub tx_bytes: u32,
    /// Bytes received since the previous snapshot
    pub rx_bytes: u32,
    /// Receive overruns
    pub rx_overruns: u32,
    /// Framing errors
    pub framing_errors: u32,
}

/// Hardware timer allocation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerStats {
    /// Timer peripheral number
    pub timer: u8,
    /// Subsystem the timer is allocated to, or "free"
    pub owner: &'static str,
    /// Channels in use
    pub channels_used: u8,
}

/// Read-only system state provider
///
/// Implemented by the platform over its RTOS introspection hooks; the mock
/// implementation returns configurable snapshots for host tests.
pub trait SystemMonitor {
    /// Cause of the most recent reset.
    fn reset_cause(&self) -> ResetCause;

    /// Crash dump captured by a prior fault handler, if one exists.
    ///
    /// Returns `None` when no fault occurred since the region was cleared.
    /// Targets without the capability never get asked (see
    /// [`crate::platform::HardwareCaps::crash_dump`]).
    fn crash_dump(&self) -> Option<CrashDump>;

    /// Per-task stack high-water marks.
    fn task_stacks(&self) -> Vec<TaskStackInfo, MAX_TASKS>;

    /// Heap usage snapshot.
    fn heap_stats(&self) -> HeapStats;

    /// Per-stream DMA contention counters.
    fn dma_stats(&self) -> Vec<DmaChannelStats, MAX_DMA_STREAMS>;

    /// Per-port UART counters since the previous snapshot.
    fn uart_stats(&self) -> Vec<UartStats, MAX_UARTS>;

    /// Hardware timer allocation table.
    fn timer_stats(&self) -> Vec<TimerStats, MAX_TIMERS>;
}
