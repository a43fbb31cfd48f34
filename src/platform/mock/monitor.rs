//! Mock system monitor for testing

use crate::platform::traits::monitor::{
    CrashDump, DmaChannelStats, HeapStats, ResetCause, SystemMonitor, TaskStackInfo, TimerStats,
    UartStats, MAX_DMA_STREAMS, MAX_TASKS, MAX_TIMERS, MAX_UARTS,
};
use heapless::Vec;

/// Configurable system monitor for host tests
///
/// Defaults to a clean power-on boot with empty snapshots; tests set the
/// state they need.
pub struct MockMonitor {
    pub reset_cause: ResetCause,
    pub crash_dump: Option<CrashDump>,
    pub tasks: Vec<TaskStackInfo, MAX_TASKS>,
    pub heap: HeapStats,
    pub dma: Vec<DmaChannelStats, MAX_DMA_STREAMS>,
    pub uarts: Vec<UartStats, MAX_UARTS>,
    pub timers: Vec<TimerStats, MAX_TIMERS>,
}

impl MockMonitor {
    /// Create a monitor reporting a clean power-on boot
    pub fn new() -> Self {
        Self {
            reset_cause: ResetCause::PowerOn,
            crash_dump: None,
            tasks: Vec::new(),
            heap: HeapStats::default(),
            dma: Vec::new(),
            uarts: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// Monitor reporting a watchdog reset with a captured crash dump
    pub fn after_watchdog(dump: Option<CrashDump>) -> Self {
        let mut monitor = Self::new();
        monitor.reset_cause = ResetCause::Watchdog;
        monitor.crash_dump = dump;
        monitor
    }
}

impl Default for MockMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMonitor for MockMonitor {
    fn reset_cause(&self) -> ResetCause {
        self.reset_cause
    }

    fn crash_dump(&self) -> Option<CrashDump> {
        self.crash_dump
    }

    fn task_stacks(&self) -> Vec<TaskStackInfo, MAX_TASKS> {
        self.tasks.clone()
    }

    fn heap_stats(&self) -> HeapStats {
        self.heap
    }

    fn dma_stats(&self) -> Vec<DmaChannelStats, MAX_DMA_STREAMS> {
        self.dma.clone()
    }

    fn uart_stats(&self) -> Vec<UartStats, MAX_UARTS> {
        self.uarts.clone()
    }

    fn timer_stats(&self) -> Vec<TimerStats, MAX_TIMERS> {
        self.timers.clone()
    }
}
