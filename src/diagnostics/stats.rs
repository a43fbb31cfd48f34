//! Diagnostic report formatters
//!
//! Human-readable text reports over [`SystemMonitor`] snapshots, written
//! into a caller-supplied [`ExpandingString`]. Reports are generated on
//! demand only; nothing here runs periodically or allocates beyond the
//! caller's buffer.

use super::buffer::ExpandingString;
use crate::platform::SystemMonitor;
use core::fmt::{self, Write};

/// Per-task stack usage report
///
/// A task whose high-water mark drops below 1/8 of its stack is flagged.
pub fn thread_report(monitor: &impl SystemMonitor, out: &mut ExpandingString) -> fmt::Result {
    writeln!(out, "Threads:")?;
    for task in monitor.task_stacks() {
        let flag = if task.stack_free_min < task.stack_total / 8 {
            " LOW"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<12} stack={:>6} free_min={:>6}{}",
            task.name, task.stack_total, task.stack_free_min, flag
        )?;
    }
    Ok(())
}

/// Heap usage report
pub fn mem_report(monitor: &impl SystemMonitor, out: &mut ExpandingString) -> fmt::Result {
    let heap = monitor.heap_stats();
    writeln!(
        out,
        "Heap: total={} free={} largest_free={}",
        heap.total, heap.free, heap.largest_free
    )
}

/// DMA stream contention report
pub fn dma_report(monitor: &impl SystemMonitor, out: &mut ExpandingString) -> fmt::Result {
    writeln!(out, "DMA:")?;
    for stream in monitor.dma_stats() {
        writeln!(
            out,
            "  {:<8} transfers={:>8} contended={:>6}",
            stream.stream, stream.transfers, stream.contended
        )?;
    }
    Ok(())
}

/// UART throughput and error report
pub fn uart_report(monitor: &impl SystemMonitor, out: &mut ExpandingString) -> fmt::Result {
    writeln!(out, "UARTs:")?;
    for uart in monitor.uart_stats() {
        writeln!(
            out,
            "  {:<8} tx={:>8} rx={:>8} overrun={} frame_err={}",
            uart.name, uart.tx_bytes, uart.rx_bytes, uart.rx_overruns, uart.framing_errors
        )?;
    }
    Ok(())
}

/// Hardware timer allocation report
pub fn timer_report(monitor: &impl SystemMonitor, out: &mut ExpandingString) -> fmt::Result {
    writeln!(out, "Timers:")?;
    for timer in monitor.timer_stats() {
        writeln!(
            out,
            "  TIM{:<3} owner={:<12} channels={}",
            timer.timer, timer.owner, timer.channels_used
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockMonitor;
    use crate::platform::traits::monitor::{
        DmaChannelStats, HeapStats, TaskStackInfo, TimerStats, UartStats,
    };

    fn sample_monitor() -> MockMonitor {
        let mut monitor = MockMonitor::new();
        monitor
            .tasks
            .push(TaskStackInfo {
                name: "main",
                stack_total: 4096,
                stack_free_min: 2100,
            })
            .unwrap();
        monitor
            .tasks
            .push(TaskStackInfo {
                name: "io",
                stack_total: 2048,
                stack_free_min: 96,
            })
            .unwrap();
        monitor.heap = HeapStats {
            total: 65536,
            free: 20000,
            largest_free: 16384,
        };
        monitor
            .dma
            .push(DmaChannelStats {
                stream: "1.4",
                transfers: 120_000,
                contended: 3,
            })
            .unwrap();
        monitor
            .uarts
            .push(UartStats {
                name: "UART2",
                tx_bytes: 5000,
                rx_bytes: 1200,
                rx_overruns: 1,
                framing_errors: 0,
            })
            .unwrap();
        monitor
            .timers
            .push(TimerStats {
                timer: 3,
                owner: "pwm_out",
                channels_used: 4,
            })
            .unwrap();
        monitor
    }

    #[test]
    fn test_thread_report_flags_low_stack() {
        let mut out = ExpandingString::new();
        thread_report(&sample_monitor(), &mut out).unwrap();
        assert!(out.contains("main"));
        // io has only 96 of 2048 bytes left at the high-water mark
        let io_line = out.lines().find(|l| l.contains("io")).unwrap();
        assert!(io_line.ends_with("LOW"));
        let main_line = out.lines().find(|l| l.contains("main")).unwrap();
        assert!(!main_line.ends_with("LOW"));
    }

    #[test]
    fn test_mem_report() {
        let mut out = ExpandingString::new();
        mem_report(&sample_monitor(), &mut out).unwrap();
        assert_eq!(out.as_str(), "Heap: total=65536 free=20000 largest_free=16384\n");
    }

    #[test]
    fn test_reports_append_to_one_buffer() {
        let monitor = sample_monitor();
        let mut out = ExpandingString::new();
        dma_report(&monitor, &mut out).unwrap();
        uart_report(&monitor, &mut out).unwrap();
        timer_report(&monitor, &mut out).unwrap();

        assert!(out.contains("DMA:"));
        assert!(out.contains("UART2"));
        assert!(out.contains("TIM3"));
    }

    #[test]
    fn test_empty_snapshots_produce_headers_only() {
        let mut out = ExpandingString::new();
        thread_report(&MockMonitor::new(), &mut out).unwrap();
        assert_eq!(out.as_str(), "Threads:\n");
    }
}
