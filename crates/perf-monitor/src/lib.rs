//! Performance Monitor
//!
//! Observes the per-frame decision pipeline: latency from entry to exit,
//! instantaneous frame rate from consecutive entries, and running averages
//! of both. Never touches the pipeline's output.

mod monitor;

pub use monitor::{
    FrameTiming, PerformanceAccumulator, PerformanceMonitor, PerformanceSnapshot,
    PerformanceSummary,
};
