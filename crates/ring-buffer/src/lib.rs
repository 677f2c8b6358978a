//! Fixed-Capacity Ring Buffer
//!
//! Provides an insertion-ordered ring buffer for short per-frame history
//! windows (e.g. the head-pose majority vote). The oldest entry is evicted
//! when a push would exceed capacity.

mod buffer;

pub use buffer::{Iter, RingBuffer};

use thiserror::Error;

/// Ring buffer construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingBufferError {
    /// A window with no slots cannot hold any history
    #[error("Ring buffer capacity must be at least 1")]
    ZeroCapacity,
}
