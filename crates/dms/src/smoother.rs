//! Majority-vote smoothing of head-pose labels

use ring_buffer::RingBuffer;
use crate::pose::PoseLabel;
use crate::DmsError;

/// Keeps the last K raw labels and reports their mode
#[derive(Debug, Clone)]
pub struct PoseSmoother {
    history: RingBuffer<PoseLabel>,
}

impl PoseSmoother {
    /// Create a smoother over a window of `window` frames
    pub fn new(window: usize) -> Result<Self, DmsError> {
        Ok(Self {
            history: RingBuffer::new(window)?,
        })
    }

    /// Record a raw label and return the smoothed one
    pub fn push(&mut self, label: PoseLabel) -> PoseLabel {
        self.history.push(label);
        // Non-empty after a push
        self.current().unwrap_or(label)
    }

    /// Mode of the current window.
    ///
    /// Ties go to the label whose first occurrence is oldest.
    pub fn current(&self) -> Option<PoseLabel> {
        let mut tally: Vec<(PoseLabel, usize)> = Vec::with_capacity(5);
        for &label in &self.history {
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((label, 1)),
            }
        }

        let mut best: Option<(PoseLabel, usize)> = None;
        for (label, count) in tally {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }

    /// Labels currently held, oldest first
    pub fn history(&self) -> Vec<PoseLabel> {
        self.history.iter().copied().collect()
    }

    /// Forget all history (session restart)
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
