//! Alerting System
//!
//! Maps the per-frame driver status onto start/stop commands for the audio
//! collaborator, firing only on Silent/Sounding transitions.

mod manager;
mod sink;

pub use manager::{AlarmConfig, AlarmController, AlarmState, AlarmTransition};
pub use sink::{AudioError, AudioSink, RecordingSink, SinkCommand};
