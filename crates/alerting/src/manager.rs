//! Alarm Controller Implementation

use dms::DriverStatus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::sink::AudioSink;

/// Alarm configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Clip handed to the audio collaborator on start (default: "alarm.wav")
    pub clip_id: String,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            clip_id: "alarm.wav".to_string(),
        }
    }
}

/// Alarm latch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlarmState {
    #[default]
    Silent,
    Sounding,
}

/// Edge produced by one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmTransition {
    /// Silent -> Sounding; one start command issued
    Started,
    /// Sounding -> Silent; one stop command issued
    Stopped,
    /// No change; nothing issued
    Unchanged,
}

/// Edge-triggered latch between driver status and the audio collaborator
pub struct AlarmController<S: AudioSink> {
    /// Configuration
    config: AlarmConfig,
    /// Audio collaborator
    sink: S,
    /// Current latch state
    state: AlarmState,
    /// Silent -> Sounding transitions so far
    starts: u64,
    /// Sounding -> Silent transitions so far
    stops: u64,
    /// Audio commands that reported an error
    failed_commands: u64,
}

impl<S: AudioSink> AlarmController<S> {
    /// Create a new alarm controller in the Silent state
    pub fn new(config: AlarmConfig, sink: S) -> Self {
        info!("Creating alarm controller with clip {:?}", config.clip_id);
        Self {
            config,
            sink,
            state: AlarmState::Silent,
            starts: 0,
            stops: 0,
            failed_commands: 0,
        }
    }

    /// Apply one frame's status.
    ///
    /// Audio failures are logged; the latch moves regardless since retries
    /// belong to the audio backend.
    pub fn update(&mut self, status: DriverStatus) -> AlarmTransition {
        match (self.state, status.is_alarming()) {
            (AlarmState::Silent, true) => {
                self.state = AlarmState::Sounding;
                self.starts += 1;
                info!(%status, "Alarm started");
                if let Err(e) = self.sink.start_loop(&self.config.clip_id) {
                    self.failed_commands += 1;
                    warn!("Alarm start command failed: {}", e);
                }
                AlarmTransition::Started
            }
            (AlarmState::Sounding, false) => {
                self.state = AlarmState::Silent;
                self.stops += 1;
                info!(%status, "Alarm stopped");
                if let Err(e) = self.sink.stop() {
                    self.failed_commands += 1;
                    warn!("Alarm stop command failed: {}", e);
                }
                AlarmTransition::Stopped
            }
            _ => {
                debug!(%status, state = ?self.state, "Alarm unchanged");
                AlarmTransition::Unchanged
            }
        }
    }

    /// Silence a sounding alarm at session end
    pub fn shutdown(&mut self) -> AlarmTransition {
        self.update(DriverStatus::Active)
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == AlarmState::Sounding
    }

    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn stops(&self) -> u64 {
        self.stops
    }

    pub fn failed_commands(&self) -> u64 {
        self.failed_commands
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCommand};
    use proptest::prelude::*;
    use DriverStatus::*;

    fn controller() -> AlarmController<RecordingSink> {
        AlarmController::new(AlarmConfig::default(), RecordingSink::new())
    }

    #[test]
    fn test_start_once_on_repeated_drowsy() {
        let mut alarm = controller();
        assert_eq!(alarm.update(Drowsy), AlarmTransition::Started);
        assert_eq!(alarm.update(Drowsy), AlarmTransition::Unchanged);
        assert_eq!(alarm.update(NoFace), AlarmTransition::Unchanged);

        assert_eq!(
            alarm.sink().commands,
            vec![SinkCommand::StartLoop("alarm.wav".into())]
        );
    }

    #[test]
    fn test_stop_once_on_active() {
        let mut alarm = controller();
        alarm.update(NoFace);
        assert_eq!(alarm.update(Active), AlarmTransition::Stopped);
        assert_eq!(alarm.update(Active), AlarmTransition::Unchanged);

        assert_eq!(alarm.sink().stops(), 1);
        assert_eq!(alarm.state(), AlarmState::Silent);
    }

    #[test]
    fn test_active_from_silent_is_noop() {
        let mut alarm = controller();
        assert_eq!(alarm.update(Active), AlarmTransition::Unchanged);
        assert!(alarm.sink().commands.is_empty());
    }

    #[test]
    fn test_failed_command_still_transitions() {
        let mut alarm = AlarmController::new(AlarmConfig::default(), RecordingSink::failing());
        assert_eq!(alarm.update(Drowsy), AlarmTransition::Started);
        assert!(alarm.is_sounding());
        assert_eq!(alarm.update(Active), AlarmTransition::Stopped);
        assert!(!alarm.is_sounding());
        assert_eq!(alarm.failed_commands(), 2);
    }

    #[test]
    fn test_shutdown_silences() {
        let mut alarm = controller();
        alarm.update(Drowsy);
        assert_eq!(alarm.shutdown(), AlarmTransition::Stopped);
        assert_eq!(alarm.shutdown(), AlarmTransition::Unchanged);
    }

    #[test]
    fn test_custom_clip() {
        let config = AlarmConfig {
            clip_id: "chime.ogg".into(),
        };
        let mut alarm = AlarmController::new(config, RecordingSink::new());
        alarm.update(Drowsy);
        assert_eq!(
            alarm.into_sink().commands,
            vec![SinkCommand::StartLoop("chime.ogg".into())]
        );
    }

    fn any_status() -> impl Strategy<Value = DriverStatus> {
        prop_oneof![Just(Active), Just(Drowsy), Just(NoFace)]
    }

    proptest! {
        #[test]
        fn prop_commands_match_edges(statuses in proptest::collection::vec(any_status(), 0..100)) {
            let mut alarm = controller();
            let mut sounding = false;
            let mut expected_starts = 0;
            let mut expected_stops = 0;

            for &s in &statuses {
                let want = s.is_alarming();
                if want && !sounding {
                    expected_starts += 1;
                } else if !want && sounding {
                    expected_stops += 1;
                }
                sounding = want;
                alarm.update(s);
            }

            prop_assert_eq!(alarm.sink().starts(), expected_starts);
            prop_assert_eq!(alarm.sink().stops(), expected_stops);
            prop_assert_eq!(alarm.is_sounding(), sounding);
        }
    }
}
