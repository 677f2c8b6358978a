//! Audio collaborator interface

use thiserror::Error;

/// Errors reported by an audio backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// Output device missing or busy
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Commands the alarm controller issues to the audio collaborator
pub trait AudioSink {
    /// Start looping the given clip
    fn start_loop(&mut self, clip_id: &str) -> Result<(), AudioError>;

    /// Stop playback
    fn stop(&mut self) -> Result<(), AudioError>;
}

impl<S: AudioSink + ?Sized> AudioSink for &mut S {
    fn start_loop(&mut self, clip_id: &str) -> Result<(), AudioError> {
        (**self).start_loop(clip_id)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        (**self).stop()
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn start_loop(&mut self, clip_id: &str) -> Result<(), AudioError> {
        (**self).start_loop(clip_id)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        (**self).stop()
    }
}

/// Command as seen by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCommand {
    StartLoop(String),
    Stop,
}

/// Sink that remembers every command; optionally fails them all
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<SinkCommand>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose commands are recorded but always return an error
    pub fn failing() -> Self {
        Self {
            commands: Vec::new(),
            fail: true,
        }
    }

    pub fn starts(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SinkCommand::StartLoop(_)))
            .count()
    }

    pub fn stops(&self) -> usize {
        self.commands.iter().filter(|c| **c == SinkCommand::Stop).count()
    }

    fn result(&self) -> Result<(), AudioError> {
        if self.fail {
            Err(AudioError::DeviceUnavailable("recording sink set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl AudioSink for RecordingSink {
    fn start_loop(&mut self, clip_id: &str) -> Result<(), AudioError> {
        self.commands.push(SinkCommand::StartLoop(clip_id.to_string()));
        self.result()
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.commands.push(SinkCommand::Stop);
        self.result()
    }
}
