//! Audio backend used by the runner
//!
//! Playback itself belongs to the host; this sink reports the commands it
//! receives through tracing so a supervising process can act on them.

use alerting::{AudioError, AudioSink};
use tracing::info;

/// Logs `start-loop` and `stop` commands
#[derive(Debug, Default)]
pub struct LoggingAudioSink {
    playing: Option<String>,
}

impl LoggingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip currently looping, if any
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

impl AudioSink for LoggingAudioSink {
    fn start_loop(&mut self, clip_id: &str) -> Result<(), AudioError> {
        info!(target: "audio", clip = clip_id, "start-loop");
        self.playing = Some(clip_id.to_string());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        info!(target: "audio", clip = ?self.playing, "stop");
        self.playing = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_playing_clip() {
        let mut sink = LoggingAudioSink::new();
        sink.start_loop("alarm.wav").unwrap();
        assert_eq!(sink.playing(), Some("alarm.wav"));
        sink.stop().unwrap();
        assert_eq!(sink.playing(), None);
    }
}
