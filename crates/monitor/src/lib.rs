//! NeuroDrive Session Runner
//!
//! Wires the driver-state decision core to its collaborators: observation
//! ingestion, the audio alarm, render records on stdout and the final
//! performance summary.

pub mod audio;
pub mod ingest;
pub mod logging;
pub mod session;
pub mod settings;
pub mod simulate;

pub use audio::LoggingAudioSink;
pub use logging::{init_logging, LogFormat};
pub use session::{Session, SessionFrame, SessionSummary};
pub use settings::Settings;
