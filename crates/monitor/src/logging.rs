//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only frame records.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize logging; `RUST_LOG` takes precedence over `level`
pub fn init_logging(level: Level, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(use_ansi(&std::io::stderr()))
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

/// Colour only when the stream is an interactive terminal
fn use_ansi(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}
