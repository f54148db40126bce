use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::LogConfig;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// CLI subcommands log to stderr
    Stderr,
    /// The dashboard owns the terminal, so it only logs to `log.file`
    FileOnly,
}

/// Default filter when `RUST_LOG` is unset
pub fn default_directive(level: &str) -> String {
    format!("ticket_desk={level},warn")
}

/// Install the global subscriber. With [`LogSink::FileOnly`] and no
/// `log.file` nothing is installed.
pub fn init_tracing(config: &LogConfig, sink: LogSink) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    match (sink, config.file.as_deref()) {
        (_, Some(file)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(file))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        (LogSink::Stderr, None) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .try_init();
        }
        (LogSink::FileOnly, None) => {}
    }
    Ok(())
}
