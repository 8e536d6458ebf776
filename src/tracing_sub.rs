//! Global `tracing` subscriber for the demo binary.
//!
//! Events are formatted without ANSI colors because they usually end up in
//! the log view layer, which draws plain text.
use std::io;

use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::components::log_view::LogHandle;

/// Writer factory for formatted events: the log view buffer when one is
/// given, stderr otherwise.
pub fn log_sink(log: Option<LogHandle>) -> BoxMakeWriter {
    match log {
        Some(handle) => BoxMakeWriter::new(move || handle.writer()),
        None => BoxMakeWriter::new(io::stderr),
    }
}

/// Install the global subscriber at `level`. Later calls are no-ops.
pub fn init(level: Level, log: Option<LogHandle>) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(log_sink(log))
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
