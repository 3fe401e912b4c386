//! Application messages for inter-thread communication.

use std::time::{Duration, SystemTime};

use crossbeam_channel::Sender;

use placemap_cloud::SearchOutcome;
use placemap_core::{MarkerRenderer, ResolvedPlace};

/// Messages sent from the search worker thread to the main UI loop.
pub enum AppMessage {
    /// A cycle succeeded; these places replace the markers.
    MarkersReady { places: Vec<ResolvedPlace> },
    /// A cycle failed; shown once to the user.
    SearchFailed { message: String },
    /// The cycle is over, successful or not.
    SearchFinished {
        outcome: Option<SearchOutcome>,
        elapsed: Duration,
    },
    /// A log message for the console.
    Log(LogEntry),
}

/// Forwards a pipeline's render calls to the UI thread.
pub struct ChannelRenderer {
    tx: Sender<AppMessage>,
}

impl ChannelRenderer {
    pub fn new(tx: Sender<AppMessage>) -> Self {
        Self { tx }
    }
}

impl MarkerRenderer for ChannelRenderer {
    fn render_markers(&mut self, places: &[ResolvedPlace]) {
        let _ = self.tx.send(AppMessage::MarkersReady {
            places: places.to_vec(),
        });
    }

    fn report_error(&mut self, message: &str) {
        let _ = self.tx.send(AppMessage::SearchFailed {
            message: message.to_string(),
        });
    }
}

/// Log level for console messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// A log entry for the console panel.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: SystemTime,
}

impl LogEntry {
    fn new(level: LogLevel, msg: impl Into<String>) -> Self {
        Self {
            level,
            message: msg.into(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, msg)
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, msg)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, msg)
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemap_core::{Coord, PlaceRecord};

    #[test]
    fn channel_renderer_forwards_both_outcomes() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut renderer = ChannelRenderer::new(tx);

        renderer.render_markers(&[ResolvedPlace::resolved(
            PlaceRecord::new("Dr. A", "1 Main St", "u"),
            Coord::new(42.37, -72.52),
        )]);
        renderer.report_error("Search failed: db down");

        match rx.try_recv() {
            Ok(AppMessage::MarkersReady { places }) => assert_eq!(places.len(), 1),
            _ => panic!("expected MarkersReady"),
        }
        match rx.try_recv() {
            Ok(AppMessage::SearchFailed { message }) => {
                assert_eq!(message, "Search failed: db down")
            }
            _ => panic!("expected SearchFailed"),
        }
    }

    #[test]
    fn disconnected_channel_is_ignored() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut renderer = ChannelRenderer::new(tx);
        renderer.render_markers(&[]);
        renderer.report_error("ignored");
    }
}
