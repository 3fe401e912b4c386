//! Console panel: log messages with colored levels.

use egui::{Color32, RichText, ScrollArea, Ui};

use crate::state::{LogEntry, LogLevel};

fn level_style(level: LogLevel) -> (&'static str, Color32) {
    match level {
        LogLevel::Info => ("[INFO]", Color32::from_rgb(150, 180, 220)),
        LogLevel::Warning => ("[WARN]", Color32::from_rgb(230, 180, 50)),
        LogLevel::Error => ("[ERROR]", Color32::from_rgb(220, 60, 60)),
        LogLevel::Success => ("[OK]", Color32::from_rgb(60, 200, 80)),
    }
}

/// `HH:MM:SS` (UTC) of a log entry.
fn clock(entry: &LogEntry) -> String {
    let secs = entry
        .timestamp
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        % 86400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Show the console panel with log messages.
pub fn show_console(ui: &mut Ui, logs: &[LogEntry]) {
    ui.horizontal(|ui| {
        ui.heading("Console");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{} messages", logs.len()));
        });
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in logs {
                let (prefix, color) = level_style(entry.level);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(clock(entry))
                            .color(Color32::GRAY)
                            .monospace()
                            .size(11.0),
                    );
                    ui.label(RichText::new(prefix).color(color).monospace().size(11.0));
                    ui.label(RichText::new(&entry.message).monospace().size(11.0));
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn clock_wraps_at_midnight() {
        let mut entry = LogEntry::info("x");
        entry.timestamp = UNIX_EPOCH + Duration::from_secs(86400 * 3 + 3600 * 13 + 60 * 5 + 9);
        assert_eq!(clock(&entry), "13:05:09");
    }
}
