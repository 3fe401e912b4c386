pub mod messages;

pub use messages::{AppMessage, ChannelRenderer, LogEntry, LogLevel};
