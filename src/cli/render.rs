//! Terminal rendering of monitor events

use crate::core::monitor::{Alert, AlertLevel, MonitorEvent};
use crate::core::types::ImageLicense;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Text printed for an event, if any
pub fn format_event(event: &MonitorEvent) -> Option<String> {
    match event {
        MonitorEvent::Progress { percent, text, status } => Some(match status {
            Some(_) => format!("[{:>3}%] {}", percent, text),
            None => text.clone(),
        }),
        MonitorEvent::Alert(alert) => Some(alert.message.clone()),
        MonitorEvent::Results(rows) => {
            if rows.is_empty() {
                return Some("No result rows.".to_string());
            }
            let lines: Vec<String> = rows.iter().map(|row| row.to_string()).collect();
            Some(lines.join("\n"))
        }
        MonitorEvent::StateChanged(_) | MonitorEvent::FormEnabled(_) => None,
    }
}

/// Print events until every sender is gone
pub async fn print_events(mut events: UnboundedReceiver<MonitorEvent>) {
    while let Some(event) = events.recv().await {
        match (format_event(&event), &event) {
            (Some(text), MonitorEvent::Alert(Alert { level: AlertLevel::Error, .. })) => {
                eprintln!("{}", text)
            }
            (Some(text), _) => println!("{}", text),
            (None, _) => debug!("{:?}", event),
        }
    }
}

/// Hint printed when a batch can be resumed
pub fn retry_hint(directory: bool) -> String {
    if directory {
        "Run `ingest retry --dir` to retry the failed uploads.".to_string()
    } else {
        "Run `ingest retry` to retry the failed uploads.".to_string()
    }
}

pub fn license_table() -> String {
    ImageLicense::all()
        .iter()
        .map(|l| format!("{:<12} {:<38} {}", l.name(), l.description(), l.url()))
        .collect::<Vec<_>>()
        .join("\n")
}
