//! Terminal rendition of the toggle.
//!
//! State goes out as lines on stdout, clicks come in as lines on stdin:
//! `on`, `off` or `toggle`. `status` checks the unit right away.

use super::ToggleView;
use super::events::{self, PanelEvent};
use chrono::Local;
use log::debug;
use std::time::Duration;
use tokio::task::JoinHandle;

const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// View publishing to the panel event bus.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessView;

impl ToggleView for HeadlessView {
    fn set_checked(&self, checked: bool) {
        events::send_checked(checked);
    }

    fn set_indicator_visible(&self, visible: bool) {
        events::send_indicator_visible(visible);
    }
}

/// Print toggle state changes until the task is aborted.
pub fn spawn_renderer(title: String, icon_name: String) -> JoinHandle<()> {
    let mut rx = events::subscribe();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(EVENT_POLL_INTERVAL_MS));
        loop {
            ticker.tick().await;
            for event in events::drain_latest(&mut rx) {
                match event {
                    PanelEvent::Checked(checked) => {
                        let now = Local::now().format("%H:%M:%S").to_string();
                        println!("{}", render_line(&title, checked, &now));
                    }
                    PanelEvent::IndicatorVisible(visible) => {
                        debug!("Indicator {} {}", icon_name, if visible { "shown" } else { "hidden" });
                    }
                }
            }
        }
    })
}

fn render_line(title: &str, checked: bool, time: &str) -> String {
    let mark = if checked { "●" } else { "○" };
    let state = if checked { "on" } else { "off" };
    format!("[{}] {} {}: {}", time, mark, title, state)
}

/// A command typed on stdin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickCommand {
    On,
    Off,
    Toggle,
    /// Check now instead of waiting for the next tick
    Status,
}

impl ClickCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "on" | "start" => Some(ClickCommand::On),
            "off" | "stop" => Some(ClickCommand::Off),
            "toggle" | "t" => Some(ClickCommand::Toggle),
            "status" | "s" => Some(ClickCommand::Status),
            _ => None,
        }
    }

    /// Desired state given what the toggle currently shows.
    /// None when the command does not flip the toggle.
    pub fn desired(&self, checked: bool) -> Option<bool> {
        match self {
            ClickCommand::On => Some(true),
            ClickCommand::Off => Some(false),
            ClickCommand::Toggle => Some(!checked),
            ClickCommand::Status => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ClickCommand::parse("on"), Some(ClickCommand::On));
        assert_eq!(ClickCommand::parse("  OFF \n"), Some(ClickCommand::Off));
        assert_eq!(ClickCommand::parse("toggle"), Some(ClickCommand::Toggle));
        assert_eq!(ClickCommand::parse("status"), Some(ClickCommand::Status));
        assert_eq!(ClickCommand::parse("restart"), None);
        assert_eq!(ClickCommand::parse(""), None);
    }

    #[test]
    fn test_toggle_inverts_checked() {
        assert_eq!(ClickCommand::Toggle.desired(false), Some(true));
        assert_eq!(ClickCommand::Toggle.desired(true), Some(false));
        assert_eq!(ClickCommand::On.desired(true), Some(true));
        assert_eq!(ClickCommand::Off.desired(false), Some(false));
        assert_eq!(ClickCommand::Status.desired(true), None);
    }

    #[test]
    fn test_render_line() {
        assert_eq!(render_line("OLM Tunnel", true, "12:00:00"), "[12:00:00] ● OLM Tunnel: on");
        assert_eq!(render_line("OLM Tunnel", false, "12:00:05"), "[12:00:05] ○ OLM Tunnel: off");
    }
}
