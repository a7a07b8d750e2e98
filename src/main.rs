//! OlmToggle - quick toggle for a systemd unit
//!
//! Single-threaded event loop: the unit observer, its poll schedule and the
//! headless renderer all run as tasks on one current-thread runtime.

mod config;
mod event_bus;
mod extension;
mod panels;
mod scheduler;
mod services;
#[cfg(test)]
mod testing;

use config::ToggleConfig;
use extension::Extension;
use log::{debug, error, info, warn};
use olm_unit::{SystemctlProbe, SystemdController};
use panels::quick_toggle::headless::{self, ClickCommand, HeadlessView};
use services::DesktopNotifier;
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting OlmToggle...");

    let config = ToggleConfig::load_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: ToggleConfig) -> Result<(), Box<dyn Error>> {
    // One controller for the whole process; its D-Bus proxy is built on first use
    let controller = Arc::new(SystemdController::new(config.scope));
    let probe = SystemctlProbe::with_program(config.systemctl.as_str(), config.scope);

    let renderer = headless::spawn_renderer(config.title.clone(), config.icon_name.clone());
    let mut extension = Extension::new(config, Arc::clone(&controller), probe, DesktopNotifier);

    if !extension.enable(Arc::new(HeadlessView)).await {
        renderer.abort();
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    error!("Failed to listen for Ctrl-C: {}", e);
                }
                info!("Shutting down...");
                break;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => handle_line(&extension, &line).await,
                Ok(None) => {
                    info!("stdin closed, no more clicks");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },
        }
    }

    extension.disable();
    renderer.abort();
    debug!("systemd proxy was built: {}", controller.is_connected());
    Ok(())
}

async fn handle_line<C, P, N>(extension: &Extension<C, P, N>, line: &str)
where
    C: olm_unit::ControlChannel,
    P: olm_unit::StatusProbe + Clone,
    N: services::Notifier,
{
    if line.trim().is_empty() {
        return;
    }
    let Some(command) = ClickCommand::parse(line) else {
        warn!("Unknown command {:?}, expected on, off, toggle or status", line.trim());
        return;
    };
    let Some(toggle) = extension.toggle() else {
        return;
    };

    let observer = toggle.observer();
    match command.desired(observer.is_active()) {
        Some(desired) => {
            debug!("Click on {}: {:?} -> {}", observer.unit(), command, desired);
            // Not awaited: the request logs its own failure, the next probe shows the outcome
            drop(toggle.clicked(desired));
        }
        None => {
            let active = observer.refresh().await;
            info!(
                "{} is {} (polling: {})",
                observer.unit(),
                if active { "active" } else { "inactive" },
                observer.is_polling()
            );
        }
    }
}
