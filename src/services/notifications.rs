//! Desktop notifications via the org.freedesktop.Notifications D-Bus service.

use log::{error, info, warn};
use std::collections::HashMap;
use std::future::Future;
use zbus::Connection;
use zbus::zvariant::Value;

const APP_NAME: &str = "OlmToggle";
const ERROR_ICON: &str = "dialog-error-symbolic";

/// D-Bus proxy for the notification daemon
#[zbus::proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Something that can tell the user about a failure.
pub trait Notifier: Send + Sync + 'static {
    /// Show an error. Delivery problems are logged, never returned.
    fn notify_error(&self, summary: &str, body: &str) -> impl Future<Output = ()> + Send;
}

/// Notifier posting to the session's notification daemon.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    async fn send(summary: &str, body: &str) -> zbus::Result<u32> {
        let connection = Connection::session().await?;
        let proxy = NotificationsProxy::new(&connection).await?;
        proxy
            .notify(APP_NAME, 0, ERROR_ICON, summary, body, &[], &HashMap::new(), -1)
            .await
    }
}

impl Notifier for DesktopNotifier {
    async fn notify_error(&self, summary: &str, body: &str) {
        error!("{}: {}", summary, body);
        match Self::send(summary, body).await {
            Ok(id) => info!("Posted notification {}", id),
            Err(e) => warn!("Failed to post notification: {}", e),
        }
    }
}
