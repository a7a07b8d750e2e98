//! Privileged unit control through the systemd Manager interface.
//!
//! Calls are fire-and-forget: the job object path systemd hands back is
//! logged and otherwise ignored. Truth about the unit comes from probing.

use crate::error::ControlError;
use crate::types::{JOB_MODE_REPLACE, UnitAction, UnitScope};
use log::{debug, error, info};
use std::future::Future;
use tokio::sync::OnceCell;
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

/// D-Bus proxy for the systemd manager
#[zbus::proxy(
    interface = "org.freedesktop.systemd1.Manager",
    default_service = "org.freedesktop.systemd1",
    default_path = "/org/freedesktop/systemd1"
)]
trait SystemdManager {
    fn start_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;

    fn stop_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;
}

/// A channel able to start and stop a unit.
pub trait ControlChannel: Send + Sync + 'static {
    /// Send a single start/stop request for `unit`.
    /// Resolves once the request was accepted, not once the unit settled.
    fn submit(
        &self,
        unit: &str,
        action: UnitAction,
    ) -> impl Future<Output = Result<(), ControlError>> + Send;
}

/// Where the controller connects to.
#[derive(Clone, Debug)]
enum BusTarget {
    Scope(UnitScope),
    Address(String),
}

/// systemd controller backed by a lazily built D-Bus proxy.
///
/// The proxy is created on the first request and reused for every later
/// one. A failed construction is not cached, so the next request tries again.
pub struct SystemdController {
    target: BusTarget,
    proxy: OnceCell<SystemdManagerProxy<'static>>,
}

impl SystemdController {
    /// Controller for the manager owning units of `scope`.
    pub fn new(scope: UnitScope) -> Self {
        Self {
            target: BusTarget::Scope(scope),
            proxy: OnceCell::new(),
        }
    }

    /// Controller talking to a bus at an explicit address,
    /// e.g. `unix:path=/run/dbus/system_bus_socket`.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            target: BusTarget::Address(address.into()),
            proxy: OnceCell::new(),
        }
    }

    /// Whether the D-Bus proxy has been built yet.
    pub fn is_connected(&self) -> bool {
        self.proxy.initialized()
    }

    async fn proxy(&self) -> Result<&SystemdManagerProxy<'static>, ControlError> {
        self.proxy
            .get_or_try_init(|| async {
                let connection = self.connect().await.map_err(ControlError::Connect)?;
                let proxy = SystemdManagerProxy::new(&connection)
                    .await
                    .map_err(ControlError::Connect)?;
                info!("Connected to systemd manager ({:?})", self.target);
                Ok(proxy)
            })
            .await
    }

    async fn connect(&self) -> zbus::Result<Connection> {
        match &self.target {
            BusTarget::Scope(UnitScope::System) => Connection::system().await,
            BusTarget::Scope(UnitScope::User) => Connection::session().await,
            BusTarget::Address(address) => {
                zbus::connection::Builder::address(address.as_str())?
                    .build()
                    .await
            }
        }
    }
}

impl ControlChannel for SystemdController {
    async fn submit(&self, unit: &str, action: UnitAction) -> Result<(), ControlError> {
        let proxy = match self.proxy().await {
            Ok(proxy) => proxy,
            Err(e) => {
                error!("D-Bus error while trying to {} {}: {}", action, unit, e);
                return Err(e);
            }
        };

        info!("Executing via D-Bus: {} {}", action, unit);
        let job = match action {
            UnitAction::Start => proxy.start_unit(unit, JOB_MODE_REPLACE).await,
            UnitAction::Stop => proxy.stop_unit(unit, JOB_MODE_REPLACE).await,
        };

        match job {
            Ok(job) => {
                debug!("systemd queued job {} for {}", job.as_str(), unit);
                Ok(())
            }
            Err(e) => {
                error!("Failed to {} {}: {}", action, unit, e);
                Err(e.into())
            }
        }
    }
}
