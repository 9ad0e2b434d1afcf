use crate::config::{Endpoints, MonitorConfig};
use crate::core::portal::PortalClient;
use crate::core::{filter, notify};
use crate::domain::model::TramiteMatch;
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Outcome of one check cycle.
#[derive(Debug)]
pub struct CheckReport {
    pub total_tramites: usize,
    pub matches: Vec<TramiteMatch>,
    pub notified: usize,
}

/// Orchestrates the check cycle: login, token scrape, API fetch, keyword
/// filter, notification. Generic over the notifier so tests can observe
/// deliveries without a network.
pub struct Monitor<N: Notifier> {
    config: MonitorConfig,
    endpoints: Endpoints,
    notifier: N,
}

impl<N: Notifier> Monitor<N> {
    pub fn new(config: MonitorConfig, endpoints: Endpoints, notifier: N) -> Self {
        Self {
            config,
            endpoints,
            notifier,
        }
    }

    /// Runs one full cycle. Every available match produces its own
    /// notification; delivery failures are logged, never escalated.
    pub async fn check(&self) -> Result<CheckReport> {
        tracing::info!("Starting verification cycle");

        let mut portal = PortalClient::new(&self.endpoints)?;
        portal.login(&self.config).await?;
        portal.fetch_access_token().await?;

        let tramites = portal.fetch_tramites(&self.config.local_code).await?;
        tracing::info!(total = tramites.len(), "Trámites fetched");

        let matches = filter::find_verano(&tramites);
        let mut notified = 0;

        if matches.is_empty() {
            tracing::info!("No summer-course trámites found");
        } else {
            for tramite in &matches {
                tracing::info!(
                    nombre = %tramite.nombre,
                    estado = %tramite.estado,
                    disponible = tramite.disponible,
                    "Summer-course trámite"
                );
            }

            for tramite in matches.iter().filter(|t| t.disponible) {
                tracing::info!(nombre = %tramite.nombre, "¡Trámite de verano disponible!");
                let message =
                    notify::available_message(tramite, &self.endpoints, &self.config.local_code);
                if self.notifier.send(&message).await {
                    notified += 1;
                } else {
                    tracing::warn!(nombre = %tramite.nombre, "Notification was not delivered");
                }
            }
        }

        Ok(CheckReport {
            total_tramites: tramites.len(),
            matches,
            notified,
        })
    }

    /// Continuous variant: one check immediately, then one per interval,
    /// forever. A single cycle's failure never stops the loop. Ctrl-C sends
    /// a final "stopped" notification and exits cleanly, whether it lands
    /// during a cycle or during the sleep.
    pub async fn run(&self) -> Result<()> {
        self.run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Drives the loop until `shutdown` resolves; split out so tests can
    /// trigger the shutdown path without a process signal.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        self.config.validate()?;
        self.endpoints.validate()?;

        tracing::info!(
            local_code = %self.config.local_code,
            interval_minutes = self.config.check_interval_minutes,
            "Summer-course monitor starting"
        );
        self.notifier
            .send(&notify::started_message(&self.config))
            .await;

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = self.run_cycle() => {}
                _ = &mut shutdown => return self.stop().await,
            }
            tracing::info!(
                minutes = self.config.check_interval_minutes,
                "Next verification scheduled"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.config.check_interval()) => {}
                _ = &mut shutdown => return self.stop().await,
            }
        }
    }

    async fn stop(&self) -> Result<()> {
        tracing::info!("Interrupted, shutting down");
        self.notifier.send(notify::STOPPED_MESSAGE).await;
        Ok(())
    }

    async fn run_cycle(&self) {
        match self.check().await {
            Ok(report) if report.notified > 0 => {
                tracing::info!(notified = report.notified, "Cycle complete, notifications sent");
            }
            Ok(report) => {
                tracing::info!(
                    total = report.total_tramites,
                    matched = report.matches.len(),
                    "Cycle complete, nothing available"
                );
            }
            Err(e) => {
                // Cycle-local failures self-heal on the next attempt.
                tracing::error!(error = %e, "Verification cycle failed");
            }
        }
    }
}
