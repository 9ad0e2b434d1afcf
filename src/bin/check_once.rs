//! Single-shot variant: one check cycle, then exit. Meant to be driven by an
//! external scheduler such as a CI cron job.

use verano_monitor::core::monitor::Monitor;
use verano_monitor::core::notify::TelegramNotifier;
use verano_monitor::utils::logger;
use verano_monitor::utils::validation::Validate;
use verano_monitor::{Endpoints, MonitorConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init_ci_logger();

    let config = MonitorConfig::from_env();
    let endpoints = Endpoints::default();
    if let Err(e) = config.validate().and_then(|_| endpoints.validate()) {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let notifier = TelegramNotifier::new(&config, &endpoints);
    let monitor = Monitor::new(config, endpoints, notifier);

    match monitor.check().await {
        Ok(report) => {
            tracing::info!(
                total = report.total_tramites,
                matched = report.matches.len(),
                notified = report.notified,
                "Check complete"
            );
        }
        Err(e) => {
            tracing::error!("❌ Check failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
