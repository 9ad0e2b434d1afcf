use verano_monitor::core::monitor::Monitor;
use verano_monitor::core::notify::TelegramNotifier;
use verano_monitor::utils::logger;
use verano_monitor::{Endpoints, MonitorConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init_logger();

    let config = MonitorConfig::from_env();
    let endpoints = Endpoints::default();
    let notifier = TelegramNotifier::new(&config, &endpoints);
    let monitor = Monitor::new(config, endpoints, notifier);

    if let Err(e) = monitor.run().await {
        tracing::error!("❌ Monitor aborted: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
