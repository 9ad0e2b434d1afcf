pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{Endpoints, MonitorConfig};
pub use core::monitor::{CheckReport, Monitor};
pub use core::notify::TelegramNotifier;
pub use utils::error::{MonitorError, Result};
