use std::env;
use std::time::Duration;

use crate::utils::error::{MonitorError, Result};
use crate::utils::validation::{validate_numeric_code, validate_range, validate_url, Validate};

/// 20 = FISI
pub const DEFAULT_LOCAL_CODE: &str = "20";
pub const DEFAULT_CHECK_INTERVAL_MINUTES: u64 = 5;

/// Immutable runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub email: String,
    pub password: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub check_interval_minutes: u64,
    pub local_code: String,
}

impl MonitorConfig {
    pub fn from_env() -> Self {
        let check_interval_minutes = env::var("CHECK_INTERVAL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHECK_INTERVAL_MINUTES);

        Self {
            email: env::var("UNMSM_EMAIL").unwrap_or_default(),
            password: env::var("UNMSM_PASSWORD").unwrap_or_default(),
            telegram_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
            check_interval_minutes,
            local_code: env::var("LOCAL_CODE").unwrap_or_else(|_| DEFAULT_LOCAL_CODE.to_string()),
        }
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes * 60)
    }

    /// Login name expected by the portal: the institutional domain is stripped.
    pub fn username(&self) -> &str {
        if self.email.contains("@unmsm.edu.pe") {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            &self.email
        }
    }

    pub fn telegram_configured(&self) -> bool {
        !self.telegram_token.is_empty() && !self.telegram_chat_id.is_empty()
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(MonitorError::MissingCredentials);
        }
        validate_range(
            "check_interval_minutes",
            self.check_interval_minutes,
            1,
            24 * 60,
        )?;
        validate_numeric_code("local_code", &self.local_code)?;
        Ok(())
    }
}

/// Upstream URLs, injectable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login_url: String,
    pub tramites_page_url: String,
    pub api_base_url: String,
    pub telegram_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_url: "https://tramiteonline.unmsm.edu.pe/sgdfd/mat/login".to_string(),
            tramites_page_url: "https://tramiteonline.unmsm.edu.pe/sgdfd/mat/tramites/solicitud"
                .to_string(),
            api_base_url: "https://servicioonline.unmsm.edu.pe/sgdfd/mat/backend".to_string(),
            telegram_base_url: "https://api.telegram.org".to_string(),
        }
    }
}

impl Endpoints {
    pub fn tramites_api_url(&self, local_code: &str) -> String {
        format!("{}/tipos-tramite/local/{}", self.api_base_url, local_code)
    }

    /// Deep link to one trámite; lives on the same host as the login page.
    pub fn tramite_link(&self, nombre_url: &str, local_code: &str) -> String {
        let base = self.login_url.trim_end_matches("/login");
        format!("{}/tipo-tramite/{}?local={}", base, nombre_url, local_code)
    }
}

impl Validate for Endpoints {
    fn validate(&self) -> Result<()> {
        validate_url("login_url", &self.login_url)?;
        validate_url("tramites_page_url", &self.tramites_page_url)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url("telegram_base_url", &self.telegram_base_url)?;
        Ok(())
    }
}
