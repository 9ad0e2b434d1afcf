use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client, StatusCode};
use url::Url;

use crate::config::{Endpoints, MonitorConfig};
use crate::core::extract;
use crate::domain::model::Tramite;
use crate::utils::error::{MonitorError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 5;

/// Cookie-backed portal session for one check cycle.
///
/// Created fresh per cycle and discarded with it; the access token scraped
/// here is only valid for the session that produced it.
pub struct PortalClient<'a> {
    client: Client,
    endpoints: &'a Endpoints,
    access_token: Option<String>,
    codigo_alumno: Option<String>,
    numero_documento: Option<String>,
}

impl<'a> PortalClient<'a> {
    pub fn new(endpoints: &'a Endpoints) -> Result<Self> {
        // Redirects are followed by hand: the login 302 must be inspected,
        // and the trámites page's final URL tells session-expiry apart from
        // markup drift.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoints,
            access_token: None,
            codigo_alumno: None,
            numero_documento: None,
        })
    }

    /// Authenticates the session: scrape the `_csrf` field, POST credentials,
    /// require a redirect-class response, then follow the target manually to
    /// finalize the session cookies.
    pub async fn login(&self, config: &MonitorConfig) -> Result<()> {
        tracing::info!("Logging in to the portal");

        let resp = self.client.get(&self.endpoints.login_url).send().await?;
        let html = resp.text().await?;
        let csrf = extract::csrf_token(&html).ok_or(MonitorError::CsrfTokenMissing)?;

        let form = [
            ("_csrf", csrf.as_str()),
            ("login", config.username()),
            ("clave", config.password.as_str()),
        ];
        let resp = self
            .client
            .post(&self.endpoints.login_url)
            .form(&form)
            .send()
            .await?;

        if !resp.status().is_redirection() {
            tracing::error!(status = %resp.status(), "Login was not accepted");
            return Err(MonitorError::AuthenticationFailed {
                status: resp.status(),
            });
        }

        if let Some(location) = resp.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
            let target = resolve_redirect(&self.endpoints.login_url, location)?;
            tracing::debug!(%target, "Following login redirect");
            self.get_following_redirects(target).await?;
        }

        tracing::info!("Login succeeded");
        Ok(())
    }

    /// Scrapes the access token from the trámites page metadata.
    ///
    /// Landing back on the login page means the session expired; any other
    /// page without a token means the markup drifted. Both abort the cycle.
    /// The `_ca` / `_nd` identifiers are captured opportunistically.
    pub async fn fetch_access_token(&mut self) -> Result<()> {
        tracing::info!("Fetching access token");

        let start = Url::parse(&self.endpoints.tramites_page_url)?;
        let (final_url, html) = self.get_following_redirects(start).await?;

        let Some(token) = extract::access_token(&html) else {
            if final_url.path().to_lowercase().contains("login") {
                tracing::warn!("Redirected back to login, session expired");
                return Err(MonitorError::SessionExpired);
            }
            return Err(MonitorError::AccessTokenMissing);
        };

        self.codigo_alumno = extract::meta_content(&html, "_ca");
        self.numero_documento = extract::meta_content(&html, "_nd");
        tracing::info!(
            token_len = token.len(),
            codigo_alumno = ?self.codigo_alumno,
            "Access token obtained"
        );

        self.access_token = Some(token);
        Ok(())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn codigo_alumno(&self) -> Option<&str> {
        self.codigo_alumno.as_deref()
    }

    pub fn numero_documento(&self) -> Option<&str> {
        self.numero_documento.as_deref()
    }

    /// Fetches the trámite list for one site code with the bearer token.
    pub async fn fetch_tramites(&self, local_code: &str) -> Result<Vec<Tramite>> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(MonitorError::AccessTokenMissing)?;

        let url = self.endpoints.tramites_api_url(local_code);
        tracing::debug!(%url, "Querying trámites API");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::error!(%status, "Trámites API error");
            return Err(MonitorError::UpstreamApi { status });
        }

        Ok(resp.json::<Vec<Tramite>>().await?)
    }

    async fn get_following_redirects(&self, mut target: Url) -> Result<(Url, String)> {
        for _ in 0..=MAX_REDIRECTS {
            let resp = self.client.get(target.clone()).send().await?;
            if !resp.status().is_redirection() {
                let body = resp.text().await?;
                return Ok((target, body));
            }

            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if location.is_empty() {
                return Ok((target, String::new()));
            }
            target = resolve_redirect(target.as_str(), &location)?;
        }

        // Redirect budget exhausted; the caller sees an empty page.
        Ok((target, String::new()))
    }
}

/// Resolves a `Location` header against the request URL. An https session is
/// never downgraded: http targets are upgraded when the origin was https.
fn resolve_redirect(base: &str, location: &str) -> Result<Url> {
    let base = Url::parse(base)?;
    let mut target = base.join(location)?;
    if base.scheme() == "https" && target.scheme() == "http" {
        let _ = target.set_scheme("https");
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_redirect_relative_target() {
        let target = resolve_redirect("https://portal.example/sgdfd/mat/login", "/sgdfd/mat/home")
            .unwrap();
        assert_eq!(target.as_str(), "https://portal.example/sgdfd/mat/home");
    }

    #[test]
    fn test_resolve_redirect_upgrades_insecure_target() {
        let target = resolve_redirect(
            "https://portal.example/login",
            "http://portal.example/home",
        )
        .unwrap();
        assert_eq!(target.scheme(), "https");
    }

    #[test]
    fn test_resolve_redirect_keeps_http_origin_untouched() {
        // Mock servers in tests run over plain http.
        let target =
            resolve_redirect("http://127.0.0.1:8080/login", "/home").unwrap();
        assert_eq!(target.as_str(), "http://127.0.0.1:8080/home");
    }
}
