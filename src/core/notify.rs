use async_trait::async_trait;
use chrono::Local;
use reqwest::{Client, StatusCode};

use crate::config::{Endpoints, MonitorConfig};
use crate::domain::model::TramiteMatch;
use crate::domain::ports::Notifier;

/// Sends HTML-flavored messages through the Telegram bot API.
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &MonitorConfig, endpoints: &Endpoints) -> Self {
        Self {
            client: Client::new(),
            base_url: endpoints.telegram_base_url.clone(),
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        }
    }

    fn configured(&self) -> bool {
        !self.token.is_empty() && !self.chat_id.is_empty()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> bool {
        if !self.configured() {
            tracing::warn!("Telegram is not configured, dropping notification");
            return false;
        }

        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let form = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "HTML"),
        ];

        match self.client.post(&url).form(&form).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "Telegram rejected the notification");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram notification failed");
                false
            }
        }
    }
}

pub fn available_message(
    tramite: &TramiteMatch,
    endpoints: &Endpoints,
    local_code: &str,
) -> String {
    format!(
        "🎓 <b>¡CURSO DE VERANO DISPONIBLE!</b> 🎓\n\n\
         📚 <b>Trámite:</b> {}\n\
         📝 <b>Descripción:</b> {}\n\
         📊 <b>Estado:</b> {}\n\n\
         🔗 <b>URL:</b>\n{}\n\n\
         ⏰ <b>Detectado:</b> {}\n\n\
         ¡Ingresa ahora para realizar tu matrícula!",
        tramite.nombre,
        tramite.descripcion,
        tramite.estado,
        endpoints.tramite_link(&tramite.nombre_url, local_code),
        Local::now().format("%Y-%m-%d %H:%M:%S"),
    )
}

pub fn started_message(config: &MonitorConfig) -> String {
    format!(
        "🚀 <b>Monitor Iniciado</b>\n\n\
         📍 Monitoreando: local {}\n\
         🔎 Buscando: Curso de Verano\n\
         ⏱️ Intervalo: Cada {} minutos\n\n\
         Te notificaré cuando esté disponible.",
        config.local_code, config.check_interval_minutes,
    )
}

pub const STOPPED_MESSAGE: &str = "⏹️ Monitor detenido manualmente";

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_match() -> TramiteMatch {
        TramiteMatch {
            nombre: "Matrícula Verano 2025".to_string(),
            descripcion: "Matrícula para el ciclo de verano".to_string(),
            estado: "Habilitado".to_string(),
            codigo_estado: "1".to_string(),
            disponible: true,
            nombre_url: "matricula-verano".to_string(),
            id_tipo_tramite: Some(7),
        }
    }

    fn notifier_for(server: &MockServer) -> TelegramNotifier {
        let config = MonitorConfig {
            email: "alumno@unmsm.edu.pe".to_string(),
            password: "secreta".to_string(),
            telegram_token: "123:abc".to_string(),
            telegram_chat_id: "42".to_string(),
            check_interval_minutes: 5,
            local_code: "20".to_string(),
        };
        let endpoints = Endpoints {
            telegram_base_url: server.base_url(),
            ..Endpoints::default()
        };
        TelegramNotifier::new(&config, &endpoints)
    }

    #[test]
    fn test_available_message_content() {
        let message = available_message(&sample_match(), &Endpoints::default(), "20");
        assert!(message.contains("¡CURSO DE VERANO DISPONIBLE!"));
        assert!(message.contains("Matrícula Verano 2025"));
        assert!(message.contains(
            "https://tramiteonline.unmsm.edu.pe/sgdfd/mat/tipo-tramite/matricula-verano?local=20"
        ));
    }

    #[test]
    fn test_started_message_mentions_interval_and_local() {
        let config = MonitorConfig {
            email: String::new(),
            password: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            check_interval_minutes: 10,
            local_code: "20".to_string(),
        };
        let message = started_message(&config);
        assert!(message.contains("local 20"));
        assert!(message.contains("Cada 10 minutos"));
    }

    #[tokio::test]
    async fn test_send_posts_form_to_bot_endpoint() {
        let server = MockServer::start();
        let telegram_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/bot123:abc/sendMessage")
                .body_contains("chat_id=42")
                .body_contains("parse_mode=HTML");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let notifier = notifier_for(&server);
        assert!(notifier.send("hola").await);
        telegram_mock.assert();
    }

    #[tokio::test]
    async fn test_send_maps_non_200_to_false() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:abc/sendMessage");
            then.status(403);
        });

        let notifier = notifier_for(&server);
        assert!(!notifier.send("hola").await);
    }

    #[tokio::test]
    async fn test_send_unconfigured_returns_false_without_request() {
        let server = MockServer::start();
        let telegram_mock = server.mock(|when, then| {
            when.method(POST).path_contains("/sendMessage");
            then.status(200);
        });

        let mut notifier = notifier_for(&server);
        notifier.token = String::new();
        assert!(!notifier.send("hola").await);
        telegram_mock.assert_hits(0);
    }
}
