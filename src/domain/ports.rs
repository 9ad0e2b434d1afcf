use async_trait::async_trait;

/// Delivery channel for monitor notifications.
///
/// Implementations swallow transport errors: a failed delivery is reported
/// as `false`, logged by the caller, and never aborts a check cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> bool;
}
