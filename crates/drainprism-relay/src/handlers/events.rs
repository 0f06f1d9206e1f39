//! Discrete events for scaling and release messages.

use crate::client::Client;

/// Namespace for platform-initiated events (scaling).
pub const HEROKU_NAMESPACE: &str = "heroku";
/// Namespace for application-initiated events (release).
pub const APP_NAMESPACE: &str = "app";

/// One backend event per description, titled `<namespace>/api: <app>`.
pub async fn send_events(
    client: &Client,
    app: &str,
    namespace: &str,
    events: &[String],
    tags: &[String],
) {
    let title = format!("{namespace}/api: {app}");
    for text in events {
        match client.backend().event(&title, text, tags).await {
            Ok(()) => tracing::info!(event_type = "event", %app, value = %text, "event sent"),
            Err(e) => client.report("event", &title, Err(e)),
        }
    }
}
