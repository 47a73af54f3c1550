//! Email notifications
//!
//! Templated status emails sent through the "send-email" function. Always
//! best-effort: the caller logs and continues when a send fails, and a
//! disabled category is a silent no-op.

use serde_json::json;

use crate::db::EmailSettingsRepository;

use super::functions::{FunctionClient, FunctionError};

#[derive(Clone)]
pub struct EmailService {
    functions: FunctionClient,
    settings: EmailSettingsRepository,
    /// Config master switch; overrides stored settings when false
    enabled: bool,
}

impl EmailService {
    pub fn new(functions: FunctionClient, settings: EmailSettingsRepository, enabled: bool) -> Self {
        Self {
            functions,
            settings,
            enabled,
        }
    }

    /// Whether emails for this category would currently be sent
    pub async fn category_enabled(&self, category: &str) -> bool {
        if !self.enabled {
            return false;
        }
        match self.settings.get().await {
            Ok(s) => s.category_enabled(category),
            Err(_) => false,
        }
    }

    /// Send a templated status email
    ///
    /// Skips silently when notifications are disabled for the category or
    /// there is no recipient.
    pub async fn send_status_email(
        &self,
        recipient: Option<&str>,
        category: &str,
        subject: &str,
        context: serde_json::Value,
    ) -> Result<(), FunctionError> {
        if !self.category_enabled(category).await {
            tracing::debug!(category, "email category disabled, skipping");
            return Ok(());
        }
        let Some(to) = recipient else {
            tracing::debug!(category, "no recipient on record, skipping email");
            return Ok(());
        };

        let body = json!({
            "to": to,
            "template": category,
            "subject": subject,
            "context": context,
        });
        self.functions.invoke("send-email", &body).await?;
        tracing::info!(to, category, "status email sent");
        Ok(())
    }
}
