//! Serverless function boundary client
//!
//! Named functions ("create-payment-link", "send-email") invoked with a
//! JSON body and a bearer token. Responses follow the
//! `{"success": bool, "data": ... | "error": "..."}` envelope.

use serde::Deserialize;
use thiserror::Error;

use crate::utils::RetryPolicy;

/// Function boundary errors
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("Function transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Function {name} failed: {message}")]
    Failed { name: String, message: String },
}

/// Envelope returned by every function
#[derive(Debug, Deserialize)]
struct FunctionResponse {
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct FunctionClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    policy: RetryPolicy,
}

impl FunctionClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            policy,
        }
    }

    /// Invoke a named function with a JSON body
    pub async fn invoke(
        &self,
        name: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, FunctionError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), name);
        let response = self
            .policy
            .run(name, || async {
                self.client
                    .post(&url)
                    .bearer_auth(&self.token)
                    .json(body)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<FunctionResponse>()
                    .await
            })
            .await?;

        if response.success {
            Ok(response.data.unwrap_or(serde_json::Value::Null))
        } else {
            Err(FunctionError::Failed {
                name: name.to_string(),
                message: response
                    .error
                    .unwrap_or_else(|| "unknown function error".to_string()),
            })
        }
    }
}
