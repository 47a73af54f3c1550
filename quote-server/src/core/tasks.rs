//! Background tasks
//!
//! Two periodic loops run alongside the HTTP server:
//!
//! - exchange-rate refresh from the live source (skipped when no source
//!   URL is configured; seed rates keep serving)
//! - quote expiry sweep, transitioning overdue quotes to `expired`

use std::time::Duration;

use chrono::Utc;

use shared::models::TransitionTrigger;
use shared::QuoteStatus;

use crate::core::ServerState;
use crate::utils::RetryPolicy;

/// Spawn all background loops. Tasks run for the life of the process.
pub fn start_background_tasks(state: &ServerState) {
    spawn_rate_refresher(state.clone());
    spawn_expiry_sweep(state.clone());
}

fn spawn_rate_refresher(state: ServerState) {
    let url = state.config.rate_source_url.clone();
    if url.is_empty() {
        tracing::info!("no rate source configured, keeping seed exchange rates");
        return;
    }
    let interval = Duration::from_secs(state.config.rate_refresh_secs.max(60));
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let policy = RetryPolicy::default();
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = state.rates.refresh_from(&client, &url, &policy).await {
                tracing::warn!(error = %e, "rate refresh failed, keeping last-known rates");
            }
        }
    });
    tracing::info!(interval_secs = interval.as_secs(), "rate refresher started");
}

/// Sweep runs hourly; per-quote failures are logged and the sweep continues
fn spawn_expiry_sweep(state: ServerState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(3600));
        loop {
            ticker.tick().await;
            sweep_expired_quotes(&state).await;
        }
    });
    tracing::info!("quote expiry sweep started");
}

async fn sweep_expired_quotes(state: &ServerState) {
    let overdue = match state.quotes.find_expired(Utc::now()).await {
        Ok(quotes) => quotes,
        Err(e) => {
            tracing::warn!(error = %e, "expiry sweep could not list quotes");
            return;
        }
    };
    if overdue.is_empty() {
        return;
    }

    let mut expired = 0;
    for quote in &overdue {
        match state
            .engine
            .transition_quote(
                &quote.id,
                quote.status,
                QuoteStatus::Expired,
                TransitionTrigger::QuoteExpired,
                None,
            )
            .await
        {
            Ok(_) => expired += 1,
            Err(e) => {
                tracing::warn!(quote_id = %quote.id, error = %e, "expiry transition failed");
            }
        }
    }
    tracing::info!(expired, candidates = overdue.len(), "expiry sweep finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[tokio::test]
    async fn test_sweep_expires_overdue_quotes() {
        let config = Config::from_env();
        let state = ServerState::initialize(&config).await;

        let quote = state
            .quote_service
            .create(shared::models::QuoteCreate {
                origin_country: "US".into(),
                destination_country: "NP".into(),
                items: vec![shared::models::QuoteItemCreate {
                    name: "Widget".into(),
                    quantity: 1,
                    unit_price_usd: 20.0,
                    weight_kg: 0.5,
                    hsn_code: None,
                    use_hsn_rate: false,
                    discount_percentage: 0.0,
                }],
                shipping_method: Default::default(),
                insurance_required: false,
                handling_fee_type: Default::default(),
                customer_currency: None,
                customer_email: None,
            })
            .await
            .unwrap();

        // Backdate the expiry so the sweep picks it up
        {
            let mut entry = state.store.quotes.get_mut(&quote.id).unwrap();
            entry.expires_at = Utc::now() - chrono::Duration::days(1);
        }

        sweep_expired_quotes(&state).await;

        let swept = state.quotes.find_by_id(&quote.id).await.unwrap().unwrap();
        assert_eq!(swept.status, QuoteStatus::Expired);
    }

    #[tokio::test]
    async fn test_sweep_skips_paid_quotes() {
        let config = Config::from_env();
        let state = ServerState::initialize(&config).await;

        let quote = state
            .quote_service
            .create(shared::models::QuoteCreate {
                origin_country: "US".into(),
                destination_country: "US".into(),
                items: vec![],
                shipping_method: Default::default(),
                insurance_required: false,
                handling_fee_type: Default::default(),
                customer_currency: None,
                customer_email: None,
            })
            .await
            .unwrap();

        {
            let mut entry = state.store.quotes.get_mut(&quote.id).unwrap();
            entry.status = QuoteStatus::Paid;
            entry.expires_at = Utc::now() - chrono::Duration::days(1);
        }

        sweep_expired_quotes(&state).await;

        let after = state.quotes.find_by_id(&quote.id).await.unwrap().unwrap();
        assert_eq!(after.status, QuoteStatus::Paid);
    }
}
