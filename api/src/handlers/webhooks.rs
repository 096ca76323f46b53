//! Webhook handlers
//!
//! Handler for the judge-bot webhook deliveries.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::app::DispatchOutcome;
use crate::domain::entities::WebhookPayload;
use crate::error::AppError;
use crate::AppState;

/// Verify HMAC-SHA256 signature
fn verify_signature(payload: &[u8], signature: Option<&str>, secret: &Option<String>) -> bool {
    let Some(secret) = secret else {
        // No secret configured, skip verification (development mode)
        tracing::warn!("Webhook secret not configured, skipping signature verification");
        return true;
    };

    let Some(sig_header) = signature else {
        tracing::warn!("No signature provided in webhook request");
        return false;
    };

    // Bots send the signature as "sha256=<hex>"
    let expected_hex = sig_header.strip_prefix("sha256=").unwrap_or(sig_header);

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => {
            tracing::error!("Invalid webhook secret key");
            return false;
        }
    };

    mac.update(payload);

    let expected_bytes = match hex::decode(expected_hex) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid signature format");
            return false;
        }
    };

    mac.verify_slice(&expected_bytes).is_ok()
}

/// Acknowledgement body returned to the judge bot.
#[derive(Serialize)]
pub struct WebhookAck {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
}

impl From<DispatchOutcome> for WebhookAck {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::StandingsAdded { sheet_name } => WebhookAck {
                result: "standings_added",
                sheet_name: Some(sheet_name),
                applied: None,
                skipped: None,
            },
            DispatchOutcome::AlreadyProcessed { sheet_name } => WebhookAck {
                result: "already_processed",
                sheet_name: Some(sheet_name),
                applied: None,
                skipped: None,
            },
            DispatchOutcome::RatingsUpdated { applied, skipped } => WebhookAck {
                result: "ratings_updated",
                sheet_name: None,
                applied: Some(applied),
                skipped: Some(skipped),
            },
        }
    }
}

/// POST /webhooks/judge
///
/// Handle a judge-bot delivery: add a contest's standings or apply a batch
/// of rating changes.
pub async fn judge_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    // Verify signature
    let signature = headers
        .get("X-Judge-Signature")
        .and_then(|h| h.to_str().ok());

    if !verify_signature(&body, signature, &state.config.webhook_secret) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::Unauthorized);
    }

    // Parse JSON payload
    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        AppError::BadRequest(format!("Invalid JSON: {}", e))
    })?;

    tracing::info!(
        action = match &payload {
            WebhookPayload::AddStandings(_) => "add_standings",
            WebhookPayload::UpdateRatings(_) => "update_ratings",
        },
        "Received judge webhook"
    );

    let outcome = state.dispatch.dispatch(payload).await?;
    Ok(Json(outcome.into()))
}
