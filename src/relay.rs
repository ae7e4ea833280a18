//! Best-effort forwarding of logged meals to an external webhook.
//!
//! The relay is a side channel, never a source of truth: every failure mode
//! (unconfigured endpoint, network error, timeout, non-2xx status) collapses
//! into a non-fatal outcome and the local save stands on its own.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Serialize;

use crate::models::{Meal, User};

/// How a relay attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayOutcome {
    /// The webhook accepted the meal with a 2xx status
    Delivered,
    /// No endpoint is configured; nothing was attempted
    Skipped,
    /// The attempt failed or timed out; the meal is saved locally only
    Failed,
}

/// JSON body POSTed to the webhook
///
/// Carries the user's identity fields alongside the meal, including the
/// redundant legacy `userEmail`/`userName` pair (already on the meal) for
/// consumers of the old payload shape.
#[derive(Serialize)]
struct RelayPayload<'a> {
    #[serde(flatten)]
    meal: &'a Meal,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
}

/// HTTP client for the webhook relay
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl RelayClient {
    /// Build a relay client with a bounded per-request timeout
    ///
    /// `endpoint = None` disables the relay; every forward is then `Skipped`.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    /// Forward one meal to the webhook, swallowing every failure
    pub async fn forward(&self, meal: &Meal, user: &User) -> RelayOutcome {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!("Relay endpoint not configured, skipping");
            return RelayOutcome::Skipped;
        };

        let payload = RelayPayload {
            meal,
            name: &user.name,
            email: &user.email,
            phone: &user.phone,
        };

        let result = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Meal relayed to webhook for {}", user.email);
                RelayOutcome::Delivered
            }
            Ok(response) => {
                tracing::warn!(
                    "Webhook rejected meal for {}: HTTP {}",
                    user.email,
                    response.status()
                );
                RelayOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Webhook relay failed for {}: {}", user.email, e);
                RelayOutcome::Failed
            }
        }
    }
}
