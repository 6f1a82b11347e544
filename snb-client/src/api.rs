use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snb_catalog::EventOption;
use snb_core::identity::TokenProvider;
use snb_shared::{ClubEvent, Secret};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::app_config::ClientConfig;
use crate::error::ApiError;

/// A provisional booking accepted by the backend, with the
/// payment-intent secret to confirm or cancel it.
#[derive(Debug, Clone)]
pub struct BookingCreated {
    pub booking_id: i64,
    pub payment_secret: Secret<String>,
}

/// Backend operations the booking flow depends on. The flow takes a
/// `dyn BackendApi` so its tests can record calls without a network.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `GET /events/{id}/options`. A 404 means no options were ever
    /// configured for the event.
    async fn fetch_options(&self, event_id: i64) -> Result<Vec<EventOption>, ApiError>;

    /// `POST /events/{id}/book` — reserve a provisional booking for
    /// the selected optional line items and create a payment intent.
    async fn book(
        &self,
        event_id: i64,
        selected_option_ids: &[i64],
    ) -> Result<BookingCreated, ApiError>;

    /// `POST /user-events/{id}/cancel-payment` — void the payment
    /// intent and release the provisional booking. The backend owns
    /// idempotence; repeating the call is safe.
    async fn cancel_payment(&self, booking_id: i64) -> Result<(), ApiError>;

    /// `GET /events/my-events` — events the signed-in user is booked
    /// into.
    async fn my_events(&self) -> Result<Vec<ClubEvent>, ApiError>;

    /// `DELETE /events/withdraw` — leave an already-paid event.
    async fn withdraw(&self, event_id: i64) -> Result<(), ApiError>;
}

/// reqwest-backed client for the club backend.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

#[derive(Debug, Serialize)]
struct BookRequest<'a> {
    selected_option_ids: &'a [i64],
}

#[derive(Debug, Serialize)]
struct WithdrawRequest {
    event_id: i64,
}

/// Single parsing boundary for the book response. Older backend
/// revisions named the secret `stripe_client_secret` or
/// `clientSecret` and the booking id `user_event_id`; the aliases
/// absorb that, and a value missing under every name is a protocol
/// error rather than a silent default.
#[derive(Debug, Deserialize)]
struct BookResponseWire {
    #[serde(
        default,
        alias = "stripe_client_secret",
        alias = "clientSecret"
    )]
    payment_secret: Option<String>,
    #[serde(default, alias = "user_event_id")]
    provisional_booking_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl BackendClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    async fn bearer(&self) -> Result<Secret<String>, ApiError> {
        self.tokens
            .bearer_token()
            .await?
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Turn a non-success response into `ApiError::Backend`, using the
    /// backend's `{"error": ...}` message when it sent one.
    async fn fail(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Backend {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn fetch_options(&self, event_id: i64) -> Result<Vec<EventOption>, ApiError> {
        let response = self
            .http
            .get(format!("{}/events/{event_id}/options", self.base_url))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::OptionsNotConfigured(event_id));
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    async fn book(
        &self,
        event_id: i64,
        selected_option_ids: &[i64],
    ) -> Result<BookingCreated, ApiError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(format!("{}/events/{event_id}/book", self.base_url))
            .bearer_auth(token.expose())
            .json(&BookRequest {
                selected_option_ids,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let wire: BookResponseWire = response.json().await?;
        let payment_secret = wire
            .payment_secret
            .ok_or(ApiError::Protocol("payment_secret"))?;
        let booking_id = wire
            .provisional_booking_id
            .ok_or(ApiError::Protocol("provisional_booking_id"))?;

        info!(event_id, booking_id, "provisional booking created");
        Ok(BookingCreated {
            booking_id,
            payment_secret: Secret::new(payment_secret),
        })
    }

    async fn cancel_payment(&self, booking_id: i64) -> Result<(), ApiError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(format!(
                "{}/user-events/{booking_id}/cancel-payment",
                self.base_url
            ))
            .bearer_auth(token.expose())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        info!(booking_id, "payment intent canceled and booking released");
        Ok(())
    }

    async fn my_events(&self) -> Result<Vec<ClubEvent>, ApiError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/events/my-events", self.base_url))
            .bearer_auth(token.expose())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.json().await?)
    }

    async fn withdraw(&self, event_id: i64) -> Result<(), ApiError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .delete(format!("{}/events/withdraw", self.base_url))
            .bearer_auth(token.expose())
            .json(&WithdrawRequest { event_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        info!(event_id, "withdrawn from event");
        Ok(())
    }
}
