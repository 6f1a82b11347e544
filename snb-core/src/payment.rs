use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snb_shared::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{CoreError, CoreResult};

/// Outcome of presenting the payment sheet to the user.
///
/// `UserCanceled` is an expected exit, not a failure; `Failed` carries
/// the provider's message verbatim (e.g. a decline reason).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentOutcome {
    Confirmed,
    UserCanceled,
    Failed { message: String },
}

/// Seam to the payment provider's sheet UI (card entry, confirmation).
///
/// The provider owns PCI handling and the actual charge; this trait
/// only drives its two entry points against a payment-intent secret
/// obtained from the backend.
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    /// Prepare the sheet for the given payment-intent secret.
    async fn initialize(
        &self,
        secret: &Secret<String>,
        merchant_display_name: &str,
    ) -> CoreResult<()>;

    /// Show the sheet and wait for the user to complete or dismiss it.
    async fn present(&self) -> CoreResult<PaymentOutcome>;
}

/// Scriptable payment sheet for tests and local development.
pub struct MockPaymentSheet {
    outcome: PaymentOutcome,
    init_error: Option<String>,
    initialized_secrets: Mutex<Vec<String>>,
    present_calls: AtomicUsize,
}

impl MockPaymentSheet {
    pub fn returning(outcome: PaymentOutcome) -> Self {
        Self {
            outcome,
            init_error: None,
            initialized_secrets: Mutex::new(Vec::new()),
            present_calls: AtomicUsize::new(0),
        }
    }

    /// A sheet whose initialization fails before it is ever shown.
    pub fn failing_init(message: &str) -> Self {
        Self {
            outcome: PaymentOutcome::Confirmed,
            init_error: Some(message.to_string()),
            initialized_secrets: Mutex::new(Vec::new()),
            present_calls: AtomicUsize::new(0),
        }
    }

    /// Secrets the sheet was initialized with, in call order.
    pub fn initialized_secrets(&self) -> Vec<String> {
        self.initialized_secrets.lock().unwrap().clone()
    }

    pub fn present_calls(&self) -> usize {
        self.present_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentSheet for MockPaymentSheet {
    async fn initialize(
        &self,
        secret: &Secret<String>,
        merchant_display_name: &str,
    ) -> CoreResult<()> {
        if let Some(message) = &self.init_error {
            return Err(CoreError::PaymentError(message.clone()));
        }
        tracing::info!(merchant_display_name, "mock payment sheet initialized");
        self.initialized_secrets
            .lock()
            .unwrap()
            .push(secret.expose().clone());
        Ok(())
    }

    async fn present(&self) -> CoreResult<PaymentOutcome> {
        self.present_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_sheet_records_secrets_and_calls() {
        let sheet = MockPaymentSheet::returning(PaymentOutcome::Confirmed);
        sheet
            .initialize(&Secret::new("sk_1".to_string()), "SnB Club")
            .await
            .unwrap();
        let outcome = sheet.present().await.unwrap();

        assert_eq!(outcome, PaymentOutcome::Confirmed);
        assert_eq!(sheet.initialized_secrets(), vec!["sk_1".to_string()]);
        assert_eq!(sheet.present_calls(), 1);
    }

    #[tokio::test]
    async fn failing_init_surfaces_provider_message() {
        let sheet = MockPaymentSheet::failing_init("no publishable key");
        let err = sheet
            .initialize(&Secret::new("sk_1".to_string()), "SnB Club")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no publishable key"));
        assert_eq!(sheet.present_calls(), 0);
    }
}
