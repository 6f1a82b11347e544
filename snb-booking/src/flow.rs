use snb_catalog::{OptionSet, Quote, SelectionState};
use snb_client::{BackendApi, ClientConfig};
use snb_core::payment::{PaymentOutcome, PaymentSheet};
use std::sync::Arc;
use tracing::{info, warn};

use crate::attempt::BookingAttempt;
use crate::error::BookingError;

/// How a confirm run ended when nothing went wrong. A dismissed
/// payment sheet is a normal exit, so it lives here and not in
/// `BookingError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Canceled,
}

type SuccessCallback = Box<dyn Fn() + Send + Sync>;

/// Booking and payment reconciliation for one event card.
///
/// Owns the option set, the user's selection and at most one live
/// [`BookingAttempt`]; drives the backend and the payment sheet, and
/// guarantees that every abandoned attempt is released server-side
/// before the flow returns to idle. One instance per event card; the
/// attempt is never shared across cards.
pub struct BookingFlow {
    event_id: i64,
    backend: Arc<dyn BackendApi>,
    sheet: Arc<dyn PaymentSheet>,
    merchant_display_name: String,
    currency: String,
    on_success: Option<SuccessCallback>,
    options: OptionSet,
    selection: SelectionState,
    attempt: Option<BookingAttempt>,
    // Single-flight guard. `&mut self` already prevents overlap within
    // one task; this flag holds the line when the flow sits behind a
    // lock and UI callbacks interleave across await points.
    in_flight: bool,
}

impl BookingFlow {
    pub fn new(
        event_id: i64,
        backend: Arc<dyn BackendApi>,
        sheet: Arc<dyn PaymentSheet>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            event_id,
            backend,
            sheet,
            merchant_display_name: config.payment.merchant_display_name.clone(),
            currency: config.payment.currency.clone(),
            on_success: None,
            options: OptionSet::default(),
            selection: SelectionState::default(),
            attempt: None,
            in_flight: false,
        }
    }

    /// Invoked exactly once per confirmed payment; the caller uses it
    /// to refresh event and participation data.
    pub fn with_success_callback(mut self, callback: SuccessCallback) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn has_live_attempt(&self) -> bool {
        self.attempt.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn quote(&self) -> Quote {
        Quote::for_selection(&self.options, &self.selection)
    }

    /// Current total as display text, e.g. `"25.00 CHF"`.
    pub fn price_display(&self) -> String {
        self.quote().display(&self.currency)
    }

    /// Load (or reload) the bookable options for this event and reset
    /// the selection to its default (every optional item opted in).
    /// A payment intent obtained before the reload is stale and is
    /// discarded locally.
    pub async fn load_options(&mut self) -> Result<(), BookingError> {
        if self.in_flight {
            return Err(BookingError::Busy);
        }
        self.in_flight = true;
        let result = self.load_options_inner().await;
        self.in_flight = false;
        result
    }

    async fn load_options_inner(&mut self) -> Result<(), BookingError> {
        let raw = self.backend.fetch_options(self.event_id).await?;
        self.options = OptionSet::from_backend(raw);
        self.selection = self.options.default_selection();
        if let Some(stale) = self.attempt.take() {
            info!(
                booking_id = stale.booking_id(),
                "options reloaded, discarding stale booking attempt"
            );
        }
        Ok(())
    }

    /// Flip one optional line item. The price composition changed, so
    /// an existing payment intent no longer matches the selection and
    /// must not be reused; the next confirm starts from scratch.
    pub fn toggle_option(&mut self, option_id: i64) -> Result<Quote, BookingError> {
        if self.in_flight {
            return Err(BookingError::Busy);
        }
        self.selection
            .toggle(&self.options, option_id)
            .map_err(|e| BookingError::Configuration(e.to_string()))?;
        if let Some(stale) = self.attempt.take() {
            info!(
                booking_id = stale.booking_id(),
                option_id, "selection changed, invalidating booking attempt"
            );
        }
        Ok(self.quote())
    }

    /// Run the full booking-and-payment sequence for the current
    /// selection: reserve a provisional booking, drive the payment
    /// sheet, and reconcile the outcome. Whatever happens, the flow is
    /// back in a retryable idle state afterwards.
    pub async fn confirm(&mut self) -> Result<ConfirmOutcome, BookingError> {
        if self.in_flight {
            return Err(BookingError::Busy);
        }
        self.in_flight = true;
        let result = self.confirm_inner().await;
        self.in_flight = false;
        result
    }

    async fn confirm_inner(&mut self) -> Result<ConfirmOutcome, BookingError> {
        if self.options.is_empty() {
            return Err(BookingError::Configuration(
                "No bookable options are configured for this event".to_string(),
            ));
        }
        if !self.options.has_required_club_fee() {
            return Err(BookingError::Configuration(
                "This event has no club fee configured. Please contact the organizer."
                    .to_string(),
            ));
        }

        // A live attempt here means an earlier run was interrupted;
        // release it so the backend holds no orphaned reservation.
        self.release_attempt().await;

        let created = self
            .backend
            .book(self.event_id, &self.selection.selected_ids())
            .await?;
        let attempt = BookingAttempt::new(created);
        let booking_id = attempt.booking_id();
        let secret = attempt.payment_secret().clone();
        // Stored before the sheet runs so release_attempt can reach it
        // on any failure path.
        self.attempt = Some(attempt);

        if let Err(e) = self
            .sheet
            .initialize(&secret, &self.merchant_display_name)
            .await
        {
            self.release_attempt().await;
            return Err(BookingError::Payment(e.to_string()));
        }
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.mark_ready()?;
        }

        match self.sheet.present().await {
            Ok(PaymentOutcome::Confirmed) => {
                self.attempt = None;
                info!(
                    event_id = self.event_id,
                    booking_id, "payment confirmed"
                );
                if let Some(callback) = &self.on_success {
                    callback();
                }
                Ok(ConfirmOutcome::Confirmed)
            }
            Ok(PaymentOutcome::UserCanceled) => {
                info!(event_id = self.event_id, "payment sheet dismissed by user");
                self.release_attempt().await;
                Ok(ConfirmOutcome::Canceled)
            }
            Ok(PaymentOutcome::Failed { message }) => {
                self.release_attempt().await;
                Err(BookingError::Payment(message))
            }
            Err(e) => {
                self.release_attempt().await;
                Err(BookingError::Payment(e.to_string()))
            }
        }
    }

    /// Explicit dismissal of the booking sheet. Releases an
    /// outstanding attempt; never fails toward the caller.
    pub async fn dismiss(&mut self) {
        if self.in_flight {
            warn!(event_id = self.event_id, "dismiss ignored while a request is in flight");
            return;
        }
        self.release_attempt().await;
    }

    /// Tell the backend to void the attempt's payment intent and free
    /// the provisional booking. Best-effort: this always runs next to
    /// an outcome that was already communicated to the user, so its
    /// own failure is only logged. The backend decides whether the
    /// booking is still cancelable, which makes repeats safe.
    async fn release_attempt(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        if let Err(e) = self.backend.cancel_payment(attempt.booking_id()).await {
            warn!(
                booking_id = attempt.booking_id(),
                error = %e,
                "failed to release provisional booking"
            );
        }
    }

    #[cfg(test)]
    fn inject_attempt(&mut self, booking_id: i64, secret: &str) {
        self.attempt = Some(BookingAttempt::new(snb_client::BookingCreated {
            booking_id,
            payment_secret: snb_shared::Secret::new(secret.to_string()),
        }));
    }

    #[cfg(test)]
    fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }
}
