use snb_client::ApiError;

/// User-facing failures of the booking flow.
///
/// User cancellation is deliberately absent: dismissing the payment
/// sheet is an expected exit reported through `ConfirmOutcome`, not an
/// error. Cleanup failures never appear here either; they are logged
/// and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The event is misconfigured (no options, missing club fee).
    /// Retrying will not help; an operator has to fix the event.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("You must be signed in to book")]
    NotSignedIn,

    /// The backend rejected the request; `message` is the
    /// backend-supplied text when it sent one.
    #[error("Booking failed ({status}): {message}")]
    Backend { status: u16, message: String },

    /// A successful response was missing a required field.
    #[error("Protocol error: missing {0} in backend response")]
    Protocol(&'static str),

    /// The payment provider reported a hard error (declined
    /// instrument, sheet initialization failure). Message verbatim.
    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Network error: {0}")]
    Network(String),

    /// A booking request is already in flight for this flow.
    #[error("A booking is already in progress")]
    Busy,

    #[error("Invalid attempt state transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl From<ApiError> for BookingError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::OptionsNotConfigured(_) => BookingError::Configuration(
                "No bookable options are configured for this event".to_string(),
            ),
            ApiError::NotAuthenticated => BookingError::NotSignedIn,
            ApiError::Backend { status, message } => BookingError::Backend { status, message },
            ApiError::Protocol(field) => BookingError::Protocol(field),
            ApiError::Identity(e) => BookingError::Network(e.to_string()),
            ApiError::Transport(e) => BookingError::Network(e.to_string()),
        }
    }
}
