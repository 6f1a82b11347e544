/// Errors from the backend API client.
///
/// `OptionsNotConfigured` and `NotAuthenticated` get their own
/// variants because the booking flow reacts to them differently from
/// a generic backend failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No bookable options configured for event {0}")]
    OptionsNotConfigured(i64),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Missing required field in backend response: {0}")]
    Protocol(&'static str),

    #[error("No user is signed in")]
    NotAuthenticated,

    #[error("Identity provider error: {0}")]
    Identity(#[from] snb_core::CoreError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
