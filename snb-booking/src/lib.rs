pub mod attempt;
pub mod error;
pub mod flow;

pub use attempt::{AttemptState, BookingAttempt};
pub use error::BookingError;
pub use flow::{BookingFlow, ConfirmOutcome};
