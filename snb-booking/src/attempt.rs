use snb_client::BookingCreated;
use snb_shared::Secret;

use crate::error::BookingError;

/// States an in-flight attempt passes through while it exists.
///
/// The terminal states (confirmed, released) have no variant: reaching
/// either consumes the attempt, so the flow holding `None` *is* the
/// terminal representation. That makes "no stale secret survives"
/// structural rather than a convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Backend accepted the booking and issued a payment intent.
    IntentCreated,
    /// Payment sheet initialized against the intent's secret.
    Ready,
}

impl AttemptState {
    fn name(self) -> &'static str {
        match self {
            AttemptState::IntentCreated => "INTENT_CREATED",
            AttemptState::Ready => "READY",
        }
    }
}

/// Ephemeral record of one provisional reservation: the backend's
/// booking id plus the payment-intent secret that confirms or voids
/// it. At most one exists per flow instance.
#[derive(Debug)]
pub struct BookingAttempt {
    booking_id: i64,
    payment_secret: Secret<String>,
    state: AttemptState,
}

impl BookingAttempt {
    pub fn new(created: BookingCreated) -> Self {
        Self {
            booking_id: created.booking_id,
            payment_secret: created.payment_secret,
            state: AttemptState::IntentCreated,
        }
    }

    pub fn booking_id(&self) -> i64 {
        self.booking_id
    }

    pub fn payment_secret(&self) -> &Secret<String> {
        &self.payment_secret
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Transition: `INTENT_CREATED` -> `READY`, once the payment sheet
    /// has been initialized with this attempt's secret.
    pub fn mark_ready(&mut self) -> Result<(), BookingError> {
        if self.state != AttemptState::IntentCreated {
            return Err(BookingError::InvalidTransition {
                from: self.state.name(),
                to: AttemptState::Ready.name(),
            });
        }
        self.state = AttemptState::Ready;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> BookingAttempt {
        BookingAttempt::new(BookingCreated {
            booking_id: 42,
            payment_secret: Secret::new("sk_1".to_string()),
        })
    }

    #[test]
    fn new_attempt_starts_with_intent_created() {
        let attempt = attempt();
        assert_eq!(attempt.state(), AttemptState::IntentCreated);
        assert_eq!(attempt.booking_id(), 42);
        assert_eq!(attempt.payment_secret().expose(), "sk_1");
    }

    #[test]
    fn mark_ready_is_a_one_way_transition() {
        let mut attempt = attempt();
        attempt.mark_ready().unwrap();
        assert_eq!(attempt.state(), AttemptState::Ready);

        let err = attempt.mark_ready().unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition {
                from: "READY",
                to: "READY"
            }
        ));
    }

    #[test]
    fn debug_output_masks_the_secret() {
        let attempt = attempt();
        let debug = format!("{attempt:?}");
        assert!(!debug.contains("sk_1"));
    }
}
