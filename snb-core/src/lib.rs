pub mod identity;
pub mod payment;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Payment sheet error: {0}")]
    PaymentError(String),
    #[error("Identity error: {0}")]
    IdentityError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
