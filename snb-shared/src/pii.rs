use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for sensitive values (payment-intent secrets, bearer tokens)
/// that masks its contents in Debug/Display output.
///
/// Prevents accidental leakage through log macros like
/// `tracing::info!("{:?}", attempt)`. Serialization passes the real
/// value through, since the wire needs it.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Secret(value)
    }

    /// Borrow the underlying value. Call sites are the audit trail for
    /// where the secret actually leaves the process.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Secret(value)
    }
}
