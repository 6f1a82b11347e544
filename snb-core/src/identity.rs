use async_trait::async_trait;
use snb_shared::Secret;

use crate::CoreResult;

/// Seam to the identity provider's session.
///
/// The booking flow never reaches into ambient auth context; it is
/// handed one of these at construction so tests can run signed-in or
/// signed-out without a real identity SDK.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, or `None` when no user is signed in.
    async fn bearer_token(&self) -> CoreResult<Option<Secret<String>>>;
}

/// Token provider backed by a fixed token (tests, tooling).
pub struct StaticTokenProvider {
    token: Option<Secret<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(Secret::new(token.into())),
        }
    }

    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> CoreResult<Option<Secret<String>>> {
        Ok(self.token.clone())
    }
}
