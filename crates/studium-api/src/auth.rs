//! Identity verification.
//!
//! Real identity providers (OAuth, Firebase, ...) plug in behind the
//! `IdentityVerifier` trait; this module ships a static token table for
//! development and self-hosted deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use tracing::warn;

use studium_core::{Error, IdentityVerifier, Result};

/// Owner id used when a request carries no Authorization header.
pub const ANONYMOUS_OWNER: &str = "default";

/// Verifier backed by a static `token -> user id` table.
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Parse `STUDIUM_API_TOKENS` ("token:user,token2:user2"). An unset or
    /// empty variable yields an empty table, so every bearer token is
    /// rejected and only anonymous access works.
    pub fn from_env() -> Self {
        let raw = std::env::var("STUDIUM_API_TOKENS").unwrap_or_default();
        let tokens = raw
            .split(',')
            .filter_map(|pair| {
                let (token, user) = pair.split_once(':')?;
                let (token, user) = (token.trim(), user.trim());
                if token.is_empty() || user.is_empty() {
                    return None;
                }
                Some((token.to_string(), user.to_string()))
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<String> {
        match self.tokens.get(token) {
            Some(user) => Ok(user.clone()),
            None => {
                warn!(subsystem = "api", component = "auth", "Rejected bearer token");
                Err(Error::Unauthorized("unknown bearer token".into()))
            }
        }
    }
}

/// Resolve the owner for a request: verify the bearer token when present,
/// fall back to the anonymous owner otherwise.
pub async fn resolve_owner(
    verifier: &Arc<dyn IdentityVerifier>,
    headers: &HeaderMap,
) -> Result<String> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(ANONYMOUS_OWNER.to_string());
    };

    let value = value
        .to_str()
        .map_err(|_| Error::Unauthorized("malformed Authorization header".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("expected a bearer token".into()))?;

    verifier.verify(token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> Arc<dyn IdentityVerifier> {
        let mut tokens = HashMap::new();
        tokens.insert("secret-1".to_string(), "alice".to_string());
        Arc::new(StaticTokenVerifier::new(tokens))
    }

    #[tokio::test]
    async fn test_known_token_resolves_user() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer secret-1".parse().unwrap());
        let owner = resolve_owner(&verifier(), &headers).await.unwrap();
        assert_eq!(owner, "alice");
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() {
        let owner = resolve_owner(&verifier(), &HeaderMap::new()).await.unwrap();
        assert_eq!(owner, ANONYMOUS_OWNER);
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer wrong".parse().unwrap());
        let err = resolve_owner(&verifier(), &headers).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcg==".parse().unwrap());
        let err = resolve_owner(&verifier(), &headers).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
