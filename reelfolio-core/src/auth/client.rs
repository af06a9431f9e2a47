use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ContentError, Result};

/// The signed-in user behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub email: String,
}

#[async_trait]
pub trait AuthClient: Send + Sync + fmt::Debug {
    /// `Ok(None)` when the token is unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<AdminIdentity>>;
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(default)]
    email: Option<String>,
}

/// Resolves tokens with `GET {base}/auth/v1/user`.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl fmt::Debug for SupabaseAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseAuthClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SupabaseAuthClient {
    pub fn new(
        base_url: &str,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ContentError::NotConfigured(
                "auth service base URL".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ContentError::Internal(format!("Failed to build auth client: {e}"))
            })?;
        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn resolve(&self, token: &str) -> Result<Option<AdminIdentity>> {
        let mut request = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(token);
        if !self.anon_key.is_empty() {
            request = request.header("apikey", &self.anon_key);
        }
        let response = request.send().await.map_err(|e| {
            ContentError::Internal(format!("Auth service unreachable: {e}"))
        })?;
        match response.status() {
            status if status.is_success() => {
                let user: AuthUser = response.json().await.map_err(|e| {
                    ContentError::Internal(format!(
                        "Invalid auth service response: {e}"
                    ))
                })?;
                Ok(user
                    .email
                    .filter(|e| !e.trim().is_empty())
                    .map(|email| AdminIdentity { email }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("auth service rejected token");
                Ok(None)
            }
            status => Err(ContentError::Internal(format!(
                "Auth service responded with {status}"
            ))),
        }
    }
}

/// Fixed token table, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(
        mut self,
        token: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.tokens.insert(token.into(), email.into());
        self
    }
}

#[async_trait]
impl AuthClient for StaticTokenAuth {
    async fn resolve(&self, token: &str) -> Result<Option<AdminIdentity>> {
        Ok(self.tokens.get(token).map(|email| AdminIdentity {
            email: email.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_tokens_resolve() {
        let auth = StaticTokenAuth::new().with_token("t1", "ana@example.com");
        assert_eq!(
            auth.resolve("t1").await.unwrap(),
            Some(AdminIdentity {
                email: "ana@example.com".into()
            })
        );
        assert_eq!(auth.resolve("nope").await.unwrap(), None);
    }

    #[test]
    fn blank_base_is_not_configured() {
        let err = SupabaseAuthClient::new(" ", "", Duration::from_secs(1))
            .expect_err("blank base");
        assert!(matches!(err, ContentError::NotConfigured(_)));
    }
}
