//! Current-user lookup.
//!
//! The host application's session system decides who is calling; the API
//! only needs a "current user or none" answer. [`TokenAuthenticator`] is the
//! bundled implementation: configured access tokens presented as a bearer
//! token or an `access_token` cookie.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use tracing::debug;

use photobridge_core::Result;

/// Environment variable listing accepted tokens as `name=token` entries.
pub const ENV_ACCESS_TOKENS: &str = "PHOTOBRIDGE_ACCESS_TOKENS";

/// Cookie consulted when no bearer token is present.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
}

/// Resolves the caller of a request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `Ok(None)` means the request carries no valid credentials.
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<CurrentUser>>;
}

/// Accepts a fixed set of access tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl TokenAuthenticator {
    /// Parse comma-separated `name=token` entries. A bare token is named
    /// `user`.
    pub fn parse(spec: &str) -> Self {
        let tokens = spec
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.split_once('=') {
                Some((name, token)) => {
                    let (name, token) = (name.trim(), token.trim());
                    (!token.is_empty()).then(|| (token.to_string(), name.to_string()))
                }
                None => Some((entry.to_string(), "user".to_string())),
            })
            .collect();
        Self { tokens }
    }

    pub fn from_env() -> Self {
        Self::parse(&std::env::var(ENV_ACCESS_TOKENS).unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn lookup(&self, token: &str) -> Option<CurrentUser> {
        self.tokens.get(token).map(|name| CurrentUser { name: name.clone() })
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<CurrentUser>> {
        if let Some(token) = bearer_token(headers) {
            if let Some(user) = self.lookup(token) {
                return Ok(Some(user));
            }
        }
        if let Some(token) = cookie_value(headers, ACCESS_TOKEN_COOKIE) {
            if let Some(user) = self.lookup(token) {
                return Ok(Some(user));
            }
        }
        debug!(
            subsystem = "api",
            component = "auth",
            "Request carries no accepted credentials"
        );
        Ok(None)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|t| !t.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}
