//! Authorization header resolution
//!
//! Credentials reach this system as an opaque bearer token; this module turns
//! the raw `Authorization` header into an [`AuthContext`]. The broker performs
//! no credential validation of its own and trusts the resolved identities.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AskUserError, Result};

/// Identities resolved from a request's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: String,
    pub ai_id: String,
    /// Display-only fragment of the credential, safe to echo to the dashboard.
    pub key_hint: String,
}

/// Pluggable header-to-identity resolution, so deployments can swap the token
/// format without touching the broker or the adapters.
pub type AuthResolver = Arc<dyn Fn(&str) -> Result<AuthContext> + Send + Sync>;

/// Trailing secret characters exposed as `key_hint`.
const KEY_HINT_LEN: usize = 4;

/// Parse an `Authorization` header of the form `Bearer <user>:<ai>:<secret>`.
///
/// The `Bearer ` prefix is optional, case-insensitive, and stripped
/// repeatedly; dashboards occasionally paste a token that already carries
/// the prefix. All three token segments must be non-empty.
pub fn parse_authorization(header: &str) -> Result<AuthContext> {
    let token = strip_bearer_prefix(header);
    if token.is_empty() {
        return Err(AskUserError::InvalidAuthorization);
    }

    let mut parts = token.splitn(3, ':');
    let (user, ai, secret) = match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(ai), Some(secret))
            if !user.is_empty() && !ai.is_empty() && !secret.is_empty() =>
        {
            (user, ai, secret)
        }
        _ => return Err(AskUserError::InvalidAuthorization),
    };

    let hint: Vec<char> = secret.chars().rev().take(KEY_HINT_LEN).collect();
    Ok(AuthContext {
        user_id: user.to_string(),
        ai_id: ai.to_string(),
        key_hint: hint.into_iter().rev().collect(),
    })
}

fn strip_bearer_prefix(header: &str) -> &str {
    let mut rest = header.trim();
    while let Some(prefix) = rest.get(..7) {
        if !prefix.eq_ignore_ascii_case("bearer ") {
            break;
        }
        rest = rest[7..].trim_start();
    }
    rest
}
