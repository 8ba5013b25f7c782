// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Authenticated caller representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authenticated user information extracted from a verified JWT.
///
/// `user_id` is the token's `sub` claim and is the identity every task
/// operation is scoped to: list filters on it and the ownership gate
/// compares stored `owner_id` against it. It is stable for a given caller
/// (the identity provider guarantees `sub` round-trips) and never comes
/// from request parameters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID (JWT `sub` claim).
    pub user_id: String,

    /// Session ID, when the identity provider includes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Original issuer (kept for logging, not serialized).
    #[serde(skip)]
    pub issuer: String,

    /// Token expiration (Unix timestamp, kept for logging, not serialized).
    #[serde(skip)]
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_omits_internal_fields() {
        let user = AuthenticatedUser {
            user_id: "user_123".to_string(),
            session_id: None,
            issuer: "https://clerk.example.com".to_string(),
            expires_at: 1700003600,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_id"], "user_123");
        assert!(json.get("issuer").is_none());
        assert!(json.get("expires_at").is_none());
        assert!(json.get("session_id").is_none());
    }
}
