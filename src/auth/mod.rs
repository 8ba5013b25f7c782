// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! # Authentication Module
//!
//! Identity resolution for the Taskboard API: every request's bearer JWT is
//! resolved server-side into a single trusted `user_id` before any task
//! operation runs.
//!
//! ## Auth Flow
//!
//! 1. Frontend authenticates the user with the identity provider
//! 2. Frontend sends `Authorization: Bearer <JWT>`
//! 3. Server:
//!    - Fetches the provider's JWKS via HTTPS (cached with TTL)
//!    - Verifies JWT signature, expiry, issuer, audience
//!    - Extracts `sub` → canonical `user_id`
//!
//! ## Security
//!
//! - All task endpoints require authentication; only health probes are open
//! - The resolved `user_id` is authoritative: no client-supplied id is ever
//!   trusted as the caller's identity, for listing or for mutation
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::JwksManager;
