// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

use std::sync::Arc;

use crate::auth::JwksManager;
use crate::storage::{TaskDatabase, TaskFeed};

/// Authentication configuration.
///
/// With `jwks` set the server runs in production mode and fully verifies
/// token signatures; without it, tokens are only structurally validated
/// (development mode).
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// JWKS manager for signature verification (production mode).
    pub jwks: Option<JwksManager>,
    /// Expected JWT issuer claim.
    pub issuer: Option<String>,
    /// Expected JWT audience claim.
    pub audience: Option<String>,
}

/// Shared application state.
///
/// The task database is internally synchronized (redb transactions), so the
/// state only wraps it in an `Arc` for cheap cloning into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<TaskDatabase>,
    pub feed: TaskFeed,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(db: TaskDatabase) -> Self {
        Self {
            db: Arc::new(db),
            feed: TaskFeed::new(),
            auth_config: AuthConfig::default(),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }
}
