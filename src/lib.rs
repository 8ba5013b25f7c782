// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Taskboard Server - Task Dashboard Backend
//!
//! HTTP API for a task-management dashboard. Every caller is resolved to a
//! trusted identity from a bearer JWT, every task carries its creator as an
//! immutable owner, and every mutation of an existing task passes an
//! ownership gate before the write.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Identity resolution (JWT / JWKS)
//! - `storage` - Embedded task database (redb), ownership gate, change feed

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
