// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! # Task Storage Module
//!
//! Persistent task storage on an embedded redb database, plus the two
//! concerns layered directly on top of it:
//!
//! - `ownership` - the authorization gate run before every update and delete
//! - `feed` - change notifications that keep subscribed list views current
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/tasks.redb
//!   tasks:            task_id → Task (JSON)
//!   owner_task_index: owner_id|task_id → task_id
//! ```
//!
//! The owner index exists so listing a caller's tasks is a prefix range
//! scan rather than a full-table scan. Uniqueness of task ids is redb's
//! concern (primary key) combined with UUIDv4 assignment; this module never
//! validates uniqueness itself.

pub mod feed;
pub mod ownership;
pub mod task_db;

pub use feed::{TaskFeed, TaskSubscription};
pub use ownership::{OwnedResource, OwnershipCheck};
pub use task_db::{StorageError, StorageResult, TaskDatabase};
