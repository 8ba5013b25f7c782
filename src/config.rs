// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! # Runtime Configuration Constants
//!
//! Environment variable names and default values used throughout the
//! application. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the task database | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `CLERK_JWKS_URL` | JWKS endpoint for JWT verification | Required for production |
//! | `CLERK_ISSUER` | Expected JWT issuer claim | Required for production |
//! | `CLERK_AUDIENCE` | Expected JWT audience claim | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! When `CLERK_JWKS_URL` is absent the server runs in development mode:
//! tokens are decoded without signature verification.

/// Environment variable name for the data directory path.
///
/// The task database file (`tasks.redb`) is created inside this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Filename of the embedded task database inside the data directory.
pub const TASK_DB_FILE: &str = "tasks.redb";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable name for the JWKS endpoint URL.
pub const JWKS_URL_ENV: &str = "CLERK_JWKS_URL";

/// Environment variable name for the expected JWT issuer.
pub const ISSUER_ENV: &str = "CLERK_ISSUER";

/// Environment variable name for the expected JWT audience.
pub const AUDIENCE_ENV: &str = "CLERK_AUDIENCE";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";
