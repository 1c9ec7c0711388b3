//! # Clipdeck
//!
//! A curation board for short-form video links, usable both as a standalone
//! binary and as a library.
//!
//! An admin maintains a catalog of TikTok links grouped by category; a public
//! gallery reads them. Submitted URLs run through a resolver that follows
//! short-link redirects and extracts the canonical numeric video id before
//! anything is persisted.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! clipdeck = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use clipdeck::auth::SessionGate;
//! use clipdeck::resolver::UrlResolver;
//! use clipdeck::server::{AppState, create_router};
//! use clipdeck::store::{AdminStore, SqliteStore};
//!
//! let store = Arc::new(SqliteStore::new(&PathBuf::from("./data/clipdeck.db")).unwrap());
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     read_store: store.clone(),
//!     admin_store: store,
//!     sessions: SessionGate::new("hunter2".into(), b"signing-secret"),
//!     resolver: UrlResolver::new(),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI entry point. Disable with
//!   `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
pub mod store;
pub mod types;
