//! # Usersift Architecture
//!
//! Usersift is an interactive terminal browser over a remote user directory. The records are
//! fetched once, then the operator can list them, search them by name with regular expressions,
//! and switch between four presentations.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                           │
//! │  - Builds the real collaborators, maps errors to exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs, screens.rs)                           │
//! │  - Menu state machine, prompts, acknowledgments             │
//! │  - Talks to the operator only through the Terminal trait    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (validate.rs, pattern.rs, filter.rs, present.rs)    │
//! │  - Pure functions over Rust types                           │
//! │  - No I/O whatsoever                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators (fetch.rs, terminal.rs, gridline crate)      │
//! │  - HTTP fetch, line-oriented terminal, table layout         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Collaborators Behind Traits
//!
//! The network and the terminal are reached only through [`fetch::UserSource`] and
//! [`terminal::Terminal`]. The session never touches stdout directly, so a full run (menus,
//! searches, format changes) can be driven in tests by a scripted terminal and canned records.
//!
//! ## Module Overview
//!
//! - [`model`]: Core data types (`UserRecord`, `DisplayMode`, menu choices)
//! - [`validate`]: Turns raw fetched JSON into a `ValidatedUserSet`
//! - [`pattern`]: Search term compilation (regex, literal, fallback)
//! - [`filter`]: Applies a compiled pattern to the record set
//! - [`present`]: The four record presentations
//! - [`fetch`]: The HTTP user source
//! - [`terminal`]: Line-oriented terminal abstraction
//! - [`screens`]: Templated, themed menus and messages
//! - [`session`]: The menu state machine
//! - [`config`]: Session configuration
//! - [`message`]: Leveled operator messages
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod message;
pub mod model;
pub mod pattern;
pub mod present;
pub mod screens;
pub mod session;
pub mod terminal;
pub mod validate;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
