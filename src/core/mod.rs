//! # Core Session Logic
//!
//! This module contains Trident's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (models)     │
//!                    │  • Transcript (history) │
//!                    │  • State (session data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐         ┌────────────┐
//!             │    TUI     │         │ inference  │
//!             │  Adapter   │         │ providers  │
//!             │ (ratatui)  │         │            │
//!             └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The immutable model list and category policy
//! - [`message`]: Messages, references, and the append-only transcript
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`config`]: TOML configuration with layered overrides
//! - [`export`]: Markdown transcript export

pub mod action;
pub mod catalog;
pub mod config;
pub mod export;
pub mod message;
pub mod state;
