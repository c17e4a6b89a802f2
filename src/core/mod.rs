//! # Core Application Logic
//!
//! This module contains Fleetdeck's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Projection (derive)  │
//!                    │  • Selection (shared)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │  Map pane  │                          │ Table pane │
//!     │ (ratatui)  │                          │ (ratatui)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`projection`]: Sorted/paginated derivations of the fleet (memoized)
//! - [`selection`]: The one highlighted vehicle, shared by map and table
//! - [`config`]: Layered configuration (defaults → file → env → CLI)

pub mod action;
pub mod config;
pub mod projection;
pub mod selection;
pub mod state;
