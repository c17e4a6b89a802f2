//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as props:
//! - `TitleBar`: Top status bar showing fleet status and fetch time
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! Components whose cursor state must survive between frames:
//! - `FleetTable`: Paginated vehicle table with a row cursor
//! - `MapView`: Braille-canvas map with a marker cursor
//!
//! The persistent `*State` structs live in `TuiState`; the wrapper is
//! created each frame with borrowed state and props.
//!
//! ## Design Philosophy
//!
//! Components receive external data as props, not by reaching into global
//! state. Both panes derive their highlight from the same
//! `Selection::is_selected` comparison; neither re-derives coordinates or
//! re-discriminates providers — that all happened at feed ingestion.

pub mod fleet_table;
pub mod map_view;
pub mod title_bar;

pub use fleet_table::{FleetTable, FleetTableState};
pub use map_view::{markers_for_page, MapView, MapViewState, MarkerPoint};
pub use title_bar::TitleBar;

/// Braille spinner frames for the loading panes.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
