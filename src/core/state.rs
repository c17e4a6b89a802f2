//! # Application State
//!
//! Core business state for Fleetdeck. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── vehicles: Vec<Vehicle>          // merged fleet, share-now then free-now
//! ├── is_loading: bool                // waiting for the feeds
//! ├── error: Option<String>           // terminal fetch error
//! ├── sort_order: SortOrder           // table sort direction
//! ├── current_page: usize             // 1-based table page
//! ├── selection: Selection            // highlighted vehicle, shared by both views
//! ├── items_per_page: usize           // page size (config)
//! ├── fleet_generation: u64           // bumped per load; projection cache key
//! ├── last_updated: Option<DateTime>  // when the fleet last loaded
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Local};

use crate::core::config::ResolvedConfig;
use crate::core::projection::{FleetProjection, ProjectionCache, SortOrder};
use crate::core::selection::Selection;
use crate::feed::Vehicle;

pub struct App {
    pub vehicles: Vec<Vehicle>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub sort_order: SortOrder,
    /// 1-based. Never exceeds the projection's total page count (the
    /// reducer guards every page change).
    pub current_page: usize,
    pub selection: Selection,
    pub items_per_page: usize,
    /// Bumped on every successful load so the projection cache can tell
    /// one vehicle list from the next without comparing contents.
    pub fleet_generation: u64,
    pub last_updated: Option<DateTime<Local>>,
    pub status_message: String,
    projection_cache: ProjectionCache,
}

impl App {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            vehicles: Vec::new(),
            is_loading: true, // first fetch starts immediately at mount
            error: None,
            sort_order: SortOrder::default(),
            current_page: 1,
            selection: Selection::default(),
            items_per_page,
            fleet_generation: 0,
            last_updated: None,
            status_message: String::from("Loading fleet..."),
            projection_cache: ProjectionCache::default(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.items_per_page)
    }

    /// The current sorted/paginated view of the fleet. Memoized — cheap to
    /// call per frame, recomputed only when an input changed.
    pub fn projection(&mut self) -> &FleetProjection {
        self.projection_cache.get_or_compute(
            &self.vehicles,
            self.fleet_generation,
            self.sort_order,
            self.current_page,
            self.items_per_page,
        )
    }
}
