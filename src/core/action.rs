//! # Actions
//!
//! Everything that can happen in Fleetdeck becomes an `Action`.
//! User toggles the sort column? That's `Action::ToggleSort`.
//! The feeds respond? That's `Action::FleetLoaded(vehicles)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the event loop what (if any)
//! I/O to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state.
//! And debuggable: log every action, replay the exact session.

use chrono::Local;
use log::debug;

use crate::core::projection::SortOrder;
use crate::core::state::App;
use crate::feed::{Vehicle, VehicleId};

#[derive(Debug)]
pub enum Action {
    /// Both feeds settled successfully; here is the merged fleet.
    FleetLoaded(Vec<Vehicle>),
    /// Either feed failed; no partial fleet is ever published.
    FleetFailed(String),
    SetSortOrder(SortOrder),
    ToggleSort,
    /// Jump to a 1-based page. Out-of-range requests are silently ignored.
    SetPage(usize),
    /// Replace the selection; `None` clears it in both views.
    Select(Option<VehicleId>),
    /// Re-fetch both feeds. Ignored while a fetch is already in flight.
    Refresh,
    Quit,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a background fleet fetch.
    SpawnFetch,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::FleetLoaded(vehicles) => {
            // A selection that no longer resolves in the new list would
            // silently highlight nothing; drop it instead.
            if let Some(key) = app.selection.get()
                && !vehicles.iter().any(|v| v.key() == key)
            {
                app.selection.select(None);
            }

            app.vehicles = vehicles;
            app.error = None;
            app.is_loading = false;
            app.current_page = 1;
            app.fleet_generation += 1;
            app.last_updated = Some(Local::now());
            app.status_message = format!("{} vehicles", app.vehicles.len());
            Effect::None
        }
        Action::FleetFailed(message) => {
            // Keep whatever fleet we already have: stale-but-valid, or
            // empty if the very first fetch failed.
            app.error = Some(message);
            app.is_loading = false;
            app.status_message = String::from("Fleet fetch failed");
            Effect::None
        }
        Action::SetSortOrder(order) => apply_sort(app, order),
        Action::ToggleSort => apply_sort(app, app.sort_order.toggled()),
        Action::SetPage(page) => {
            // Callers pre-guard, but the store doesn't rely on that.
            let total_pages = app.projection().total_pages;
            if (1..=total_pages).contains(&page) {
                app.current_page = page;
            }
            Effect::None
        }
        Action::Select(id) => {
            app.selection.select(id);
            Effect::None
        }
        Action::Refresh => {
            if app.is_loading {
                return Effect::None;
            }
            app.is_loading = true;
            app.error = None;
            app.status_message = String::from("Refreshing fleet...");
            Effect::SpawnFetch
        }
        Action::Quit => Effect::Quit,
    }
}

/// Sort changes always snap back to page 1: the old page number has no
/// meaning against a freshly-sorted order, so the reset is unconditional
/// rather than a clamp.
fn apply_sort(app: &mut App, order: SortOrder) -> Effect {
    app.sort_order = order;
    app.current_page = 1;
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Provider;
    use crate::test_support::{poi_vehicle, share_vehicle, test_app};

    /// An app with enough vehicles for three pages (items_per_page = 2).
    fn loaded_app() -> App {
        let mut app = test_app();
        app.items_per_page = 2;
        let fleet = vec![
            share_vehicle(1, "HH-A 1"),
            share_vehicle(2, "HH-B 2"),
            share_vehicle(3, "HH-C 3"),
            poi_vehicle(4, "HH-D 4"),
            poi_vehicle(5, "HH-E 5"),
        ];
        update(&mut app, Action::FleetLoaded(fleet));
        app
    }

    #[test]
    fn test_fleet_loaded_publishes_and_clears_error() {
        let mut app = test_app();
        app.error = Some("old failure".to_string());

        let effect = update(
            &mut app,
            Action::FleetLoaded(vec![share_vehicle(1, "HH-A 1")]),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.vehicles.len(), 1);
        assert!(!app.is_loading);
        assert!(app.error.is_none());
        assert_eq!(app.fleet_generation, 1);
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn test_fleet_failed_on_first_fetch_leaves_empty_fleet() {
        let mut app = test_app();

        update(&mut app, Action::FleetFailed("connection refused".into()));

        assert!(!app.is_loading);
        assert_eq!(app.error.as_deref(), Some("connection refused"));
        assert!(app.vehicles.is_empty());
    }

    #[test]
    fn test_fleet_failed_keeps_stale_fleet() {
        let mut app = loaded_app();

        update(&mut app, Action::FleetFailed("HTTP 502".into()));

        assert_eq!(app.vehicles.len(), 5);
        assert!(app.error.is_some());
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut app = loaded_app();
        update(&mut app, Action::SetPage(3));
        assert_eq!(app.current_page, 3);

        update(&mut app, Action::ToggleSort);

        assert_eq!(app.sort_order, SortOrder::Desc);
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_explicit_sort_order_also_resets_page() {
        let mut app = loaded_app();
        update(&mut app, Action::SetPage(2));

        // Even "changing" to the order already in effect resets the page.
        update(&mut app, Action::SetSortOrder(SortOrder::Asc));

        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_out_of_range_pages_are_ignored() {
        let mut app = loaded_app();
        update(&mut app, Action::SetPage(2));

        update(&mut app, Action::SetPage(0));
        assert_eq!(app.current_page, 2);

        // 5 vehicles / 2 per page = 3 pages
        update(&mut app, Action::SetPage(4));
        assert_eq!(app.current_page, 2);
    }

    #[test]
    fn test_page_changes_within_bounds_apply() {
        let mut app = loaded_app();

        update(&mut app, Action::SetPage(3));
        assert_eq!(app.current_page, 3);

        update(&mut app, Action::SetPage(1));
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_select_and_clear() {
        let mut app = loaded_app();
        let key = VehicleId {
            provider: Provider::FreeNow,
            id: 4,
        };

        update(&mut app, Action::Select(Some(key)));
        assert!(app.selection.is_selected(key));

        update(&mut app, Action::Select(None));
        assert_eq!(app.selection.get(), None);
    }

    #[test]
    fn test_reload_drops_dangling_selection() {
        let mut app = loaded_app();
        let key = VehicleId {
            provider: Provider::ShareNow,
            id: 2,
        };
        update(&mut app, Action::Select(Some(key)));

        // Vehicle 2 is gone from the refreshed feed
        update(
            &mut app,
            Action::FleetLoaded(vec![share_vehicle(1, "HH-A 1")]),
        );

        assert_eq!(app.selection.get(), None);
    }

    #[test]
    fn test_reload_keeps_selection_still_present() {
        let mut app = loaded_app();
        let key = VehicleId {
            provider: Provider::ShareNow,
            id: 1,
        };
        update(&mut app, Action::Select(Some(key)));

        update(
            &mut app,
            Action::FleetLoaded(vec![share_vehicle(1, "HH-A 1")]),
        );

        assert!(app.selection.is_selected(key));
    }

    #[test]
    fn test_refresh_spawns_fetch_once() {
        let mut app = loaded_app();

        let effect = update(&mut app, Action::Refresh);
        assert_eq!(effect, Effect::SpawnFetch);
        assert!(app.is_loading);

        // A second refresh while loading is a no-op
        let effect = update(&mut app, Action::Refresh);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
