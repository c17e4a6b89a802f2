//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web, etc.)
//! in the future if needed — the core neither knows nor cares which views
//! consume its projections.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 250ms, only redraws on events or terminal
//!   resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{update, Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::feed::FleetClient;
use crate::tui::components::{FleetTableState, MapViewState};
use crate::tui::event::{poll_event_immediate, poll_event_timeout, TuiEvent};

/// Which pane keyboard navigation is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Map,
    Table,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Map => Pane::Table,
            Pane::Table => Pane::Map,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Pane,
    pub table: FleetTableState,
    pub map: MapViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Pane::Table,
            table: FleetTableState::new(),
            map: MapViewState::new(),
        }
    }

    /// Both pane cursors back to the top; called whenever the page window
    /// jumps (new fleet, new sort order, new page).
    fn reset_cursors(&mut self) {
        self.table.reset_cursor();
        self.map.reset_cursor();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = Arc::new(FleetClient::new(&config.base_url));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background fetch tasks
    let (tx, rx) = mpsc::channel();

    // The store starts in the loading state; kick off the first fetch now
    spawn_fetch(client.clone(), config.simulate_latency_ms, tx.clone());

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        // The spinner animates while loading; otherwise only events redraw
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            let projection = app.projection().clone();
            tui.table.clamp_cursor(projection.page_len());
            tui.map.clamp_cursor(projection.page_len());
            terminal.draw(|f| ui::draw_ui(f, &app, &projection, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Mouse click — table rows only; hit testing needs the terminal
            if let TuiEvent::MouseClick(col, row) = event {
                let frame_area = terminal.get_frame().area();
                let page_len = app.projection().page_len();
                if let Some(row_index) = ui::hit_test_table_row(col, row, frame_area, page_len) {
                    tui.focus = Pane::Table;
                    tui.table.cursor = row_index;
                    // A click always selects (Enter is the toggle)
                    let vehicle_index =
                        app.projection().page_indices().get(row_index).copied();
                    if let Some(vehicle_index) = vehicle_index {
                        let key = app.vehicles[vehicle_index].key();
                        update(&mut app, Action::Select(Some(key)));
                    }
                }
                continue;
            }

            match handle_event(&mut app, &mut tui, event) {
                Effect::Quit => should_quit = true,
                Effect::SpawnFetch => {
                    spawn_fetch(client.clone(), config.simulate_latency_ms, tx.clone())
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SpawnFetch => {
                    spawn_fetch(client.clone(), config.simulate_latency_ms, tx.clone())
                }
                Effect::None => {}
            }
            // A fresh fleet snaps back to page 1; the cursors follow
            tui.reset_cursors();
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translates a key event into core actions and pane-local cursor moves.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::Refresh => update(app, Action::Refresh),
        TuiEvent::Escape => update(app, Action::Select(None)),
        TuiEvent::SortToggle => {
            // Sort resets the page to 1, so the cursors restart too
            tui.reset_cursors();
            update(app, Action::ToggleSort)
        }
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            Effect::None
        }
        TuiEvent::CursorUp => {
            let page_len = app.projection().page_len();
            match tui.focus {
                Pane::Table => tui.table.cursor_up(),
                Pane::Map => tui.map.cursor_up(page_len),
            }
            Effect::None
        }
        TuiEvent::CursorDown => {
            let page_len = app.projection().page_len();
            match tui.focus {
                Pane::Table => tui.table.cursor_down(page_len),
                Pane::Map => tui.map.cursor_down(page_len),
            }
            Effect::None
        }
        TuiEvent::PrevPage => change_page(app, tui, app.current_page.saturating_sub(1)),
        TuiEvent::NextPage => change_page(app, tui, app.current_page + 1),
        TuiEvent::FirstPage => change_page(app, tui, 1),
        TuiEvent::LastPage => {
            let last = app.projection().total_pages;
            change_page(app, tui, last)
        }
        TuiEvent::Submit => {
            let cursor = match tui.focus {
                Pane::Table => Some(tui.table.cursor),
                Pane::Map => tui.map.cursor,
            };
            toggle_select_at(app, cursor)
        }
        // Handled in the run loop
        TuiEvent::MouseClick(_, _) | TuiEvent::Resize => Effect::None,
    }
}

/// Requests a page change; the store ignores out-of-range pages, so the
/// cursors only reset when the page actually moved.
fn change_page(app: &mut App, tui: &mut TuiState, page: usize) -> Effect {
    let before = app.current_page;
    let effect = update(app, Action::SetPage(page));
    if app.current_page != before {
        tui.reset_cursors();
    }
    effect
}

/// Selects the vehicle under the cursor; selecting the already-highlighted
/// vehicle clears the selection instead.
fn toggle_select_at(app: &mut App, cursor: Option<usize>) -> Effect {
    let Some(cursor) = cursor else {
        return Effect::None;
    };
    let Some(vehicle_index) = app.projection().page_indices().get(cursor).copied() else {
        return Effect::None;
    };

    let key = app.vehicles[vehicle_index].key();
    let next = if app.selection.is_selected(key) {
        None
    } else {
        Some(key)
    };
    update(app, Action::Select(next))
}

fn spawn_fetch(client: Arc<FleetClient>, simulate_latency_ms: u64, tx: mpsc::Sender<Action>) {
    info!("Spawning fleet fetch");
    tokio::spawn(async move {
        let result = client.fetch_fleet().await;

        // Artificial delay so the loading state is visible against an
        // instant local feed server. Off (0) unless configured.
        if simulate_latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(simulate_latency_ms)).await;
        }

        let action = match result {
            Ok(vehicles) => Action::FleetLoaded(vehicles),
            Err(e) => {
                warn!("Fleet fetch failed: {}", e);
                Action::FleetFailed(e.to_string())
            }
        };

        // If the UI tore down before the fetch settled, the send fails and
        // the late result is dropped instead of written to a dead store.
        if tx.send(action).is_err() {
            warn!("Failed to publish fleet result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::SortOrder;
    use crate::test_support::{share_vehicle, test_app};

    fn small_page_app() -> App {
        let mut app = test_app();
        app.items_per_page = 2;
        update(
            &mut app,
            Action::FleetLoaded(vec![
                share_vehicle(1, "HH-A 1"),
                share_vehicle(2, "HH-B 2"),
                share_vehicle(3, "HH-C 3"),
            ]),
        );
        app
    }

    #[test]
    fn test_enter_selects_then_clears_the_cursor_row() {
        let mut app = small_page_app();
        let mut tui = TuiState::new();

        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);
        handle_event(&mut app, &mut tui, TuiEvent::Submit);
        let selected = app.selection.get().expect("row should be selected");
        assert_eq!(selected.id, 2);

        // Enter on the same row toggles the selection off
        handle_event(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.selection.get(), None);
    }

    #[test]
    fn test_map_cursor_selects_same_vehicle_as_table_row() {
        let mut app = small_page_app();
        let mut tui = TuiState::new();

        // Select row 0 via the table
        handle_event(&mut app, &mut tui, TuiEvent::Submit);
        let from_table = app.selection.get();

        // Clear, then select marker 0 via the map
        handle_event(&mut app, &mut tui, TuiEvent::Escape);
        handle_event(&mut app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Pane::Map);
        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);
        handle_event(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(app.selection.get(), from_table);
    }

    #[test]
    fn test_page_navigation_resets_cursors_only_on_real_moves() {
        let mut app = small_page_app();
        let mut tui = TuiState::new();
        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);
        assert_eq!(tui.table.cursor, 1);

        // 3 vehicles / 2 per page = 2 pages; page 2 is real
        handle_event(&mut app, &mut tui, TuiEvent::NextPage);
        assert_eq!(app.current_page, 2);
        assert_eq!(tui.table.cursor, 0);

        // Beyond the last page: the store ignores it
        handle_event(&mut app, &mut tui, TuiEvent::NextPage);
        assert_eq!(app.current_page, 2);

        // Back on page 1, "first page" is a no-op: cursor untouched
        handle_event(&mut app, &mut tui, TuiEvent::PrevPage);
        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);
        handle_event(&mut app, &mut tui, TuiEvent::FirstPage);
        assert_eq!(app.current_page, 1);
        assert_eq!(tui.table.cursor, 1);
    }

    #[test]
    fn test_sort_toggle_flips_order_and_resets_cursors() {
        let mut app = small_page_app();
        let mut tui = TuiState::new();
        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);

        handle_event(&mut app, &mut tui, TuiEvent::SortToggle);

        assert_eq!(app.sort_order, SortOrder::Desc);
        assert_eq!(app.current_page, 1);
        assert_eq!(tui.table.cursor, 0);
    }
}
