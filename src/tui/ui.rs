use crate::core::projection::FleetProjection;
use crate::core::state::App;
use crate::feed::Vehicle;
use crate::tui::component::Component;
use crate::tui::components::{markers_for_page, FleetTable, MapView, TitleBar};
use crate::tui::{Pane, TuiState};

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

const KEY_HELP: &str =
    " Tab focus  ↑↓ move  ⏎ select  Esc clear  s sort  ←→ page  Home/End first/last  r refresh  q quit";

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    projection: &FleetProjection,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    // Title bar
    let last_updated = app
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string());
    let mut title_bar = TitleBar::new(app.status_message.clone(), last_updated);
    title_bar.render(frame, title_area);

    // Main area - show error OR the two synchronized panes
    if let Some(error_msg) = &app.error {
        draw_error_view(frame, main_area, error_msg);
    } else {
        let [map_area, table_area] =
            Layout::horizontal([Percentage(45), Percentage(55)]).areas(main_area);

        // The map renders the same page window the table shows
        let page_vehicles: Vec<&Vehicle> = projection
            .page_indices()
            .iter()
            .map(|&i| &app.vehicles[i])
            .collect();
        let markers = markers_for_page(&page_vehicles, &app.selection);

        let mut map = MapView::new(
            &mut tui.map,
            &markers,
            app.is_loading,
            tui.focus == Pane::Map,
            spinner_frame,
        );
        map.render(frame, map_area);

        let mut table = FleetTable::new(
            &mut tui.table,
            &page_vehicles,
            &app.selection,
            app.sort_order,
            app.current_page,
            projection.total_pages,
            app.is_loading,
            tui.focus == Pane::Table,
            spinner_frame,
        );
        table.render(frame, table_area);
    }

    // Footer key help
    frame.render_widget(
        Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(vec![
        Line::from(error_msg.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::bordered().title("ERROR"))
    .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}

/// Hit test: given a mouse click position, find which table row (if any) is
/// at that position. Recomputes the same layout splits as `draw_ui`.
pub fn hit_test_table_row(
    click_col: u16,
    click_row: u16,
    frame_area: Rect,
    page_len: usize,
) -> Option<usize> {
    use Constraint::{Length, Min, Percentage};

    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [_title_area, main_area, _footer_area] = layout.areas(frame_area);
    let [_map_area, table_area] =
        Layout::horizontal([Percentage(45), Percentage(55)]).areas(main_area);

    if click_col < table_area.x || click_col >= table_area.x + table_area.width {
        return None;
    }

    super::components::fleet_table::hit_test_row(click_row, table_area, page_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{update, Action};
    use crate::test_support::{share_vehicle, test_app};
    use crate::tui::TuiState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(app: &mut App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let projection = app.projection().clone();
        terminal
            .draw(|f| {
                draw_ui(f, app, &projection, tui, 0);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_fleet() {
        let mut app = test_app();
        update(
            &mut app,
            Action::FleetLoaded(vec![share_vehicle(1, "HH-GR 1234")]),
        );
        let mut tui = TuiState::new();

        let text = render_to_text(&mut app, &mut tui);

        assert!(text.contains("Fleetdeck"));
        assert!(text.contains("HH-GR 1234"));
        assert!(text.contains("1 vehicles"));
    }

    #[test]
    fn test_draw_ui_shows_error_view() {
        let mut app = test_app();
        update(
            &mut app,
            Action::FleetFailed("network error: connection refused".into()),
        );
        let mut tui = TuiState::new();

        let text = render_to_text(&mut app, &mut tui);

        assert!(text.contains("ERROR"));
        assert!(text.contains("connection refused"));
        assert!(text.contains("Press r to retry"));
    }

    #[test]
    fn test_draw_ui_loading_state() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        let text = render_to_text(&mut app, &mut tui);

        assert!(text.contains("Loading fleet..."));
    }

    #[test]
    fn test_hit_test_only_matches_table_rows() {
        let frame_area = Rect::new(0, 0, 100, 30);

        // Main area spans rows 1..29; the table pane starts at column 45.
        // First data row: main.y (1) + border (1) + header (1) = 3.
        assert_eq!(hit_test_table_row(50, 3, frame_area, 5), Some(0));
        assert_eq!(hit_test_table_row(50, 5, frame_area, 5), Some(2));
        // Click inside the map pane
        assert_eq!(hit_test_table_row(10, 3, frame_area, 5), None);
        // Click below the page's rows
        assert_eq!(hit_test_table_row(50, 20, frame_area, 5), None);
    }
}
