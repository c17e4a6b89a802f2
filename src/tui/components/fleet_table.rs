//! # FleetTable Component
//!
//! Paginated, sortable table of the merged fleet.
//!
//! Every cell reads the vehicle's normalized display fields — coordinates,
//! address, fuel — never the raw per-provider shapes. The row highlight for
//! the shared selection goes through [`Selection::is_selected`], the same
//! comparison the map markers use.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FleetTableState` lives in `TuiState`
//! - `FleetTable` is created each frame with borrowed state + props

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::core::projection::SortOrder;
use crate::core::selection::Selection;
use crate::feed::{Vehicle, VehicleState, MISSING_FIELD};
use crate::tui::component::Component;
use crate::tui::components::spinner_glyph;

/// Widest the address column renders before truncation.
const ADDRESS_WIDTH: usize = 28;

/// Persistent state for the table pane: the keyboard row cursor, relative
/// to the current page.
pub struct FleetTableState {
    pub cursor: usize,
}

impl Default for FleetTableState {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetTableState {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Keep the cursor valid after the page shrinks.
    pub fn clamp_cursor(&mut self, page_len: usize) {
        if page_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= page_len {
            self.cursor = page_len - 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, page_len: usize) {
        if page_len > 0 {
            self.cursor = (self.cursor + 1).min(page_len - 1);
        }
    }
}

/// Maps a click row to a data-row index within the current page.
///
/// Row 0 of the table body sits below the pane's top border and the header
/// line, so the first data row is at `area.y + 2`.
pub fn hit_test_row(click_row: u16, table_area: Rect, page_len: usize) -> Option<usize> {
    let first_data_row = table_area.y + 2;
    let last_usable_row = (table_area.y + table_area.height).saturating_sub(2); // bottom border
    if click_row < first_data_row || click_row > last_usable_row {
        return None;
    }
    let index = (click_row - first_data_row) as usize;
    if index < page_len { Some(index) } else { None }
}

/// Truncate a string to fit within `max_width` columns (unicode-aware),
/// adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.to_string().width();
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Transient render wrapper for the table pane.
pub struct FleetTable<'a> {
    state: &'a mut FleetTableState,
    /// The current page's vehicles, already sorted.
    vehicles: &'a [&'a Vehicle],
    selection: &'a Selection,
    sort_order: SortOrder,
    current_page: usize,
    total_pages: usize,
    is_loading: bool,
    is_focused: bool,
    spinner_frame: usize,
}

impl<'a> FleetTable<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: &'a mut FleetTableState,
        vehicles: &'a [&'a Vehicle],
        selection: &'a Selection,
        sort_order: SortOrder,
        current_page: usize,
        total_pages: usize,
        is_loading: bool,
        is_focused: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            vehicles,
            selection,
            sort_order,
            current_page,
            total_pages,
            is_loading,
            is_focused,
            spinner_frame,
        }
    }
}

impl<'a> Component for FleetTable<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Vehicles ");

        if self.is_loading {
            let loading = Paragraph::new(format!(
                "{} Loading fleet...",
                spinner_glyph(self.spinner_frame)
            ))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(loading, area);
            return;
        }

        // Empty fleet: an empty state, not a "Page 1 of 0" pager
        if self.total_pages == 0 {
            let empty = Paragraph::new("No vehicles in the fleet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let pager = format!(
            " «  ‹  Page {} of {}  ›  » ",
            self.current_page, self.total_pages
        );
        block = block.title_bottom(Line::from(pager).centered());

        let header = Row::new([
            "Type".to_string(),
            format!("Licence Plate {}", self.sort_order.arrow()),
            "Coordinates".to_string(),
            "Address".to_string(),
            "State".to_string(),
            "Condition".to_string(),
            "Fuel".to_string(),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, vehicle)| {
                let is_selected = self.selection.is_selected(vehicle.key());
                let is_cursor = self.is_focused && i == self.state.cursor;

                let mut style = match vehicle.state {
                    VehicleState::Active => Style::default(),
                    VehicleState::Inactive => Style::default().fg(Color::DarkGray),
                };
                if is_selected {
                    style = Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD);
                }
                if is_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                let fuel = vehicle
                    .display
                    .fuel
                    .map(|f| format!("{f}%"))
                    .unwrap_or_else(|| MISSING_FIELD.to_string());

                Row::new([
                    vehicle.type_label().to_string(),
                    vehicle.licence_plate.clone(),
                    vehicle.display.coordinates.clone(),
                    truncate_str(&vehicle.display.address, ADDRESS_WIDTH),
                    vehicle.state.label().to_string(),
                    vehicle.condition.label().to_string(),
                    fuel,
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(24),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(5),
        ];

        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }
}
