//! # MapView Component
//!
//! Braille-canvas map of the current page's vehicles.
//!
//! Markers are built from the normalized `position` field only — the map
//! never touches raw feed coordinates, so the two feeds' differing axis
//! orders can't leak in here. Marker colors follow the usual fleet scheme:
//! selected = yellow, active = green, inactive = red.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MapViewState` lives in `TuiState`
//! - `MapView` is created each frame with borrowed state + props

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::selection::Selection;
use crate::feed::{LatLng, Vehicle, VehicleId, VehicleState};
use crate::tui::component::Component;
use crate::tui::components::spinner_glyph;

/// Fallback viewport center when there is nothing to show: Hamburg.
const FALLBACK_CENTER: LatLng = LatLng {
    lat: 53.5511,
    lng: 9.9937,
};
const FALLBACK_SPAN: f64 = 0.1;

/// How a marker should be drawn. Computed once per frame, in
/// [`markers_for_page`] — the canvas itself never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Selected,
    Active,
    Inactive,
}

impl DisplayState {
    fn color(&self) -> Color {
        match self {
            DisplayState::Selected => Color::Yellow,
            DisplayState::Active => Color::Green,
            DisplayState::Inactive => Color::Red,
        }
    }
}

/// One map marker: everything the canvas needs to draw a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub key: VehicleId,
    pub position: LatLng,
    pub state: DisplayState,
    pub licence_plate: String,
}

/// Builds the markers for the current page.
///
/// The highlight decision runs through [`Selection::is_selected`] — the
/// exact comparison the table rows use — so a selection made in either view
/// lights up in both.
pub fn markers_for_page(vehicles: &[&Vehicle], selection: &Selection) -> Vec<MarkerPoint> {
    vehicles
        .iter()
        .map(|v| {
            let state = if selection.is_selected(v.key()) {
                DisplayState::Selected
            } else {
                match v.state {
                    VehicleState::Active => DisplayState::Active,
                    VehicleState::Inactive => DisplayState::Inactive,
                }
            };
            MarkerPoint {
                key: v.key(),
                position: v.display.position,
                state,
                licence_plate: v.licence_plate.clone(),
            }
        })
        .collect()
}

/// Persistent state for the map pane: which marker the keyboard cursor is
/// on (None until the pane is first navigated).
pub struct MapViewState {
    pub cursor: Option<usize>,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl MapViewState {
    pub fn new() -> Self {
        Self { cursor: None }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Keep the cursor valid after the page shrinks or empties.
    pub fn clamp_cursor(&mut self, marker_count: usize) {
        if marker_count == 0 {
            self.cursor = None;
        } else if let Some(i) = self.cursor
            && i >= marker_count
        {
            self.cursor = Some(marker_count - 1);
        }
    }

    pub fn cursor_up(&mut self, marker_count: usize) {
        if marker_count == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => i.saturating_sub(1),
            None => marker_count - 1,
        });
    }

    pub fn cursor_down(&mut self, marker_count: usize) {
        if marker_count == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => (i + 1).min(marker_count - 1),
            None => 0,
        });
    }
}

/// Viewport bounds fitted to the markers, padded so edge markers don't sit
/// on the border. Falls back to the Hamburg city center for an empty page.
fn viewport_bounds(markers: &[MarkerPoint]) -> ([f64; 2], [f64; 2]) {
    if markers.is_empty() {
        let half = FALLBACK_SPAN / 2.0;
        return (
            [FALLBACK_CENTER.lng - half, FALLBACK_CENTER.lng + half],
            [FALLBACK_CENTER.lat - half, FALLBACK_CENTER.lat + half],
        );
    }

    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    for marker in markers {
        min_lng = min_lng.min(marker.position.lng);
        max_lng = max_lng.max(marker.position.lng);
        min_lat = min_lat.min(marker.position.lat);
        max_lat = max_lat.max(marker.position.lat);
    }

    // 10% padding per side; a floor keeps a single marker from collapsing
    // the viewport to a point.
    let lng_pad = ((max_lng - min_lng) * 0.1).max(0.005);
    let lat_pad = ((max_lat - min_lat) * 0.1).max(0.005);

    (
        [min_lng - lng_pad, max_lng + lng_pad],
        [min_lat - lat_pad, max_lat + lat_pad],
    )
}

/// Transient render wrapper for the map pane.
pub struct MapView<'a> {
    state: &'a mut MapViewState,
    markers: &'a [MarkerPoint],
    is_loading: bool,
    is_focused: bool,
    spinner_frame: usize,
}

impl<'a> MapView<'a> {
    pub fn new(
        state: &'a mut MapViewState,
        markers: &'a [MarkerPoint],
        is_loading: bool,
        is_focused: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            markers,
            is_loading,
            is_focused,
            spinner_frame,
        }
    }

    /// Footer hint: the plate and provider under the keyboard cursor.
    fn footer(&self) -> Option<String> {
        let cursor = self.state.cursor?;
        let marker = self.markers.get(cursor)?;
        Some(format!(" {} · {} ", marker.licence_plate, marker.key.provider))
    }
}

impl<'a> Component for MapView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Map ");
        if let Some(footer) = self.footer() {
            block = block.title_bottom(Line::from(footer).centered());
        }

        if self.is_loading {
            let loading = Paragraph::new(format!("{} Loading fleet...", spinner_glyph(self.spinner_frame)))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }

        if self.markers.is_empty() {
            let empty = Paragraph::new("No vehicles on this page")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let (x_bounds, y_bounds) = viewport_bounds(self.markers);
        let cursor = self.state.cursor.filter(|_| self.is_focused);
        let markers = self.markers;

        let canvas = Canvas::default()
            .block(block)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for marker in markers {
                    let mut style = Style::default().fg(marker.state.color());
                    if marker.state == DisplayState::Selected {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    ctx.print(
                        marker.position.lng,
                        marker.position.lat,
                        Line::from(Span::styled("●", style)),
                    );
                }

                // Cursor ring drawn last so it wins overlaps
                if let Some(i) = cursor
                    && let Some(marker) = markers.get(i)
                {
                    ctx.print(
                        marker.position.lng,
                        marker.position.lat,
                        Line::from(Span::styled(
                            "◎",
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        )),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{poi_vehicle, share_vehicle};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_markers_derive_highlight_from_selection_key() {
        let share = share_vehicle(1, "HH-AB 1");
        let poi = poi_vehicle(1, "HH-CD 2"); // same numeric id, other provider
        let vehicles = vec![&share, &poi];

        let mut selection = Selection::default();
        selection.select(Some(poi.key()));

        let markers = markers_for_page(&vehicles, &selection);
        assert_eq!(markers[0].state, DisplayState::Active);
        assert_eq!(markers[1].state, DisplayState::Selected);
    }

    #[test]
    fn test_viewport_falls_back_to_hamburg_when_empty() {
        let (x_bounds, y_bounds) = viewport_bounds(&[]);
        assert!(x_bounds[0] < FALLBACK_CENTER.lng && FALLBACK_CENTER.lng < x_bounds[1]);
        assert!(y_bounds[0] < FALLBACK_CENTER.lat && FALLBACK_CENTER.lat < y_bounds[1]);
    }

    #[test]
    fn test_viewport_contains_all_markers() {
        let share = share_vehicle(1, "HH-AB 1");
        let poi = poi_vehicle(2, "HH-CD 2");
        let markers = markers_for_page(&[&share, &poi], &Selection::default());

        let (x_bounds, y_bounds) = viewport_bounds(&markers);
        for marker in &markers {
            assert!(x_bounds[0] < marker.position.lng && marker.position.lng < x_bounds[1]);
            assert!(y_bounds[0] < marker.position.lat && marker.position.lat < y_bounds[1]);
        }
    }

    #[test]
    fn test_cursor_stays_within_page() {
        let mut state = MapViewState::new();

        state.cursor_down(3);
        assert_eq!(state.cursor, Some(0));
        state.cursor_down(3);
        state.cursor_down(3);
        state.cursor_down(3); // already at the last marker
        assert_eq!(state.cursor, Some(2));

        state.clamp_cursor(1);
        assert_eq!(state.cursor, Some(0));
        state.clamp_cursor(0);
        assert_eq!(state.cursor, None);
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let share = share_vehicle(1, "HH-AB 1");
        let markers = markers_for_page(&[&share], &Selection::default());
        let mut state = MapViewState::new();

        terminal
            .draw(|f| {
                let mut map = MapView::new(&mut state, &markers, false, true, 0);
                map.render(f, f.area());
            })
            .unwrap();
    }
}
