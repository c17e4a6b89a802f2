//! # TitleBar Component
//!
//! Top status bar showing application state.
//!
//! ## Responsibilities
//!
//! - Display the app name
//! - Display status messages (e.g. "Loading fleet...", "42 vehicles")
//! - Show when the fleet was last fetched
//!
//! TitleBar is purely presentational — it receives all data as props and has
//! no internal state. The props come from different owners (`status_message`
//! from core App state, `last_updated` formatted by the caller), but the
//! TitleBar doesn't care where they come from; it just renders what it's
//! given.

use crate::tui::component::Component;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

/// Top status bar component.
///
/// # Props
///
/// - `status_message`: Transient status (e.g. "Loading fleet...", "42 vehicles")
/// - `last_updated`: Pre-formatted fetch time (e.g. "12:04:05"), if any
pub struct TitleBar {
    pub status_message: String,
    pub last_updated: Option<String>,
}

impl TitleBar {
    pub fn new(status_message: String, last_updated: Option<String>) -> Self {
        Self {
            status_message,
            last_updated,
        }
    }
}

impl Component for TitleBar {
    /// Render the title bar as a single line with conditional formatting.
    ///
    /// The title bar is always a single line (height 1): app name, then the
    /// status message if present, then the last-updated stamp if present.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut title_text = String::from("Fleetdeck");
        if !self.status_message.is_empty() {
            title_text.push_str(&format!(" | {}", self.status_message));
        }
        if let Some(updated) = &self.last_updated {
            title_text.push_str(&format!(" | updated {}", updated));
        }

        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_status_and_update_time() {
        let mut title_bar = TitleBar::new("42 vehicles".to_string(), Some("12:04:05".to_string()));
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("Fleetdeck"));
        assert!(text.contains("42 vehicles"));
        assert!(text.contains("updated 12:04:05"));
    }

    #[test]
    fn test_title_bar_before_first_fetch() {
        let mut title_bar = TitleBar::new("Loading fleet...".to_string(), None);
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("Loading fleet..."));
        assert!(!text.contains("updated"));
    }

    #[test]
    fn test_title_bar_with_no_status() {
        let mut title_bar = TitleBar::new(String::new(), None);
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("Fleetdeck"));
        assert!(!text.contains('|'));
    }
}
