use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
pub enum TuiEvent {
    // Core actions (become core::Action values)
    Quit,      // q
    ForceQuit, // Ctrl+C always quits
    Refresh,   // r - re-fetch both feeds
    SortToggle, // s - flip the licence-plate sort
    Escape,    // Esc - clear the selection
    Submit,    // Enter - select the vehicle under the cursor

    // Navigation (routed to the focused pane)
    CursorUp,
    CursorDown,
    PrevPage,  // Left
    NextPage,  // Right
    FirstPage, // Home
    LastPage,  // End
    FocusNext, // Tab toggles map/table focus

    // Mouse
    MouseClick(u16, u16),

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap() {
        match event::read().unwrap() {
            Event::Key(key_event) => {
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                match (key_event.modifiers, key_event.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                    (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                    (_, KeyCode::Char('r')) => Some(TuiEvent::Refresh),
                    (_, KeyCode::Char('s')) => Some(TuiEvent::SortToggle),
                    (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                    (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                    (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                    (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                    (_, KeyCode::Left) => Some(TuiEvent::PrevPage),
                    (_, KeyCode::Right) => Some(TuiEvent::NextPage),
                    (_, KeyCode::Home) => Some(TuiEvent::FirstPage),
                    (_, KeyCode::End) => Some(TuiEvent::LastPage),
                    (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
                    _ => None,
                }
            }
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
                }
                _ => None,
            },
            Event::Resize(_, _) => Some(TuiEvent::Resize),
            _ => None,
        }
    } else {
        None
    }
}
