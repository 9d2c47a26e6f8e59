/// Keyboard polling on top of crossterm events.
///
/// Terminals only deliver key events, not key state. When the terminal
/// supports the kitty keyboard protocol we ask for release events and keep
/// keys down until released. Otherwise a key counts as down for the frame in
/// which its press (or auto-repeat) arrived.

use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use log::{debug, warn};
use wire3d_core::{Key, KeyState, Keyboard, PressedKeys};

/// Map a terminal key event to a logical key.
pub fn map_key(key: &KeyEvent) -> Option<Key> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Key::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Forward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Backward),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::StrafeLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::StrafeRight),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// Key state tracker fed with terminal key events.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: PressedKeys,
    pulsed: PressedKeys,
    release_events: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    /// Forget keys that were only down for the previous frame.
    pub fn begin_frame(&mut self) {
        self.pulsed.clear();
    }

    pub fn handle(&mut self, event: &KeyEvent) {
        let Some(key) = map_key(event) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.release_events {
                    self.held.press(key);
                }
                self.pulsed.press(key);
            }
            KeyEventKind::Release => self.held.release(key),
        }
    }
}

impl KeyState for KeyTracker {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.is_key_down(key) || self.pulsed.is_key_down(key)
    }
}

/// Keyboard reading pending crossterm events without blocking.
pub struct TerminalKeys {
    tracker: KeyTracker,
}

impl TerminalKeys {
    /// Needs raw mode to be on already.
    pub fn new() -> Self {
        let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        debug!("keyboard release events: {release_events}");
        Self {
            tracker: KeyTracker::new(release_events),
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard for TerminalKeys {
    fn poll(&mut self) {
        self.tracker.begin_frame();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.tracker.handle(&key),
                    Ok(_) => {}
                    Err(e) => {
                        warn!("failed to read terminal event: {e}");
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("failed to poll terminal events: {e}");
                    break;
                }
            }
        }
    }
}

impl KeyState for TerminalKeys {
    fn is_key_down(&self, key: Key) -> bool {
        self.tracker.is_key_down(key)
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if self.tracker.release_events {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('w'))), Some(Key::Forward));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Up)), Some(Key::Forward));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('S'))), Some(Key::Backward));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Left)), Some(Key::StrafeLeft));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('d'))), Some(Key::StrafeRight));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Esc)), Some(Key::Quit));
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('q'))), Some(Key::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Quit)
        );
        assert_eq!(map_key(&KeyEvent::from(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_press_only_lasts_one_frame() {
        let mut tracker = KeyTracker::new(false);
        tracker.handle(&event(KeyCode::Char('w'), KeyEventKind::Press));
        assert!(tracker.is_key_down(Key::Forward));

        tracker.begin_frame();
        assert!(!tracker.is_key_down(Key::Forward));
    }

    #[test]
    fn test_held_until_release() {
        let mut tracker = KeyTracker::new(true);
        tracker.handle(&event(KeyCode::Char('a'), KeyEventKind::Press));
        tracker.begin_frame();
        assert!(tracker.is_key_down(Key::StrafeLeft));

        tracker.handle(&event(KeyCode::Char('a'), KeyEventKind::Release));
        assert!(!tracker.is_key_down(Key::StrafeLeft));
    }

    #[test]
    fn test_tap_within_one_frame_still_counts() {
        let mut tracker = KeyTracker::new(true);
        tracker.begin_frame();
        tracker.handle(&event(KeyCode::Right, KeyEventKind::Press));
        tracker.handle(&event(KeyCode::Right, KeyEventKind::Release));
        assert!(tracker.is_key_down(Key::StrafeRight));
    }
}
