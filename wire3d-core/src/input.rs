/// Keyboard state abstraction.
///
/// The core never talks to a terminal. It asks a [`KeyState`] whether a
/// logical key is held and leaves the physical key mapping to the front-end.

use std::collections::HashSet;

/// Logical keys the renderer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Quit,
}

/// A single camera movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl Movement {
    pub const ALL: [Movement; 4] = [
        Movement::Forward,
        Movement::Backward,
        Movement::StrafeLeft,
        Movement::StrafeRight,
    ];

    pub fn key(self) -> Key {
        match self {
            Movement::Forward => Key::Forward,
            Movement::Backward => Key::Backward,
            Movement::StrafeLeft => Key::StrafeLeft,
            Movement::StrafeRight => Key::StrafeRight,
        }
    }
}

/// Poll-style keyboard query.
pub trait KeyState {
    fn is_key_down(&self, key: Key) -> bool;
}

/// A keyboard that has to be refreshed once per frame before it is queried.
pub trait Keyboard: KeyState {
    fn poll(&mut self);
}

/// Plain set of held keys.
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    down: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

impl KeyState for PressedKeys {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

impl<const N: usize> From<[Key; N]> for PressedKeys {
    fn from(keys: [Key; N]) -> Self {
        Self {
            down: keys.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = PressedKeys::new();
        assert!(!keys.is_key_down(Key::Forward));

        keys.press(Key::Forward);
        keys.press(Key::StrafeLeft);
        assert!(keys.is_key_down(Key::Forward));
        assert!(keys.is_key_down(Key::StrafeLeft));

        keys.release(Key::Forward);
        assert!(!keys.is_key_down(Key::Forward));

        keys.clear();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_movement_keys_are_distinct() {
        let keys: HashSet<Key> = Movement::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(keys.len(), 4);
        assert!(!keys.contains(&Key::Quit));
    }
}
