/// A key press the game reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
    Backspace,
    Char(char),
}

/// Everything the player did during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Keys pressed this frame, in order.
    pub keys: Vec<Key>,
    /// Held movement direction, each axis in -1..=1.
    pub move_x: i32,
    pub move_y: i32,
}

impl FrameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn press(key: Key) -> Self {
        Self {
            keys: vec![key],
            ..Self::default()
        }
    }

    pub fn movement(move_x: i32, move_y: i32) -> Self {
        Self {
            keys: Vec::new(),
            move_x,
            move_y,
        }
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Case-insensitive check for a letter key.
    pub fn pressed_char(&self, c: char) -> bool {
        self.keys.iter().any(|k| match k {
            Key::Char(pressed) => pressed.eq_ignore_ascii_case(&c),
            _ => false,
        })
    }

    pub fn is_moving(&self) -> bool {
        self.move_x != 0 || self.move_y != 0
    }
}
