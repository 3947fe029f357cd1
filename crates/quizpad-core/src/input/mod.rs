//! Input abstraction layer.
//!
//! Board code reads the button expander, the potentiometer and the keyboard
//! once per loop iteration and packs the results into an [`InputFrame`]. Every
//! decision within a tick is made from that one frame.

pub mod dial;
pub mod edge;
pub mod mock;

/// The four face buttons. A-D double as answer choices 0-3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    A,
    B,
    C,
    D,
}

impl Button {
    pub const COUNT: usize = 4;
    pub const ALL: [Button; Self::COUNT] = [Self::A, Self::B, Self::C, Self::D];

    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

/// Raw keyboard codes.
pub mod keycode {
    pub const BACKSPACE: u8 = 8;
    pub const ENTER: u8 = 13;
    pub const ESCAPE: u8 = 27;
    pub const LEFT: u8 = 180;
    pub const UP: u8 = 181;
    pub const DOWN: u8 = 182;
    pub const RIGHT: u8 = 183;
}

/// Decoded keyboard code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Left,
    Up,
    Down,
    Right,
    /// Printable ASCII (32..=126).
    Char(char),
}

impl Key {
    /// Decode a raw keyboard code. `0` and unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            keycode::ENTER => Some(Self::Enter),
            keycode::ESCAPE => Some(Self::Escape),
            keycode::BACKSPACE => Some(Self::Backspace),
            keycode::LEFT => Some(Self::Left),
            keycode::UP => Some(Self::Up),
            keycode::DOWN => Some(Self::Down),
            keycode::RIGHT => Some(Self::Right),
            32..=126 => Some(Self::Char(code as char)),
            _ => None,
        }
    }

    /// Previous-item key on a choice screen.
    pub fn is_prev(self) -> bool {
        matches!(self, Self::Left | Self::Char('[' | 'p' | 'P'))
    }

    /// Next-item key on a choice screen.
    pub fn is_next(self) -> bool {
        matches!(self, Self::Right | Self::Char(']' | 'n' | 'N'))
    }
}

/// One sample of every input channel, taken once per tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InputFrame {
    /// Pressed state of buttons A-D (already converted from active-low).
    pub buttons: [bool; Button::COUNT],
    /// Potentiometer sample, 0..=4095.
    pub dial: u16,
    /// Keyboard code read this tick, `0` when no key.
    pub key: u8,
}

impl InputFrame {
    pub const fn idle(dial: u16) -> Self {
        Self {
            buttons: [false; Button::COUNT],
            dial,
            key: 0,
        }
    }

    pub const fn with_button(mut self, button: Button, pressed: bool) -> Self {
        self.buttons[button.index()] = pressed;
        self
    }

    pub const fn with_key(mut self, key: u8) -> Self {
        self.key = key;
        self
    }

    pub const fn with_dial(mut self, dial: u16) -> Self {
        self.dial = dial;
        self
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    pub fn key(&self) -> Option<Key> {
        Key::from_code(self.key)
    }
}

/// Hardware sampling collaborator.
pub trait InputProvider {
    type Error;

    fn sample(&mut self) -> Result<InputFrame, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes_decode() {
        assert_eq!(Key::from_code(0), None);
        assert_eq!(Key::from_code(13), Some(Key::Enter));
        assert_eq!(Key::from_code(27), Some(Key::Escape));
        assert_eq!(Key::from_code(8), Some(Key::Backspace));
        assert_eq!(Key::from_code(180), Some(Key::Left));
        assert_eq!(Key::from_code(183), Some(Key::Right));
        assert_eq!(Key::from_code(b'a'), Some(Key::Char('a')));
        assert_eq!(Key::from_code(127), None);
        assert_eq!(Key::from_code(200), None);
    }

    #[test]
    fn navigation_aliases() {
        assert!(Key::Char('[').is_prev());
        assert!(Key::Char('P').is_prev());
        assert!(Key::Right.is_next());
        assert!(Key::Char('n').is_next());
        assert!(!Key::Up.is_prev());
    }
}
