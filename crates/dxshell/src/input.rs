/// Mouse buttons, including the two directions of the scroll wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// The wheel rotated towards the user.
    WheelDown,
    /// The wheel rotated away from the user.
    WheelUp,
}

/// The state of a button or key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

bitflags::bitflags! {
    /// Mouse buttons held down while the pointer moves.
    pub struct HeldButtons: u8 {
        const LEFT = 0x1;
        const MIDDLE = 0x2;
        const RIGHT = 0x4;
    }
}

/// A Win32 virtual-key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

/// Keys that have no character representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Left,
    Up,
    Right,
    Down,

    PageUp,
    PageDown,
    Home,
    End,
    Insert,

    /// Any other virtual key, by code.
    Other(u16),
}

/// A key code sorted into the keyboard (character) or special-key family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(u8),
    Special(SpecialKey),
}

impl KeyCode {
    const BACK: u16 = 0x08;
    const TAB: u16 = 0x09;
    const RETURN: u16 = 0x0D;
    const ESCAPE: u16 = 0x1B;
    const SPACE: u16 = 0x20;
    const PRIOR: u16 = 0x21;
    const NEXT: u16 = 0x22;
    const END: u16 = 0x23;
    const HOME: u16 = 0x24;
    const LEFT: u16 = 0x25;
    const UP: u16 = 0x26;
    const RIGHT: u16 = 0x27;
    const DOWN: u16 = 0x28;
    const INSERT: u16 = 0x2D;
    const DELETE: u16 = 0x2E;
    const NUMPAD0: u16 = 0x60;
    const NUMPAD9: u16 = 0x69;
    const MULTIPLY: u16 = 0x6A;
    const DIVIDE: u16 = 0x6F;
    const F1: u16 = 0x70;
    const F12: u16 = 0x7B;
    const OEM_1: u16 = 0xBA;
    const OEM_3: u16 = 0xC0;
    const OEM_4: u16 = 0xDB;
    const OEM_8: u16 = 0xDF;
    const OEM_102: u16 = 0xE2;

    /// Sorts the code into the standard (character) range or the special
    /// range.
    ///
    /// Digits and letters map to their ASCII value (letters upper case), the
    /// editing keys to their control characters, and delete to `0x7F`.
    /// Keypad and punctuation keys map to the character they produce on a US
    /// layout.
    #[must_use]
    pub fn classify(self) -> Key {
        let code = self.0;
        match code {
            Self::BACK | Self::TAB | Self::RETURN | Self::ESCAPE | Self::SPACE => {
                Key::Char(code as u8)
            }
            0x30..=0x39 | 0x41..=0x5A => Key::Char(code as u8),
            Self::DELETE => Key::Char(0x7F),
            Self::NUMPAD0..=Self::NUMPAD9 => Key::Char(b'0' + (code - Self::NUMPAD0) as u8),
            Self::MULTIPLY..=Self::DIVIDE => {
                Key::Char(NUMPAD_OPERATORS[usize::from(code - Self::MULTIPLY)])
            }
            Self::OEM_1..=Self::OEM_3 => {
                Key::Char(OEM_PUNCTUATION[usize::from(code - Self::OEM_1)])
            }
            Self::OEM_4..=Self::OEM_8 => Key::Char(OEM_BRACKETS[usize::from(code - Self::OEM_4)]),
            Self::OEM_102 => Key::Char(b'\\'),
            Self::F1..=Self::F12 => Key::Special(FUNCTION_KEYS[usize::from(code - Self::F1)]),
            Self::LEFT => Key::Special(SpecialKey::Left),
            Self::UP => Key::Special(SpecialKey::Up),
            Self::RIGHT => Key::Special(SpecialKey::Right),
            Self::DOWN => Key::Special(SpecialKey::Down),
            Self::PRIOR => Key::Special(SpecialKey::PageUp),
            Self::NEXT => Key::Special(SpecialKey::PageDown),
            Self::HOME => Key::Special(SpecialKey::Home),
            Self::END => Key::Special(SpecialKey::End),
            Self::INSERT => Key::Special(SpecialKey::Insert),
            other => Key::Special(SpecialKey::Other(other)),
        }
    }
}

// VK_MULTIPLY, VK_ADD, VK_SEPARATOR, VK_SUBTRACT, VK_DECIMAL, VK_DIVIDE
const NUMPAD_OPERATORS: [u8; 6] = *b"*+,-./";

// VK_OEM_1, VK_OEM_PLUS, VK_OEM_COMMA, VK_OEM_MINUS, VK_OEM_PERIOD, VK_OEM_2, VK_OEM_3
const OEM_PUNCTUATION: [u8; 7] = *b";=,-./`";

// VK_OEM_4 through VK_OEM_8
const OEM_BRACKETS: [u8; 5] = *b"[\\]'`";

const FUNCTION_KEYS: [SpecialKey; 12] = [
    SpecialKey::F1,
    SpecialKey::F2,
    SpecialKey::F3,
    SpecialKey::F4,
    SpecialKey::F5,
    SpecialKey::F6,
    SpecialKey::F7,
    SpecialKey::F8,
    SpecialKey::F9,
    SpecialKey::F10,
    SpecialKey::F11,
    SpecialKey::F12,
];
