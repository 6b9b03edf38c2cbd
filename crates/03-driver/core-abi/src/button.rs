use serde::Serialize;

/// The eight logical joypad buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Button {
    /// D-pad up.
    Up,
    /// D-pad down.
    Down,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// A action button.
    A,
    /// B action button.
    B,
    /// Start.
    Start,
    /// Select.
    Select,
}

impl Button {
    /// Every button, in a fixed order.
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::Start,
        Button::Select,
    ];

    /// Stable index into [`Button::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses a button name, ignoring ASCII case. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|button| button.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Lowercase name accepted by [`Button::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::A => "a",
            Button::B => "b",
            Button::Start => "start",
            Button::Select => "select",
        }
    }

    /// Whether the button sits on the direction line of the joypad register.
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            Button::Up | Button::Down | Button::Left | Button::Right
        )
    }

    /// Bit position within its joypad register line (P10..P13).
    pub fn joypad_bit(self) -> u8 {
        match self {
            Button::Right | Button::A => 0,
            Button::Left | Button::B => 1,
            Button::Up | Button::Select => 2,
            Button::Down | Button::Start => 3,
        }
    }
}
