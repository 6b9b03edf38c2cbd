use core_abi::Button;
use serde::Serialize;

/// Eight independent button flags, one bit per [`Button::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ButtonState(u8);

impl ButtonState {
    /// All buttons released.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Sets one flag. Never touches any other button.
    pub fn set(&mut self, button: Button, pressed: bool) {
        let mask = 1u8 << button.index();
        if pressed {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.0 & (1u8 << button.index()) != 0
    }

    /// Buttons currently held, in [`Button::ALL`] order.
    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }

    /// Encodes the flags as a DMG joypad byte: directions in the high nibble,
    /// actions in the low nibble, both active-low.
    pub fn to_joypad_byte(&self) -> u8 {
        let mut byte = 0xFF;
        for button in self.pressed() {
            let shift = button.joypad_bit() + if button.is_direction() { 4 } else { 0 };
            byte &= !(1u8 << shift);
        }
        byte
    }
}

/// Fixed table from physical key codes to logical buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    entries: Vec<(u32, Button)>,
}

impl KeyMap {
    /// Builds a table from `(code, button)` pairs. Later duplicates of a code
    /// are ignored.
    pub fn new(entries: impl IntoIterator<Item = (u32, Button)>) -> Self {
        let mut table: Vec<(u32, Button)> = Vec::new();
        for (code, button) in entries {
            if !table.iter().any(|(existing, _)| *existing == code) {
                table.push((code, button));
            }
        }
        Self { entries: table }
    }

    /// Looks up a key code. Unmapped codes yield `None`.
    pub fn resolve(&self, code: u32) -> Option<Button> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, button)| *button)
    }

    pub fn entries(&self) -> &[(u32, Button)] {
        &self.entries
    }
}

impl Default for KeyMap {
    /// Browser `keyCode`s: arrows, X, Z, S, A.
    fn default() -> Self {
        Self::new([
            (38, Button::Up),
            (40, Button::Down),
            (37, Button::Left),
            (39, Button::Right),
            (88, Button::A),
            (90, Button::B),
            (83, Button::Start),
            (65, Button::Select),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_directions_may_be_held_together() {
        let mut state = ButtonState::new();
        state.set(Button::Left, true);
        state.set(Button::Right, true);
        assert!(state.is_pressed(Button::Left));
        assert!(state.is_pressed(Button::Right));
    }

    #[test]
    fn joypad_byte_is_active_low() {
        let mut state = ButtonState::new();
        assert_eq!(state.to_joypad_byte(), 0xFF);
        state.set(Button::A, true);
        state.set(Button::Down, true);
        assert_eq!(state.to_joypad_byte(), 0b0111_1110);
    }

    #[test]
    fn default_keymap_covers_every_button_once() {
        let map = KeyMap::default();
        for button in Button::ALL {
            let hits = map.entries().iter().filter(|(_, b)| *b == button).count();
            assert_eq!(hits, 1, "{button:?}");
        }
        assert_eq!(map.resolve(38), Some(Button::Up));
        assert_eq!(map.resolve(13), None);
    }

    #[test]
    fn duplicate_codes_keep_first_binding() {
        let map = KeyMap::new([(1, Button::A), (1, Button::B)]);
        assert_eq!(map.resolve(1), Some(Button::A));
        assert_eq!(map.entries().len(), 1);
    }
}
