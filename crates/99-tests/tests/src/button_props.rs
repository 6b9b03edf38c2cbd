#![cfg(all(test, not(target_arch = "wasm32")))]
//! Button forwarding through the pump.

use app::{FramePump, Intent, PumpConfig, RecordingDiagnostics};
use core_abi::{Button, DisplayGeometry};
use gbx_frame::MemorySurface;
use mock::ScriptedCore;
use proptest::prelude::*;

proptest! {
    #[test]
    fn core_sees_last_write_per_button(
        writes in prop::collection::vec((0usize..8, any::<bool>()), 0..48)
    ) {
        let mut pump = FramePump::new(
            ScriptedCore::new(DisplayGeometry::new(1, 1)),
            MemorySurface::new(),
            RecordingDiagnostics::default(),
            PumpConfig::default(),
        );
        for (idx, pressed) in &writes {
            pump.apply(Intent::Button { button: Button::ALL[*idx], pressed: *pressed });
        }
        for (idx, button) in Button::ALL.into_iter().enumerate() {
            let expected = writes
                .iter()
                .rev()
                .find(|(candidate, _)| *candidate == idx)
                .map_or(false, |(_, pressed)| *pressed);
            prop_assert_eq!(pump.core().is_pressed(button), expected);
        }
        prop_assert_eq!(pump.core().button_log.len(), writes.len());
    }
}
