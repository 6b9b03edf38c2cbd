//! Intent, command, and playback types shared by the pump and its frontends.

use core_abi::Button;
use serde::Serialize;

/// Control state deciding how a tick translates into an advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PlaybackMode {
    /// One full-frame advance per tick.
    #[default]
    Running,
    /// No advance.
    Paused,
    /// One full-frame advance on the next tick, then `Paused`.
    StepFrame,
    /// One instruction advance on the next tick, then `Paused`.
    StepInstruction,
}

/// Intent emitted by frontends (keyboard, buttons, CLI flags).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Flip between `Running` and `Paused`.
    TogglePause,
    /// Force a specific running/paused state.
    SetPaused(bool),
    /// Advance exactly one frame on the next tick, then pause.
    StepFrame,
    /// Advance exactly one instruction on the next tick, then pause.
    StepInstruction,
    /// Flip the debug refresh toggle.
    ToggleDebug,
    /// Force the debug refresh toggle.
    SetDebug(bool),
    /// Logical button change.
    Button { button: Button, pressed: bool },
    /// Raw physical key code, resolved through the [`KeyMap`](crate::KeyMap).
    Key { code: u32, pressed: bool },
}

/// Command the pump must forward to the core immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreCmd {
    /// Mirror one button flag into the core.
    SetButton { button: Button, pressed: bool },
}
