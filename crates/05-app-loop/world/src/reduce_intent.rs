//! Pure intent reducer for the host world state.

use crate::types::{CoreCmd, Intent, PlaybackMode};
use crate::world::World;
use core_abi::Button;
use smallvec::{smallvec, SmallVec};

/// Trait for handling intents and producing core commands.
pub trait IntentReducer {
    /// Reduces an intent into zero or more core commands.
    fn reduce_intent(&mut self, intent: Intent) -> SmallVec<[CoreCmd; 8]>;
}

impl IntentReducer for World {
    fn reduce_intent(&mut self, intent: Intent) -> SmallVec<[CoreCmd; 8]> {
        match intent {
            Intent::TogglePause => {
                self.mode = match self.mode {
                    PlaybackMode::Running => PlaybackMode::Paused,
                    // A pending step is dropped; toggling from it resumes.
                    PlaybackMode::Paused
                    | PlaybackMode::StepFrame
                    | PlaybackMode::StepInstruction => PlaybackMode::Running,
                };
                SmallVec::new()
            }
            Intent::SetPaused(paused) => {
                self.mode = if paused {
                    PlaybackMode::Paused
                } else {
                    PlaybackMode::Running
                };
                SmallVec::new()
            }
            Intent::StepFrame => {
                self.mode = PlaybackMode::StepFrame;
                SmallVec::new()
            }
            Intent::StepInstruction => {
                self.mode = PlaybackMode::StepInstruction;
                SmallVec::new()
            }
            Intent::ToggleDebug => {
                self.debug = !self.debug;
                SmallVec::new()
            }
            Intent::SetDebug(enabled) => {
                self.debug = enabled;
                SmallVec::new()
            }
            Intent::Button { button, pressed } => press(self, button, pressed),
            Intent::Key { code, pressed } => match self.resolve_key(code) {
                Some(button) => press(self, button, pressed),
                None => SmallVec::new(),
            },
        }
    }
}

// Redundant writes are still forwarded; the core must tolerate them.
fn press(world: &mut World, button: Button, pressed: bool) -> SmallVec<[CoreCmd; 8]> {
    world.buttons.set(button, pressed);
    smallvec![CoreCmd::SetButton { button, pressed }]
}
