//! Owned session state for the host loop.
//!
//! The `world` crate holds every flag the frame pump consults: playback
//! mode, debug toggle, and button state. It stays free of core access; the
//! reducer turns intents into [`CoreCmd`]s and the pump forwards them.

/// Inspector state container and helpers.
pub mod inspector;
/// Physical key table and the mirrored button flags.
pub mod input;
/// Pure intent reducer.
pub mod reduce_intent;
/// Intent, command, and playback types.
pub mod types;
/// Session state container.
pub mod world;

pub use crate::input::{ButtonState, KeyMap};
pub use crate::reduce_intent::IntentReducer;
pub use crate::types::{CoreCmd, Intent, PlaybackMode};
pub use crate::world::{World, WorldPerf};
pub use core_abi::{Button, StepKind};
pub use inspector::InspectorState;
