//! Stand-in emulation cores for hosts and tests.
//!
//! Neither core executes real DMG code. [`DemoCore`] walks the cartridge
//! bytes so faults and debug output depend on the image, and [`ScriptedCore`]
//! records every call so tests can count advances and inject faults.

mod demo;
mod scripted;

pub use demo::{DemoCore, CARTRIDGE_MIN_LEN, INSTRUCTIONS_PER_FRAME};
pub use scripted::{DropCounter, ScriptedCore};
