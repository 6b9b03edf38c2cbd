//! Debug snapshot bridge.

use core_abi::{CpuSnapshot, EmulationCore};
use log::warn;
use world::InspectorState;

/// Copies the register file. Pure read.
pub fn snapshot<C: EmulationCore + ?Sized>(core: &C) -> CpuSnapshot {
    core.debug_snapshot()
}

/// Returns exactly `len` bytes from the core's window, zero-padding a short
/// reply and truncating a long one.
pub fn memory_window<C: EmulationCore + ?Sized>(core: &C, len: usize) -> Vec<u8> {
    let mut bytes = core.memory_window(len);
    if bytes.len() != len {
        warn!(
            "core returned {} window bytes for a {len} byte request",
            bytes.len()
        );
        bytes.resize(len, 0);
    }
    bytes
}

/// Captures a snapshot plus window and publishes both to `inspector`.
pub fn refresh<C: EmulationCore + ?Sized>(core: &C, inspector: &mut InspectorState, len: usize) {
    let cpu = snapshot(core);
    let window = memory_window(core, len);
    inspector.publish(&cpu, core.memory_window_base(), &window);
}
