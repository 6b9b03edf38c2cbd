//! Debug view-model shared by the CLI, NDJSON logging, and the web debug panel.
//!
//! Everything in here is an owned copy. Nothing borrows from a running core,
//! so a view-model can be kept, serialized, or rendered after the core has
//! advanced or been released.

use core_abi::{CoreFault, CpuSnapshot};
use serde::Serialize;

pub mod render;

/// Inspector view-model published by the debug snapshot bridge.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InspectorVM {
    /// CPU registers and flags from the latest snapshot.
    pub cpu: CpuSnapshot,
    /// Bounded memory window from the latest refresh.
    pub mem: MemWindow,
    /// Pump counters mirrored from the world.
    pub perf: PerfVM,
    /// Last fault surfaced by the core, rendered for display.
    pub fault: Option<String>,
}

impl InspectorVM {
    /// Construct a new inspector view-model with zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the CPU section with a fresh snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &CpuSnapshot) {
        self.cpu = *snapshot;
    }

    /// Replaces the memory window, reusing the existing allocation.
    pub fn apply_window(&mut self, base: u16, bytes: &[u8]) {
        self.mem.base = base;
        self.mem.bytes.clear();
        self.mem.bytes.extend_from_slice(bytes);
    }

    /// Records the most recent core fault.
    pub fn apply_fault(&mut self, fault: &CoreFault) {
        self.fault = Some(fault.to_string());
    }

    /// Serializes the view-model to a single NDJSON line.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Memory window slice returned by the core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemWindow {
    /// Address of the first byte.
    pub base: u16,
    /// Raw bytes captured for the window.
    pub bytes: Vec<u8>,
}

/// Pump counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PerfVM {
    /// Ticks processed since the session started.
    pub ticks: u64,
    /// Full-frame advances performed.
    pub frames: u64,
    /// Single-instruction advances performed.
    pub instructions: u64,
    /// Faults surfaced by the core.
    pub faults: u64,
}
