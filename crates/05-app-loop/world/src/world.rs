//! Session state container consulted by the frame pump.

use crate::input::{ButtonState, KeyMap};
use crate::inspector::InspectorState;
use crate::types::PlaybackMode;
use core_abi::{Button, CoreFault, StepKind};
use log::{debug, trace};

/// Tick counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorldPerf {
    /// Ticks planned since the session started.
    pub ticks: u64,
    /// Full-frame advances completed without a fault.
    pub frames: u64,
    /// Instruction advances completed without a fault.
    pub instructions: u64,
    /// Faults surfaced by the core.
    pub faults: u64,
}

/// Owned host state. There are no ambient globals: the pump holds exactly
/// one `World` and every frontend mutates it through intents.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Current playback mode.
    pub mode: PlaybackMode,
    /// Whether the debug bridge refreshes each tick.
    pub debug: bool,
    /// Last value written for each button.
    pub buttons: ButtonState,
    /// Physical key table.
    pub keymap: KeyMap,
    /// Tick counters.
    pub perf: WorldPerf,
    /// Most recent fault reported by the core.
    pub last_fault: Option<CoreFault>,
    /// Inspector view-model state.
    pub inspector: InspectorState,
}

impl World {
    /// Creates a new world using the default initializer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world starting in `mode` with the given debug toggle.
    pub fn with_mode(mode: PlaybackMode, debug: bool) -> Self {
        Self {
            mode,
            debug,
            ..Self::default()
        }
    }

    /// Decides this tick's advance and performs the mode transition in the
    /// same call. A step mode reverts to `Paused` here, so one requested step
    /// can never be attributed to two ticks.
    pub fn plan_tick(&mut self) -> Option<StepKind> {
        self.perf.ticks = self.perf.ticks.saturating_add(1);
        match self.mode {
            PlaybackMode::Running => Some(StepKind::Frame),
            PlaybackMode::Paused => None,
            PlaybackMode::StepFrame => {
                self.mode = PlaybackMode::Paused;
                Some(StepKind::Frame)
            }
            PlaybackMode::StepInstruction => {
                self.mode = PlaybackMode::Paused;
                Some(StepKind::Instruction)
            }
        }
    }

    /// Counts a completed advance.
    pub fn record_advance(&mut self, kind: StepKind) {
        match kind {
            StepKind::Frame => self.perf.frames = self.perf.frames.saturating_add(1),
            StepKind::Instruction => {
                self.perf.instructions = self.perf.instructions.saturating_add(1)
            }
        }
        self.inspector.sync_perf(&self.perf);
    }

    /// Stops advancing after a core fault.
    pub fn record_fault(&mut self, fault: CoreFault) {
        self.force_paused();
        self.perf.faults = self.perf.faults.saturating_add(1);
        self.inspector.apply_fault(&fault);
        self.inspector.sync_perf(&self.perf);
        self.last_fault = Some(fault);
    }

    /// Forces `Paused` without counting a new fault.
    pub fn force_paused(&mut self) {
        if self.mode != PlaybackMode::Paused {
            debug!("forcing Paused (was {:?})", self.mode);
            self.mode = PlaybackMode::Paused;
        }
    }

    /// Whether any fault has been recorded this session.
    pub fn faulted(&self) -> bool {
        self.last_fault.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.perf.frames
    }

    pub fn instructions(&self) -> u64 {
        self.perf.instructions
    }

    /// Resolves a key code through the key table.
    pub(crate) fn resolve_key(&self, code: u32) -> Option<Button> {
        let button = self.keymap.resolve(code);
        if button.is_none() {
            trace!("ignoring unmapped key code {code}");
        }
        button
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Running,
            debug: false,
            buttons: ButtonState::new(),
            keymap: KeyMap::default(),
            perf: WorldPerf::default(),
            last_fault: None,
            inspector: InspectorState::default(),
        }
    }
}
