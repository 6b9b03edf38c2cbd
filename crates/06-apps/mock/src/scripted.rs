use core_abi::{
    Button, CartridgeLoadError, CoreFault, CpuSnapshot, DisplayGeometry, EmulationCore,
    BYTES_PER_PIXEL,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

/// Shared count of how many times a [`ScriptedCore`] has been dropped.
pub type DropCounter = Rc<Cell<u32>>;

/// Core that records every call and misbehaves on request.
///
/// Pixels are a solid fill whose value is the number of advances completed,
/// so any advance changes the framebuffer and a failed one does not.
#[derive(Debug)]
pub struct ScriptedCore {
    geometry: DisplayGeometry,
    frame: Vec<u8>,
    pub frame_calls: u64,
    pub instruction_calls: u64,
    /// Every `set_button` call in arrival order.
    pub button_log: Vec<(Button, bool)>,
    buttons: [bool; 8],
    /// 1-based `advance_frame` call that fails.
    pub fault_on_frame: Option<u64>,
    /// Bytes to drop from every memory window (0 = exact).
    pub window_shortfall: usize,
    /// Extra bytes appended to every memory window.
    pub window_excess: usize,
    pub snapshot_calls: Cell<u64>,
    pub window_calls: Cell<u64>,
    drops: DropCounter,
}

impl ScriptedCore {
    pub fn new(geometry: DisplayGeometry) -> Self {
        let mut core = Self {
            geometry,
            frame: Vec::new(),
            frame_calls: 0,
            instruction_calls: 0,
            button_log: Vec::new(),
            buttons: [false; 8],
            fault_on_frame: None,
            window_shortfall: 0,
            window_excess: 0,
            snapshot_calls: Cell::new(0),
            window_calls: Cell::new(0),
            drops: DropCounter::default(),
        };
        core.frame = vec![0; geometry.frame_len()];
        core.fill();
        core
    }

    /// Fails the `n`th frame advance (1-based).
    pub fn with_fault_on_frame(mut self, n: u64) -> Self {
        self.fault_on_frame = Some(n);
        self
    }

    /// Makes the framebuffer `len` bytes long regardless of geometry.
    pub fn with_frame_len(mut self, len: usize) -> Self {
        self.frame.resize(len, 0);
        self
    }

    /// Handle observing how many times this core is dropped.
    pub fn drop_counter(&self) -> DropCounter {
        Rc::clone(&self.drops)
    }

    /// Advances that completed without a fault.
    pub fn completed(&self) -> u64 {
        let faulted = match self.fault_on_frame {
            Some(n) if self.frame_calls >= n => 1,
            _ => 0,
        };
        self.frame_calls + self.instruction_calls - faulted
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    fn fill(&mut self) {
        let value = self.completed() as u8;
        for px in self.frame.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[value, value, value, 0xFF]);
        }
    }
}

impl EmulationCore for ScriptedCore {
    fn create(cartridge: Arc<[u8]>) -> Result<Self, CartridgeLoadError> {
        if cartridge.is_empty() {
            return Err(CartridgeLoadError::Empty);
        }
        Ok(Self::new(DisplayGeometry::default()))
    }

    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    fn advance_frame(&mut self) -> Result<(), CoreFault> {
        self.frame_calls += 1;
        if self.fault_on_frame == Some(self.frame_calls) {
            return Err(CoreFault::at(
                self.frame_calls as u16,
                format!("scripted fault on frame {}", self.frame_calls),
            ));
        }
        self.fill();
        Ok(())
    }

    fn advance_instruction(&mut self) -> Result<(), CoreFault> {
        self.instruction_calls += 1;
        self.fill();
        Ok(())
    }

    fn framebuffer(&self) -> &[u8] {
        &self.frame
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        self.button_log.push((button, pressed));
        self.buttons[button.index()] = pressed;
    }

    fn debug_snapshot(&self) -> CpuSnapshot {
        self.snapshot_calls.set(self.snapshot_calls.get() + 1);
        CpuSnapshot {
            pc: self.instruction_calls as u16,
            a: self.frame_calls as u8,
            ..CpuSnapshot::default()
        }
    }

    fn memory_window(&self, len: usize) -> Vec<u8> {
        self.window_calls.set(self.window_calls.get() + 1);
        let len = (len + self.window_excess).saturating_sub(self.window_shortfall);
        (0..len).map(|idx| idx as u8 ^ 0xA5).collect()
    }

    fn memory_window_base(&self) -> u16 {
        0xC000
    }
}

impl Drop for ScriptedCore {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
