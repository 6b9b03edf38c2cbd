use core_abi::{
    Button, CartridgeLoadError, CoreFault, CpuFlags, CpuSnapshot, DisplayGeometry, EmulationCore,
};
use gbx_frame::write_checkerboard_rgba;
use log::{debug, trace};
use std::sync::Arc;

/// Smallest image holding the full cartridge header (0x0100..0x0150).
pub const CARTRIDGE_MIN_LEN: usize = 0x150;

/// Instructions executed per frame advance.
pub const INSTRUCTIONS_PER_FRAME: u32 = 1024;

/// Opcodes with no defined behaviour on the DMG CPU.
const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

/// Cartridge-driven test-pattern core.
///
/// Execution starts at 0x0100 with post-boot register values. Every opcode is
/// treated as a one-byte instruction except `JP a16` and `JR e8`, which
/// branch. Fetching an illegal opcode is a fault. Each completed frame
/// redraws a checkerboard whose phase follows the frame count and the held
/// buttons.
#[derive(Debug)]
pub struct DemoCore {
    rom: Arc<[u8]>,
    geometry: DisplayGeometry,
    cpu: CpuSnapshot,
    buttons: [bool; 8],
    frame: Vec<u8>,
    frames: u64,
}

impl DemoCore {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    fn fetch(&self, addr: u16) -> u8 {
        self.rom.get(usize::from(addr)).copied().unwrap_or(0x00)
    }

    fn step(&mut self) -> Result<(), CoreFault> {
        let pc = self.cpu.pc;
        let opcode = self.fetch(pc);
        if ILLEGAL_OPCODES.contains(&opcode) {
            return Err(CoreFault::at(pc, format!("illegal opcode {opcode:02X}")));
        }
        self.cpu.pc = match opcode {
            0xC3 => u16::from_le_bytes([
                self.fetch(pc.wrapping_add(1)),
                self.fetch(pc.wrapping_add(2)),
            ]),
            0x18 => {
                let offset = self.fetch(pc.wrapping_add(1)) as i8;
                pc.wrapping_add(2).wrapping_add_signed(i16::from(offset))
            }
            _ => pc.wrapping_add(1),
        };
        self.cpu.a = self.cpu.a.wrapping_add(opcode);
        self.cpu.flags.zero = self.cpu.a == 0;
        trace!("demo core executed {opcode:02X} at {pc:04X}");
        Ok(())
    }

    fn redraw(&mut self) {
        let held = self
            .buttons
            .iter()
            .enumerate()
            .filter(|(_, pressed)| **pressed)
            .fold(0u32, |acc, (idx, _)| acc + 8 * (idx as u32 + 1));
        let phase = (self.frames as u32).wrapping_add(held);
        write_checkerboard_rgba(
            &mut self.frame,
            self.geometry.width,
            self.geometry.height,
            phase,
        );
    }
}

impl EmulationCore for DemoCore {
    fn create(cartridge: Arc<[u8]>) -> Result<Self, CartridgeLoadError> {
        if cartridge.is_empty() {
            return Err(CartridgeLoadError::Empty);
        }
        if cartridge.len() < CARTRIDGE_MIN_LEN {
            return Err(CartridgeLoadError::TooSmall {
                len: cartridge.len(),
                min: CARTRIDGE_MIN_LEN,
            });
        }
        let geometry = DisplayGeometry::default();
        let mut core = Self {
            rom: cartridge,
            geometry,
            cpu: CpuSnapshot {
                a: 0x01,
                b: 0x00,
                c: 0x13,
                d: 0x00,
                e: 0xD8,
                hl: 0x014D,
                pc: 0x0100,
                sp: 0xFFFE,
                flags: CpuFlags::from_f(0xB0),
            },
            buttons: [false; 8],
            frame: vec![0; geometry.frame_len()],
            frames: 0,
        };
        core.redraw();
        debug!("demo core created from {} byte cartridge", core.rom.len());
        Ok(core)
    }

    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    fn advance_frame(&mut self) -> Result<(), CoreFault> {
        for _ in 0..INSTRUCTIONS_PER_FRAME {
            self.step()?;
        }
        self.frames += 1;
        self.redraw();
        Ok(())
    }

    fn advance_instruction(&mut self) -> Result<(), CoreFault> {
        self.step()
    }

    fn framebuffer(&self) -> &[u8] {
        &self.frame
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    fn debug_snapshot(&self) -> CpuSnapshot {
        self.cpu
    }

    fn memory_window(&self, len: usize) -> Vec<u8> {
        let base = self.memory_window_base();
        (0..len)
            .map(|offset| self.fetch(base.wrapping_add(offset as u16)))
            .collect()
    }

    /// The window follows the program counter.
    fn memory_window_base(&self) -> u16 {
        self.cpu.pc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cartridge(entry: &[u8]) -> Arc<[u8]> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100..0x100 + entry.len()].copy_from_slice(entry);
        rom.into()
    }

    #[test]
    fn rejects_empty_and_truncated_images() {
        assert_eq!(
            DemoCore::create(Arc::from(Vec::new())).unwrap_err(),
            CartridgeLoadError::Empty
        );
        assert_eq!(
            DemoCore::create(Arc::from(vec![0u8; 0x14F])).unwrap_err(),
            CartridgeLoadError::TooSmall {
                len: 0x14F,
                min: 0x150
            }
        );
    }

    #[test]
    fn starts_with_post_boot_registers() {
        let core = DemoCore::create(cartridge(&[])).unwrap();
        let cpu = core.debug_snapshot();
        assert_eq!(cpu.pc, 0x0100);
        assert_eq!(cpu.sp, 0xFFFE);
        assert_eq!(cpu.hl, 0x014D);
        assert_eq!(core.framebuffer().len(), 160 * 144 * 4);
    }

    #[test]
    fn jump_follows_entry_point() {
        let mut core = DemoCore::create(cartridge(&[0x00, 0xC3, 0x50, 0x01])).unwrap();
        core.advance_instruction().unwrap();
        core.advance_instruction().unwrap();
        assert_eq!(core.debug_snapshot().pc, 0x0150);
    }

    #[test]
    fn relative_jump_can_loop_forever() {
        let mut core = DemoCore::create(cartridge(&[0x18, 0xFE])).unwrap();
        core.advance_frame().unwrap();
        assert_eq!(core.debug_snapshot().pc, 0x0100);
        assert_eq!(core.frames(), 1);
    }

    #[test]
    fn illegal_opcode_faults_with_pc() {
        let mut core = DemoCore::create(cartridge(&[0x00, 0xD3])).unwrap();
        core.advance_instruction().unwrap();
        let fault = core.advance_instruction().unwrap_err();
        assert_eq!(fault, CoreFault::at(0x0101, "illegal opcode D3"));
    }

    #[test]
    fn frames_change_pixels() {
        let mut core = DemoCore::create(cartridge(&[0x18, 0xFE])).unwrap();
        let before = core.framebuffer().to_vec();
        core.advance_frame().unwrap();
        assert_ne!(core.framebuffer(), &before[..]);
    }

    #[test]
    fn memory_window_starts_at_pc_and_has_exact_length() {
        let core = DemoCore::create(cartridge(&[0x00, 0xC3, 0x50, 0x01])).unwrap();
        let window = core.memory_window(48);
        assert_eq!(core.memory_window_base(), 0x0100);
        assert_eq!(window.len(), 48);
        assert_eq!(&window[..4], &[0x00, 0xC3, 0x50, 0x01]);
    }
}
