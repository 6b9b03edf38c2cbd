//! Plain-text renderings of the view-model.

use crate::InspectorVM;
use std::fmt::Write;

/// Formats registers as uppercase hex followed by the flag line.
pub fn panel(vm: &InspectorVM) -> String {
    let cpu = &vm.cpu;
    let mut out = String::new();
    writeln!(
        out,
        "A: {:02X}  B: {:02X}  C: {:02X}  D: {:02X}  E: {:02X}",
        cpu.a, cpu.b, cpu.c, cpu.d, cpu.e
    )
    .expect("write registers");
    writeln!(
        out,
        "HL: {:04X}  PC: {:04X}  SP: {:04X}",
        cpu.hl, cpu.pc, cpu.sp
    )
    .expect("write pointers");
    writeln!(
        out,
        "c: {} hc: {} sub: {} z: {}",
        u8::from(cpu.flags.carry),
        u8::from(cpu.flags.half_carry),
        u8::from(cpu.flags.subtract),
        u8::from(cpu.flags.zero)
    )
    .expect("write flags");
    if let Some(fault) = &vm.fault {
        writeln!(out, "{fault}").expect("write fault");
    }
    out
}

/// Formats a hexdump of a memory window, sixteen bytes per line.
pub fn hexdump(base: u16, bytes: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(16).enumerate() {
        let line_base = base.wrapping_add((line * 16) as u16);
        write!(out, "{line_base:04X}:").expect("write prefix");
        for byte in chunk {
            write!(out, " {byte:02X}").expect("write byte");
        }
        out.push('\n');
    }
    if bytes.is_empty() {
        writeln!(out, "{base:04X}:").expect("write empty");
    }
    out
}

/// Panel followed by the hexdump of the current memory window.
pub fn full(vm: &InspectorVM) -> String {
    let mut out = panel(vm);
    out.push_str(&hexdump(vm.mem.base, &vm.mem.bytes));
    out
}
