#![cfg(all(test, not(target_arch = "wasm32")))]
//! Composed surface sanity against the demo core.

use app::{FramePump, LogDiagnostics, PumpConfig};
use core_abi::EmulationCore;
use gbx_frame::{encode_ppm, MemorySurface};
use mock::DemoCore;
use std::sync::Arc;

fn looping_cartridge() -> Arc<[u8]> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100] = 0x18;
    rom[0x101] = 0xFE;
    rom.into()
}

#[test]
fn demo_frame_is_bordered_checkerboard() {
    let core = DemoCore::create(looping_cartridge()).unwrap();
    let mut pump = FramePump::new(
        core,
        MemorySurface::new(),
        LogDiagnostics,
        PumpConfig::default(),
    );
    pump.tick(0.0);

    let surface = pump.surface();
    assert_eq!((surface.width, surface.height), (162, 146));
    assert_eq!(surface.pixel(0, 0), Some([0xCC, 0xCC, 0xCC, 0xFF]));
    assert_eq!(surface.pixel(161, 145), Some([0xCC, 0xCC, 0xCC, 0xFF]));

    let inner = surface.pixel(1, 1).unwrap();
    assert_eq!(inner[3], 0xFF);
    assert!(inner[0] == 0x20 || inner[0] == 0xE0);
    assert_eq!(inner[0], inner[1]);
    assert_eq!(inner[1], inner[2]);
}

#[test]
fn ppm_dump_of_surface_has_scaled_dimensions() {
    let core = DemoCore::create(looping_cartridge()).unwrap();
    let mut pump = FramePump::new(
        core,
        MemorySurface::new(),
        LogDiagnostics,
        PumpConfig::default(),
    );
    pump.tick(0.0);

    let surface = pump.surface();
    let ppm = encode_ppm(&surface.pixels, surface.width, surface.height, 2);
    let header = b"P6\n324 292\n255\n";
    assert_eq!(&ppm[..header.len()], header);
    assert_eq!(ppm.len(), header.len() + 324 * 292 * 3);
}
