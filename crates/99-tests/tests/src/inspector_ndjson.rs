#![cfg(all(test, not(target_arch = "wasm32")))]
//! NDJSON lines produced by debug refreshes.

use app::{Intent, LogDiagnostics, PumpConfig, Session};
use gbx_frame::MemorySurface;
use mock::DemoCore;
use std::sync::Arc;

fn cartridge() -> Arc<[u8]> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    rom.into()
}

fn capture(session: &mut Session<DemoCore, MemorySurface, LogDiagnostics>, now: f64) -> String {
    session.tick(now).unwrap();
    session
        .pump()
        .unwrap()
        .world()
        .inspector
        .vm
        .to_ndjson_line()
        .expect("serialize inspector vm")
}

#[test]
fn instruction_steps_are_visible_in_ndjson() {
    let config = PumpConfig {
        initial_mode: app::PlaybackMode::Paused,
        debug: true,
        ..PumpConfig::default()
    };
    let mut session: Session<DemoCore, _, _> =
        Session::create(cartridge(), MemorySurface::new(), LogDiagnostics, config).unwrap();

    let mut lines = vec![capture(&mut session, 0.0)];
    for step in 1..=2 {
        session.apply(Intent::StepInstruction).unwrap();
        lines.push(capture(&mut session, f64::from(step) * 16.0));
    }

    let pcs: Vec<u64> = lines
        .iter()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
            assert_eq!(value["mem"]["bytes"].as_array().unwrap().len(), 48);
            value["cpu"]["pc"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(pcs, vec![0x0100, 0x0101, 0x0150]);
    assert!(lines.iter().all(|line| line.ends_with('\n')));
}
