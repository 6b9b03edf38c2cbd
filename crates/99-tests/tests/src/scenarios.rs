#![cfg(all(test, not(target_arch = "wasm32")))]
//! End-to-end pump scenarios.

use app::{FramePump, Intent, PlaybackMode, PumpConfig, RecordingDiagnostics, RefreshClock};
use core_abi::{Button, DisplayGeometry, EmulationCore};
use gbx_frame::{FramebufferView, MemorySurface};
use mock::ScriptedCore;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pump(
    core: ScriptedCore,
    config: PumpConfig,
) -> FramePump<ScriptedCore, MemorySurface, RecordingDiagnostics> {
    FramePump::new(
        core,
        MemorySurface::new(),
        RecordingDiagnostics::default(),
        config,
    )
}

#[test]
fn sixty_running_ticks_advance_sixty_frames() {
    let mut pump = pump(
        ScriptedCore::new(DisplayGeometry::default()),
        PumpConfig::default(),
    );
    let mut clock = RefreshClock::new();
    pump.run(&mut clock, 60);

    assert_eq!(pump.core().frame_calls, 60);
    assert_eq!(pump.core().instruction_calls, 0);
    assert_eq!(pump.world().perf.frames, 60);
    assert_eq!(pump.surface().presents, 60);
}

#[test]
fn press_and_release_within_a_paused_tick() {
    let config = PumpConfig {
        initial_mode: PlaybackMode::Paused,
        ..PumpConfig::default()
    };
    let mut pump = pump(ScriptedCore::new(DisplayGeometry::new(8, 8)), config);
    pump.tick(0.0);
    let before = pump.surface().pixels.clone();

    pump.apply(Intent::Button {
        button: Button::Up,
        pressed: true,
    });
    pump.apply(Intent::Button {
        button: Button::Up,
        pressed: false,
    });
    let outcome = pump.tick(16.0);

    assert_eq!(outcome.advanced, None);
    assert!(!outcome.debug_refreshed);
    assert!(!pump.core().is_pressed(Button::Up));
    assert!(!pump.world().buttons.is_pressed(Button::Up));
    assert_eq!(pump.core().frame_calls, 0);
    assert_eq!(pump.surface().presents, 2);
    assert_eq!(pump.surface().pixels, before);
}

#[test]
fn fault_on_tenth_tick_pauses_and_freezes_frame() {
    init_logger();
    let core = ScriptedCore::new(DisplayGeometry::new(8, 8)).with_fault_on_frame(10);
    let mut pump = pump(core, PumpConfig::default());
    let mut clock = RefreshClock::new();

    pump.run(&mut clock, 9);
    assert_eq!(pump.world().mode, PlaybackMode::Running);

    let tenth = pump.tick(clock.next().unwrap());
    assert_eq!(tenth.tick, 10);
    assert!(tenth.faulted);
    assert_eq!(tenth.advanced, None);
    assert_eq!(pump.world().mode, PlaybackMode::Paused);
    let frozen = pump.surface().pixels.clone();

    for _ in 0..5 {
        let outcome = pump.tick(clock.next().unwrap());
        assert_eq!(outcome.advanced, None);
        assert!(!outcome.faulted);
        assert_eq!(pump.surface().pixels, frozen);
    }

    assert_eq!(pump.core().frame_calls, 10);
    assert_eq!(pump.diagnostics().faults.len(), 1);
    assert_eq!(pump.diagnostics().faults[0].0, 10);
    assert_eq!(pump.world().perf.faults, 1);
}

#[test]
fn acquisitions_without_advance_are_identical() {
    let mut core = ScriptedCore::new(DisplayGeometry::new(4, 4));
    let first = FramebufferView::acquire(&core).unwrap().as_bytes().to_vec();
    let second = FramebufferView::acquire(&core).unwrap();
    assert_eq!(second.as_bytes(), &first[..]);

    core.advance_frame().unwrap();
    let fresh = FramebufferView::acquire(&core).unwrap();
    assert_ne!(fresh.as_bytes(), &first[..]);
}

#[test]
fn step_requests_from_paused_advance_once_each() {
    let config = PumpConfig {
        initial_mode: PlaybackMode::Paused,
        ..PumpConfig::default()
    };
    let mut pump = pump(ScriptedCore::new(DisplayGeometry::new(4, 4)), config);
    let mut clock = RefreshClock::new();

    pump.apply(Intent::StepFrame);
    pump.run(&mut clock, 3);
    pump.apply(Intent::StepInstruction);
    pump.run(&mut clock, 3);

    assert_eq!(pump.core().frame_calls, 1);
    assert_eq!(pump.core().instruction_calls, 1);
    assert_eq!(pump.world().mode, PlaybackMode::Paused);
}
