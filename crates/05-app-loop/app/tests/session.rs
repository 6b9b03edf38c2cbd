//! Session creation and teardown.

use app::{LogDiagnostics, PumpConfig, Session, SessionError};
use core_abi::CartridgeLoadError;
use gbx_frame::MemorySurface;
use mock::{DemoCore, ScriptedCore};
use std::sync::Arc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn malformed_cartridge_creates_no_session() {
    init_logger();
    let result = Session::<DemoCore, _, _>::create(
        Arc::from(vec![0u8; 16]),
        MemorySurface::new(),
        LogDiagnostics,
        PumpConfig::default(),
    );
    match result {
        Err(SessionError::Cartridge(CartridgeLoadError::TooSmall { len, .. })) => {
            assert_eq!(len, 16)
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session created from malformed cartridge"),
    }
}

#[test]
fn shutdown_releases_core_once_and_rejects_later_calls() {
    init_logger();
    let core = ScriptedCore::new(core_abi::DisplayGeometry::new(2, 2));
    let drops = core.drop_counter();
    let mut session =
        Session::from_core(core, MemorySurface::new(), LogDiagnostics, PumpConfig::default());

    session.tick(0.0).unwrap();
    let (surface, _) = session.shutdown().expect("first shutdown");
    assert_eq!(surface.presents, 1);
    assert_eq!(drops.get(), 1);

    assert!(session.shutdown().is_none());
    assert!(matches!(session.tick(16.0), Err(SessionError::ShutDown)));
    assert!(matches!(
        session.apply(app::Intent::TogglePause),
        Err(SessionError::ShutDown)
    ));
    drop(session);
    assert_eq!(drops.get(), 1);
}

#[test]
fn drop_without_shutdown_releases_core() {
    let core = ScriptedCore::new(core_abi::DisplayGeometry::new(2, 2));
    let drops = core.drop_counter();
    let session =
        Session::from_core(core, MemorySurface::new(), LogDiagnostics, PumpConfig::default());
    assert!(session.is_live());
    drop(session);
    assert_eq!(drops.get(), 1);
}
