use crate::config::PumpConfig;
use crate::diagnostics::Diagnostics;
use crate::pump::{FramePump, TickOutcome};
use core_abi::{CartridgeLoadError, EmulationCore};
use gbx_frame::Surface;
use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;
use world::Intent;

/// Failure to start or use a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cartridge load failed: {0}")]
    Cartridge(#[from] CartridgeLoadError),
    #[error("session already shut down")]
    ShutDown,
}

/// One core from creation to teardown.
///
/// The core is released exactly once: by [`shutdown`](Self::shutdown), or on
/// drop if shutdown was never called. After shutdown every operation fails
/// with [`SessionError::ShutDown`] without touching the core.
pub struct Session<C, S, D> {
    pump: Option<FramePump<C, S, D>>,
}

impl<C, S, D> Session<C, S, D>
where
    C: EmulationCore,
    S: Surface,
    D: Diagnostics,
{
    /// Creates the core from raw cartridge bytes. No session exists if the
    /// core rejects the image.
    pub fn create(
        cartridge: Arc<[u8]>,
        surface: S,
        diagnostics: D,
        config: PumpConfig,
    ) -> Result<Self, SessionError> {
        let len = cartridge.len();
        let core = C::create(cartridge)?;
        info!("session started from {len} byte cartridge");
        Ok(Self::from_core(core, surface, diagnostics, config))
    }

    /// Wraps an already constructed core.
    pub fn from_core(core: C, surface: S, diagnostics: D, config: PumpConfig) -> Self {
        Self {
            pump: Some(FramePump::new(core, surface, diagnostics, config)),
        }
    }

    pub fn apply(&mut self, intent: Intent) -> Result<(), SessionError> {
        self.pump_mut()?.apply(intent);
        Ok(())
    }

    pub fn tick(&mut self, now: f64) -> Result<TickOutcome, SessionError> {
        Ok(self.pump_mut()?.tick(now))
    }

    pub fn pump(&self) -> Result<&FramePump<C, S, D>, SessionError> {
        self.pump.as_ref().ok_or(SessionError::ShutDown)
    }

    pub fn pump_mut(&mut self) -> Result<&mut FramePump<C, S, D>, SessionError> {
        self.pump.as_mut().ok_or(SessionError::ShutDown)
    }

    pub fn is_live(&self) -> bool {
        self.pump.is_some()
    }

    /// Stops ticking and releases the core. Returns the surface and
    /// diagnostics on the first call and `None` afterwards.
    pub fn shutdown(&mut self) -> Option<(S, D)> {
        let pump = self.pump.take()?;
        let ticks = pump.world().perf.ticks;
        let (core, surface, diagnostics) = pump.into_parts();
        drop(core);
        info!("session shut down after {ticks} ticks");
        Some((surface, diagnostics))
    }
}

impl<C, S, D> Drop for Session<C, S, D> {
    fn drop(&mut self) {
        if self.pump.take().is_some() {
            debug!("session dropped without shutdown; releasing core");
        }
    }
}
