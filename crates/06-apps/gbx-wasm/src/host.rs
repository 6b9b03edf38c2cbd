use app::{Diagnostics, Intent, PumpConfig, Session, SessionError};
use core_abi::{Button, EmulationCore};
use gbx_frame::MemorySurface;
use mock::DemoCore;
use std::sync::Arc;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Failure surfaced to the page.
#[derive(Debug, Error)]
pub enum HostError {
    /// Cartridge rejected, or the session was already shut down.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Inspector view-model could not be encoded.
    #[error("debug state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-tick summary handed back to JavaScript.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, saturating at `u32::MAX`.
    pub tick: u32,
    pub advanced: bool,
    pub faulted: bool,
    pub paused: bool,
}

/// Session plus the composed canvas the page reads from.
pub struct BrowserHost<D: Diagnostics, C: EmulationCore = DemoCore> {
    session: Session<C, MemorySurface, D>,
}

impl<D: Diagnostics, C: EmulationCore> BrowserHost<D, C> {
    /// Starts a session paused or running per `config`.
    pub fn create(rom: &[u8], diagnostics: D, config: PumpConfig) -> Result<Self, HostError> {
        let session = Session::create(
            Arc::from(rom),
            MemorySurface::new(),
            diagnostics,
            config,
        )?;
        Ok(Self { session })
    }

    pub fn tick(&mut self, now: f64) -> Result<TickReport, HostError> {
        let outcome = self.session.tick(now)?;
        Ok(TickReport {
            tick: u32::try_from(outcome.tick).unwrap_or(u32::MAX),
            advanced: outcome.advanced.is_some(),
            faulted: outcome.faulted,
            paused: self.is_paused()?,
        })
    }

    /// One refresh callback. Returns whether the callback should be
    /// scheduled again; a shut-down session ends the loop.
    pub fn on_frame(&mut self, now: f64) -> Result<bool, HostError> {
        if !self.session.is_live() {
            return Ok(false);
        }
        self.tick(now)?;
        Ok(true)
    }

    pub fn apply(&mut self, intent: Intent) -> Result<(), HostError> {
        Ok(self.session.apply(intent)?)
    }

    /// Named button from a page control. Unknown names are ignored.
    pub fn set_button(&mut self, name: &str, pressed: bool) -> Result<bool, HostError> {
        match Button::from_name(name) {
            Some(button) => {
                self.apply(Intent::Button { button, pressed })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Composed canvas (pixels plus border), RGBA.
    pub fn canvas(&self) -> Result<&MemorySurface, HostError> {
        Ok(self.session.pump()?.surface())
    }

    pub fn debug_panel(&self) -> Result<String, HostError> {
        Ok(self.session.pump()?.debug_panel())
    }

    /// Inspector view-model as one JSON line.
    pub fn debug_state(&self) -> Result<String, HostError> {
        let pump = self.session.pump()?;
        Ok(pump.world().inspector.vm.to_ndjson_line()?)
    }

    pub fn is_paused(&self) -> Result<bool, HostError> {
        Ok(self.session.pump()?.world().mode == world::PlaybackMode::Paused)
    }

    pub fn shutdown(&mut self) -> bool {
        self.session.shutdown().is_some()
    }
}
