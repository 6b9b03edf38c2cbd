//! Capability boundary between the host loop and an emulation core.
//!
//! The host never looks inside a core. Everything it needs (advancing,
//! reading pixels, forwarding buttons, and debug reads) goes through
//! [`EmulationCore`], so any engine that implements the trait can be driven
//! by the frame pump.

#![deny(missing_docs)]

mod button;
mod error;
mod snapshot;

pub use button::Button;
pub use error::{CartridgeLoadError, CoreFault};
pub use snapshot::{CpuFlags, CpuSnapshot};

use serde::Serialize;
use std::sync::Arc;

/// Bytes per pixel in every framebuffer handed to the host (RGBA8888).
pub const BYTES_PER_PIXEL: usize = 4;

/// Native DMG screen width in pixels.
pub const DMG_WIDTH: u16 = 160;
/// Native DMG screen height in pixels.
pub const DMG_HEIGHT: u16 = 144;

/// Visible display area reported by a core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayGeometry {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl DisplayGeometry {
    /// Creates a geometry with the given dimensions.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of pixels in the visible area.
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Exact framebuffer length in bytes (`width * height * 4`).
    pub fn frame_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(DMG_WIDTH, DMG_HEIGHT)
    }
}

/// Granularity of a single core advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// Run until the core has produced one display frame.
    Frame,
    /// Execute exactly one CPU instruction.
    Instruction,
}

/// Operations the host consumes from an emulation core.
///
/// Advances take `&mut self` while [`framebuffer`](Self::framebuffer) hands out
/// a shared borrow, so a pixel slice obtained before an advance can never be
/// read after it.
pub trait EmulationCore {
    /// Creates a core from a raw cartridge image. The core owns header
    /// validation; the host only forwards the bytes.
    fn create(cartridge: Arc<[u8]>) -> Result<Self, CartridgeLoadError>
    where
        Self: Sized;

    /// Dimensions of the framebuffer returned by [`framebuffer`](Self::framebuffer).
    fn geometry(&self) -> DisplayGeometry;

    /// Advances until one display frame has been produced.
    fn advance_frame(&mut self) -> Result<(), CoreFault>;

    /// Advances exactly one CPU instruction.
    fn advance_instruction(&mut self) -> Result<(), CoreFault>;

    /// Current pixels, `geometry().frame_len()` bytes of RGBA.
    fn framebuffer(&self) -> &[u8];

    /// Latches one button. Redundant writes must be tolerated.
    fn set_button(&mut self, button: Button, pressed: bool);

    /// Copies the register file and flags. Pure read.
    fn debug_snapshot(&self) -> CpuSnapshot;

    /// Copies `len` bytes starting at [`memory_window_base`](Self::memory_window_base).
    fn memory_window(&self, len: usize) -> Vec<u8>;

    /// Address of the first byte returned by [`memory_window`](Self::memory_window).
    fn memory_window_base(&self) -> u16 {
        0
    }
}

/// Dispatches a single advance of the requested granularity.
pub fn advance<C: EmulationCore + ?Sized>(core: &mut C, kind: StepKind) -> Result<(), CoreFault> {
    match kind {
        StepKind::Frame => core.advance_frame(),
        StepKind::Instruction => core.advance_instruction(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_matches_dmg_screen() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.width, 160);
        assert_eq!(geometry.height, 144);
        assert_eq!(geometry.frame_len(), 160 * 144 * 4);
    }
}
