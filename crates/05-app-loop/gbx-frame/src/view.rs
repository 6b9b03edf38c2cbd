use core_abi::{DisplayGeometry, EmulationCore, BYTES_PER_PIXEL};
use thiserror::Error;

/// Framebuffer could not be viewed as `width * height * 4` bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("framebuffer length mismatch (expected {expected} bytes, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("display geometry has a zero dimension")]
    ZeroDimensions,
}

/// Read-only view of exactly `width * height * 4` bytes owned by a core.
///
/// The lifetime ties the view to a shared borrow of the core. Advancing needs
/// `&mut`, so the compiler rejects any read of a view after an advance; a new
/// view has to be acquired instead.
#[derive(Clone, Copy, Debug)]
pub struct FramebufferView<'a> {
    bytes: &'a [u8],
    geometry: DisplayGeometry,
}

impl<'a> FramebufferView<'a> {
    /// Wraps `bytes`, checking the length against `geometry`.
    pub fn new(bytes: &'a [u8], geometry: DisplayGeometry) -> Result<Self, FrameError> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(FrameError::ZeroDimensions);
        }
        let expected = geometry.frame_len();
        if bytes.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, geometry })
    }

    /// Views the core's current framebuffer.
    pub fn acquire<C: EmulationCore + ?Sized>(core: &'a C) -> Result<Self, FrameError> {
        Self::new(core.framebuffer(), core.geometry())
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        usize::from(self.geometry.width)
    }

    pub fn height(&self) -> usize {
        usize::from(self.geometry.height)
    }

    /// All pixel bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// One row of `width * 4` bytes. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width() * BYTES_PER_PIXEL;
        let bytes = self.bytes;
        &bytes[y * stride..(y + 1) * stride]
    }

    /// RGBA quadruple at `(x, y)`, or `None` outside the view.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) * BYTES_PER_PIXEL;
        let px = &self.bytes[offset..offset + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}
