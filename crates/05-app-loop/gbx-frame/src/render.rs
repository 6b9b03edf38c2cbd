use crate::view::FramebufferView;
use core_abi::{DisplayGeometry, BYTES_PER_PIXEL};
use log::trace;

/// Static decoration drawn around the visible area on every repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderStyle {
    /// RGBA colour of the border.
    pub color: [u8; 4],
    /// Border width in surface pixels.
    pub thickness: usize,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: [0xCC, 0xCC, 0xCC, 0xFF],
            thickness: 1,
        }
    }
}

/// Destination for composed frames (canvas, window, file, memory).
pub trait Surface {
    /// Receives `width * height * 4` bytes of RGBA.
    fn present(&mut self, rgba: &[u8], width: usize, height: usize);
}

/// Surface that keeps the last presented canvas in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Number of `present` calls received.
    pub presents: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// RGBA at `(x, y)` of the last presented canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        let px = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl Surface for MemorySurface {
    fn present(&mut self, rgba: &[u8], width: usize, height: usize) {
        self.pixels.clear();
        self.pixels.extend_from_slice(rgba);
        self.width = width;
        self.height = height;
        self.presents += 1;
    }
}

/// Composes the border and the framebuffer onto a retained canvas.
#[derive(Clone, Debug)]
pub struct Renderer {
    border: BorderStyle,
    geometry: DisplayGeometry,
    canvas: Vec<u8>,
}

impl Renderer {
    /// Allocates a canvas for `geometry` plus the border on every side. The
    /// interior starts black until the first frame is rendered.
    pub fn new(geometry: DisplayGeometry, border: BorderStyle) -> Self {
        let mut renderer = Self {
            border,
            geometry,
            canvas: Vec::new(),
        };
        renderer.canvas = vec![0; renderer.canvas_width() * renderer.canvas_height() * 4];
        renderer.paint_border();
        for y in 0..renderer.geometry.height as usize {
            let start = renderer.interior_offset(y);
            let end = start + renderer.geometry.width as usize * BYTES_PER_PIXEL;
            for px in renderer.canvas[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&[0, 0, 0, 0xFF]);
            }
        }
        renderer
    }

    pub fn canvas_width(&self) -> usize {
        self.geometry.width as usize + 2 * self.border.thickness
    }

    pub fn canvas_height(&self) -> usize {
        self.geometry.height as usize + 2 * self.border.thickness
    }

    /// Last composed canvas.
    pub fn canvas(&self) -> &[u8] {
        &self.canvas
    }

    /// Copies `view` into the interior, repaints the border and presents.
    /// A view whose geometry differs from the renderer's is not copied; the
    /// previous canvas is presented instead.
    pub fn render<S: Surface + ?Sized>(&mut self, view: &FramebufferView<'_>, surface: &mut S) {
        if view.geometry() == self.geometry {
            let stride = view.width() * BYTES_PER_PIXEL;
            for y in 0..view.height() {
                let start = self.interior_offset(y);
                self.canvas[start..start + stride].copy_from_slice(view.row(y));
            }
        } else {
            trace!(
                "view geometry {:?} differs from renderer {:?}; keeping canvas",
                view.geometry(),
                self.geometry
            );
        }
        self.paint_border();
        self.present_retained(surface);
    }

    /// Presents the last composed canvas without touching the core.
    pub fn present_retained<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.present(&self.canvas, self.canvas_width(), self.canvas_height());
    }

    fn interior_offset(&self, y: usize) -> usize {
        let t = self.border.thickness;
        ((y + t) * self.canvas_width() + t) * BYTES_PER_PIXEL
    }

    fn paint_border(&mut self) {
        let (cw, ch, t) = (
            self.canvas_width(),
            self.canvas_height(),
            self.border.thickness,
        );
        let color = self.border.color;
        for y in 0..ch {
            for x in 0..cw {
                if x < t || y < t || x >= cw - t || y >= ch - t {
                    let offset = (y * cw + x) * BYTES_PER_PIXEL;
                    self.canvas[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
                }
            }
        }
    }
}
