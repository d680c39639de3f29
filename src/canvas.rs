//! Double-buffered canvas
//!
//! The canvas owns an off-screen ARGB8888 back buffer that all drawing lands
//! in, plus a pool of shared-memory presentation buffers. [`Canvas::present`]
//! copies the back buffer into a pool buffer and commits it to the surface in
//! one operation, so the screen only ever sees completed frames. The visible
//! surface is never drawn into directly; suppressing the usual
//! erase-then-redraw path is the whole point of this type.

use log::debug;
use smithay_client_toolkit::shm::{
    slot::{ActivateSlotError, CreateBufferError, SlotPool},
    CreatePoolError, Shm,
};
use thiserror::Error;
use wayland_client::protocol::{wl_shm, wl_surface};

use crate::draw::{Color, Painter};

/// Failures of the canvas buffer lifecycle. All of these are fatal call-order
/// or allocation problems; none is retried internally.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas buffer is not initialized; call initialize() first")]
    Uninitialized,
    #[error("cannot allocate the buffer before the window surface is configured")]
    NotRealized,
    #[error("failed to create shared-memory pool: {0}")]
    Pool(#[from] CreatePoolError),
    #[error("failed to create presentation buffer: {0}")]
    Buffer(#[from] CreateBufferError),
    #[error("failed to attach presentation buffer: {0}")]
    Attach(#[from] ActivateSlotError),
}

/// The off-screen pixel store. Split from [`Canvas`] so the buffer lifecycle
/// rules stand on their own, independent of the Wayland plumbing.
struct BackBuffer {
    width: u32,
    height: u32,
    clear_color: Color,
    pixels: Option<Vec<u8>>,
}

impl BackBuffer {
    fn new(width: u32, height: u32, clear_color: Color) -> Self {
        Self {
            width,
            height,
            clear_color,
            pixels: None,
        }
    }

    fn allocate(&mut self) {
        let len = (self.width * self.height * 4) as usize;
        let mut pixels = vec![0u8; len];
        Painter::new(&mut pixels, self.width, self.height).fill(self.clear_color);
        self.pixels = Some(pixels);
    }

    fn painter(&mut self) -> Result<Painter<'_>, CanvasError> {
        let pixels = self
            .pixels
            .as_deref_mut()
            .ok_or(CanvasError::Uninitialized)?;
        Ok(Painter::new(pixels, self.width, self.height))
    }

    fn clear(&mut self) -> Result<(), CanvasError> {
        let clear_color = self.clear_color;
        self.painter()?.fill(clear_color);
        Ok(())
    }

    fn pixels(&self) -> Result<&[u8], CanvasError> {
        self.pixels.as_deref().ok_or(CanvasError::Uninitialized)
    }
}

/// An off-screen drawing surface with atomic present.
///
/// Lifecycle: constructed with fixed dimensions, initialized once after the
/// host surface's first configure, then cleared/drawn/presented every frame
/// until the window goes away.
pub struct Canvas {
    buffer: BackBuffer,
    surface: wl_surface::WlSurface,
    realized: bool,
    pool: Option<SlotPool>,
}

impl Canvas {
    pub(crate) fn new(
        width: u32,
        height: u32,
        surface: wl_surface::WlSurface,
        clear_color: Color,
    ) -> Self {
        Self {
            buffer: BackBuffer::new(width, height, clear_color),
            surface,
            realized: false,
            pool: None,
        }
    }

    /// Called by the window plumbing once the surface has received its first
    /// configure and may carry buffers.
    pub(crate) fn mark_realized(&mut self) {
        self.realized = true;
    }

    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    /// Allocate the back buffer and the presentation pool. Must run after
    /// the surface is configured; calling it earlier is a call-order error,
    /// not something to retry.
    pub fn initialize(&mut self, shm: &Shm) -> Result<(), CanvasError> {
        if self.buffer.pixels.is_some() {
            debug!("canvas already initialized, ignoring");
            return Ok(());
        }
        if !self.realized {
            return Err(CanvasError::NotRealized);
        }

        let len = (self.width() * self.height() * 4) as usize;
        self.pool = Some(SlotPool::new(len, shm)?);
        self.buffer.allocate();

        debug!(
            "canvas initialized: {}x{} back buffer",
            self.width(),
            self.height()
        );
        Ok(())
    }

    /// The drawing context, bound to the current back buffer. Draw calls
    /// accumulate on the buffer contents until the next [`Canvas::clear`].
    pub fn painter(&mut self) -> Result<Painter<'_>, CanvasError> {
        self.buffer.painter()
    }

    /// Erase the back buffer to the clear color. Call once per frame before
    /// redrawing; nothing else undoes the previous frame's draw calls.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        self.buffer.clear()
    }

    /// Copy the back buffer onto the visible surface in one commit. The
    /// compositor picks the frame up atomically, so no partially-drawn state
    /// is ever observable.
    pub fn present(&mut self) -> Result<(), CanvasError> {
        let pixels = self.buffer.pixels()?;
        let pool = self.pool.as_mut().ok_or(CanvasError::Uninitialized)?;

        let width = self.buffer.width as i32;
        let height = self.buffer.height as i32;
        let (buffer, slot) =
            pool.create_buffer(width, height, width * 4, wl_shm::Format::Argb8888)?;
        slot.copy_from_slice(pixels);

        buffer.attach_to(&self.surface)?;
        self.surface.damage_buffer(0, 0, width, height);
        self.surface.commit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    // Presenting needs a live compositor; what can go wrong without one is
    // the buffer lifecycle, covered here through BackBuffer.

    #[test]
    fn painter_before_allocate_is_an_error() {
        let mut buffer = BackBuffer::new(4, 4, Color::WHITE);
        assert!(matches!(buffer.painter(), Err(CanvasError::Uninitialized)));
        assert!(matches!(buffer.clear(), Err(CanvasError::Uninitialized)));
        assert!(matches!(buffer.pixels(), Err(CanvasError::Uninitialized)));
    }

    #[test]
    fn allocate_fills_with_clear_color() {
        let mut buffer = BackBuffer::new(2, 2, Color::WHITE);
        buffer.allocate();
        let pixels = buffer.pixels().unwrap();
        assert_eq!(pixels.len(), 16);
        for chunk in pixels.chunks_exact(4) {
            assert_eq!(chunk, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn clear_erases_accumulated_draws() {
        let mut buffer = BackBuffer::new(4, 4, Color::BLACK);
        buffer.allocate();
        buffer
            .painter()
            .unwrap()
            .fill_rect(Rect::new(0, 0, 4, 4), Color::RED);
        assert_eq!(&buffer.pixels().unwrap()[0..4], [0, 0, 255, 255]);

        buffer.clear().unwrap();
        for chunk in buffer.pixels().unwrap().chunks_exact(4) {
            assert_eq!(chunk, [0, 0, 0, 255]);
        }
    }
}
