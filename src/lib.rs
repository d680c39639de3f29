//! easel: flicker-free immediate-mode drawing and frame-synchronous input
//! polling on Wayland.
//!
//! The caller runs a fixed-rate frame loop: pump events, clear the canvas,
//! draw, query the input trackers, present, reset the trackers, sleep. The
//! canvas double-buffers so only completed frames reach the screen; the
//! trackers turn the asynchronous event stream into per-frame level and edge
//! state.

pub mod button;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod geometry;
pub mod keyboard;
pub mod mouse;
pub mod window;

mod wayland;

pub use crate::button::do_button;
pub use crate::canvas::{Canvas, CanvasError};
pub use crate::config::WindowConfig;
pub use crate::draw::{Color, Painter, TextStyle};
pub use crate::geometry::{Point, Rect};
pub use crate::keyboard::Keyboard;
pub use crate::mouse::{Mouse, MouseButton};
pub use crate::window::AppWindow;

// Key identifiers used with the keyboard tracker.
pub use smithay_client_toolkit::seat::keyboard::Keysym;
