//! Frame-synchronous mouse state tracking
//!
//! Button notifications arrive asynchronously from the Wayland event
//! dispatch; the frame loop polls the accumulated state. Unlike the
//! keyboard's additive edge sets, each button has a single edge slot: if a
//! press and a release both land inside one frame window, only the most
//! recent transition is observable. That lossy sampling is accepted policy,
//! not a bug.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::{Point, Rect};

/// The three tracked mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Usually left click.
    Primary,
    /// Usually right click, or two-finger click on many trackpads.
    Secondary,
    Middle,
}

impl MouseButton {
    /// Map a Linux evdev button code to a tracked button.
    pub(crate) fn from_evdev(code: u32) -> Option<Self> {
        match code {
            0x110 => Some(Self::Primary),   // BTN_LEFT
            0x111 => Some(Self::Secondary), // BTN_RIGHT
            0x112 => Some(Self::Middle),    // BTN_MIDDLE
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Middle => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Down,
    Up,
}

#[derive(Default)]
struct PointerState {
    x: f64,
    y: f64,
    held: [bool; 3],
    // One slot per button; the latest notification since the last reset
    // wins, earlier ones inside the same frame window are lost.
    edge: [Option<Transition>; 3],
}

/// Cloneable handle to the mouse tracker. One tracker is bound to one window
/// for its whole lifetime; clones share the same state.
#[derive(Clone, Default)]
pub struct Mouse {
    inner: Arc<Mutex<PointerState>>,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor x in window coordinates.
    pub fn x(&self) -> i32 {
        self.inner.lock().x as i32
    }

    /// Cursor y in window coordinates.
    pub fn y(&self) -> i32 {
        self.inner.lock().y as i32
    }

    /// Cursor position in window coordinates. Read live from the latest
    /// motion notification, never frame-cached: two calls within one frame
    /// may differ if the pointer moved between them.
    pub fn position(&self) -> Point {
        let state = self.inner.lock();
        Point::new(state.x as i32, state.y as i32)
    }

    /// True if the button is currently held down, regardless of frames.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.inner.lock().held[button.index()]
    }

    /// True if the button's most recent transition since the last reset was
    /// a press.
    pub fn is_button_down_this_frame(&self, button: MouseButton) -> bool {
        self.inner.lock().edge[button.index()] == Some(Transition::Down)
    }

    /// True if the button's most recent transition since the last reset was
    /// a release.
    pub fn is_button_up_this_frame(&self, button: MouseButton) -> bool {
        self.inner.lock().edge[button.index()] == Some(Transition::Up)
    }

    /// True if the cursor lies inside the rectangle, inclusive on all four
    /// bounds (a zero-sized rectangle still registers hits exactly on it).
    pub fn is_in_rect(&self, rect: Rect) -> bool {
        rect.contains(self.position())
    }

    /// Call at the end of every frame, after all queries, so the
    /// "this frame" queries answer for the right frame window.
    pub fn reset_for_next_frame(&self) {
        self.inner.lock().edge = [None; 3];
    }

    /// Record a button press. Normally called from the window's event
    /// plumbing.
    pub fn notify_press(&self, button: MouseButton) {
        let mut state = self.inner.lock();
        state.held[button.index()] = true;
        state.edge[button.index()] = Some(Transition::Down);
    }

    /// Record a button release. Normally called from the window's event
    /// plumbing.
    pub fn notify_release(&self, button: MouseButton) {
        let mut state = self.inner.lock();
        state.held[button.index()] = false;
        state.edge[button.index()] = Some(Transition::Up);
    }

    /// Record the cursor moving to window-relative coordinates.
    pub fn notify_motion(&self, x: f64, y: f64) {
        let mut state = self.inner.lock();
        state.x = x;
        state.y = y;
    }
}
