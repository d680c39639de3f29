//! Window host for easel
//!
//! Owns the Wayland connection, the fixed-size xdg toplevel, the canvas and
//! both input trackers. The frame loop stays caller-driven: nothing here
//! schedules anything, the caller pumps events, draws, presents and sleeps.

use std::io::ErrorKind;

use log::{debug, info};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        xdg::{
            window::{Window, WindowDecorations},
            XdgShell,
        },
        WaylandSurface,
    },
    shm::Shm,
};
use wayland_client::{
    backend::WaylandError,
    globals::registry_queue_init,
    protocol::{wl_keyboard, wl_pointer},
    Connection, EventQueue,
};

use crate::canvas::{Canvas, CanvasError};
use crate::config::WindowConfig;
use crate::draw::Color;
use crate::keyboard::Keyboard;
use crate::mouse::Mouse;

/// A fixed-size top-level window with an attached [`Canvas`] and input
/// trackers. The trackers are bound to this window for their lifetime; there
/// is no rebinding.
pub struct AppWindow {
    conn: Connection,
    event_queue: EventQueue<WindowState>,
    state: WindowState,
}

pub(crate) struct WindowState {
    registry_state: RegistryState,
    output_state: OutputState,
    seat_state: SeatState,
    shm: Shm,
    window: Window,
    pub(crate) canvas: Canvas,
    pub(crate) keyboard: Keyboard,
    pub(crate) mouse: Mouse,
    keyboard_device: Option<wl_keyboard::WlKeyboard>,
    pointer_device: Option<wl_pointer::WlPointer>,
    configured: bool,
    open: bool,
}

impl AppWindow {
    /// Connect to the compositor, create the window, and wait for the first
    /// configure so the canvas may be initialized afterwards.
    pub fn new(config: &WindowConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::connect_to_env()?;
        let (globals, mut event_queue) = registry_queue_init(&conn)?;
        let qh = event_queue.handle();

        let compositor = CompositorState::bind(&globals, &qh)?;
        let xdg_shell = XdgShell::bind(&globals, &qh)?;
        let shm = Shm::bind(&globals, &qh)?;
        let seat_state = SeatState::new(&globals, &qh);

        info!(
            "Creating {}x{} window \"{}\"",
            config.width, config.height, config.title
        );
        let surface = compositor.create_surface(&qh);
        let canvas_surface = surface.clone();
        let window = xdg_shell.create_window(surface, WindowDecorations::RequestServer, &qh);
        window.set_title(config.title.clone());
        window.set_app_id("dev.easel");
        // Resizing makes everything more complicated; pin the size.
        window.set_min_size(Some((config.width, config.height)));
        window.set_max_size(Some((config.width, config.height)));
        window.wl_surface().commit();

        let mut state = WindowState {
            registry_state: RegistryState::new(&globals),
            output_state: OutputState::new(&globals, &qh),
            seat_state,
            shm,
            window,
            canvas: Canvas::new(
                config.width,
                config.height,
                canvas_surface,
                Color::from(config.background_color),
            ),
            keyboard: Keyboard::new(),
            mouse: Mouse::new(),
            keyboard_device: None,
            pointer_device: None,
            configured: false,
            open: true,
        };

        info!("Waiting for initial configure");
        while !state.configured {
            event_queue.blocking_dispatch(&mut state)?;
        }

        Ok(Self {
            conn,
            event_queue,
            state,
        })
    }

    /// Drain queued host events without blocking. Call once per frame before
    /// querying the trackers; input notifications are delivered to the
    /// trackers from inside this dispatch.
    pub fn pump_events(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.event_queue.flush()?;
        if let Some(guard) = self.event_queue.prepare_read() {
            match guard.read() {
                Ok(_) => {}
                // Nothing on the socket this frame.
                Err(WaylandError::Io(ref e)) if e.kind() == ErrorKind::WouldBlock => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.event_queue.dispatch_pending(&mut self.state)?;
        Ok(())
    }

    /// False once the compositor asked the window to close.
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Allocate the canvas back buffer. Valid only after construction has
    /// seen the first configure, which `new` guarantees.
    pub fn initialize_canvas(&mut self) -> Result<(), CanvasError> {
        self.state.canvas.initialize(&self.state.shm)
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.state.canvas
    }

    /// Present the canvas and flush the request out to the compositor so the
    /// frame shows up without waiting for the next dispatch.
    pub fn present(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.state.canvas.present()?;
        self.conn.flush()?;
        Ok(())
    }

    /// Handle to the keyboard tracker registered on this window.
    pub fn keyboard(&self) -> Keyboard {
        self.state.keyboard.clone()
    }

    /// Handle to the mouse tracker registered on this window.
    pub fn mouse(&self) -> Mouse {
        self.state.mouse.clone()
    }

    /// Change the window title after creation.
    pub fn set_title(&mut self, title: &str) {
        self.state.window.set_title(title.to_string());
        self.state.window.wl_surface().commit();
    }

    pub fn width(&self) -> u32 {
        self.state.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.state.canvas.height()
    }
}

impl WindowState {
    pub(crate) fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub(crate) fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub(crate) fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    pub(crate) fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }

    pub(crate) fn mark_configured(&mut self) {
        if !self.configured {
            debug!("Surface configured, canvas may allocate its buffer now");
        }
        self.configured = true;
        self.canvas.mark_realized();
    }

    pub(crate) fn request_close(&mut self) {
        info!("Close requested by compositor");
        self.open = false;
    }

    pub(crate) fn set_keyboard_device(&mut self, device: Option<wl_keyboard::WlKeyboard>) {
        self.keyboard_device = device;
        info!("Keyboard device set: {:?}", self.keyboard_device.is_some());
    }

    pub(crate) fn set_pointer_device(&mut self, device: Option<wl_pointer::WlPointer>) {
        self.pointer_device = device;
        info!("Pointer device set: {:?}", self.pointer_device.is_some());
    }
}
