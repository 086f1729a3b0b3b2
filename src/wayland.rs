// Wayland integration module
// Opens a fixed-size window with smithay-client-toolkit and drives the viewer from keyboard input

use crate::app::{Command, Direction, LoopState, ViewerState};
use crate::render::{compose_frame, FrameClock};
use anyhow::{Context, Result};
use log::{debug, error, info};
use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_keyboard, delegate_output, delegate_pointer, delegate_registry,
    delegate_seat, delegate_shm, delegate_xdg_shell, delegate_xdg_window,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    seat::{
        keyboard::{KeyEvent, KeyboardHandler, Keysym, Modifiers},
        pointer::{PointerEvent, PointerEventKind, PointerHandler},
        Capability, SeatHandler, SeatState,
    },
    shell::{
        xdg::{
            window::{Window, WindowConfigure, WindowDecorations, WindowHandler},
            XdgShell,
        },
        WaylandSurface,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_keyboard, wl_output, wl_pointer, wl_seat, wl_shm, wl_surface},
    Connection, QueueHandle,
};

/// Application id announced to the compositor
const APP_ID: &str = "pixview";

/// Map a pressed key to a viewer command
fn command_for_key(keysym: Keysym) -> Option<Command> {
    match keysym {
        Keysym::Escape => Some(Command::Quit),
        Keysym::Right => Some(Command::Step(Direction::Forward)),
        Keysym::Left => Some(Command::Step(Direction::Backward)),
        _ => None,
    }
}

/// Serial to hide the cursor with, for pointer events that enter the window
fn cursor_hide_serial(kind: &PointerEventKind) -> Option<u32> {
    match kind {
        PointerEventKind::Enter { serial } => Some(*serial),
        _ => None,
    }
}

/// Main Wayland application state
struct WaylandApp {
    // Registry state
    registry_state: RegistryState,
    // Seat state for input handling
    seat_state: SeatState,
    // Output state for display info
    output_state: OutputState,
    // Shared memory for buffer allocation
    shm: Shm,

    // Viewer state: file list and current slide
    viewer: ViewerState,

    // Surface and buffer management
    window: Option<Window>,
    keyboard: Option<wl_keyboard::WlKeyboard>,
    pointer: Option<wl_pointer::WlPointer>,
    pool: Option<SlotPool>,
    buffer: Option<Buffer>,
    width: u32,
    height: u32,
    configured: bool,

    // Redraw flag
    needs_redraw: bool,
    clock: FrameClock,
}

impl WaylandApp {
    /// Create a new Wayland application
    fn new(
        registry_state: RegistryState,
        seat_state: SeatState,
        output_state: OutputState,
        shm: Shm,
        viewer: ViewerState,
    ) -> Self {
        let config = viewer.config();
        let (width, height) = (config.target_width, config.target_height);
        let clock = FrameClock::new(config.fps);
        Self {
            registry_state,
            seat_state,
            output_state,
            shm,
            viewer,
            window: None,
            keyboard: None,
            pointer: None,
            pool: None,
            buffer: None,
            width,
            height,
            configured: false,
            needs_redraw: false,
            clock,
        }
    }

    /// Render the current slide, present it and wait out the frame budget
    fn draw(&mut self) {
        if !self.configured {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };

        window.set_title(self.viewer.title());

        let (width, height) = (self.width, self.height);
        let stride = width as i32 * 4;
        let buffer_size = stride as usize * height as usize;

        if self.pool.is_none() {
            match SlotPool::new(buffer_size, &self.shm) {
                Ok(pool) => self.pool = Some(pool),
                Err(e) => {
                    error!("Failed to create slot pool: {}. Buffer size: {} bytes", e, buffer_size);
                    return;
                }
            }
        }
        let Some(pool) = self.pool.as_mut() else {
            return;
        };

        let (buffer, canvas) =
            match pool.create_buffer(width as i32, height as i32, stride, wl_shm::Format::Argb8888) {
                Ok(buf) => buf,
                Err(e) => {
                    error!("Failed to create buffer {}x{}: {}", width, height, e);
                    return;
                }
            };

        let slide = self.viewer.slide();
        compose_frame(canvas, width, height, &slide.image, slide.position);

        let surface = window.wl_surface();
        if let Err(e) = buffer.attach_to(surface) {
            error!("Failed to attach buffer: {:?}", e);
            return;
        }
        surface.damage_buffer(0, 0, width as i32, height as i32);
        surface.commit();

        self.buffer = Some(buffer);
        self.needs_redraw = false;
        self.clock.tick();
    }

    fn handle_command(&mut self, command: Command) {
        let index = self.viewer.slide().index;
        if self.viewer.apply(command) == LoopState::Running && self.viewer.slide().index != index {
            self.needs_redraw = true;
        }
    }
}

// Implement required traits for smithay-client-toolkit

impl CompositorHandler for WaylandApp {
    fn scale_factor_changed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: i32) {}

    fn transform_changed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: wl_output::Transform) {}

    fn frame(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: u32) {}

    fn surface_enter(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: &wl_output::WlOutput) {}

    fn surface_leave(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: &wl_output::WlOutput) {}
}

impl OutputHandler for WaylandApp {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn update_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn output_destroyed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}
}

impl WindowHandler for WaylandApp {
    fn request_close(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _window: &Window) {
        info!("Window closed");
        self.handle_command(Command::Quit);
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _window: &Window,
        configure: WindowConfigure,
        _serial: u32,
    ) {
        // The window size is fixed; compositor suggestions are ignored
        debug!("Window configured: {:?}", configure.new_size);

        self.configured = true;
        self.draw();
    }
}

impl SeatHandler for WaylandApp {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    fn new_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        debug!("New capability: {:?}", capability);

        if capability == Capability::Keyboard && self.keyboard.is_none() {
            match self.seat_state.get_keyboard(qh, &seat, None) {
                Ok(keyboard) => self.keyboard = Some(keyboard),
                Err(e) => error!("Failed to get keyboard: {}", e),
            }
        }
        // Only bound to hide the cursor over the window
        if capability == Capability::Pointer && self.pointer.is_none() {
            match self.seat_state.get_pointer(qh, &seat) {
                Ok(pointer) => self.pointer = Some(pointer),
                Err(e) => error!("Failed to get pointer: {}", e),
            }
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        debug!("Capability removed: {:?}", capability);

        if capability == Capability::Keyboard {
            if let Some(keyboard) = self.keyboard.take() {
                keyboard.release();
            }
        }
        if capability == Capability::Pointer {
            if let Some(pointer) = self.pointer.take() {
                pointer.release();
            }
        }
    }

    fn remove_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}
}

impl KeyboardHandler for WaylandApp {
    fn enter(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_keyboard::WlKeyboard, _: &wl_surface::WlSurface, _: u32, _: &[u32], _: &[Keysym]) {}

    fn leave(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_keyboard::WlKeyboard, _: &wl_surface::WlSurface, _: u32) {}

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        debug!("Key pressed: {:?}", event.keysym);

        if let Some(command) = command_for_key(event.keysym) {
            self.handle_command(command);
        }
    }

    fn release_key(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_keyboard::WlKeyboard, _: u32, _: KeyEvent) {}

    fn update_modifiers(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_keyboard::WlKeyboard, _: u32, _: Modifiers, _: u32) {}
}

impl PointerHandler for WaylandApp {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            if let Some(serial) = cursor_hide_serial(&event.kind) {
                debug!("Pointer entered, hiding cursor");
                pointer.set_cursor(serial, None, 0, 0);
            }
        }
    }
}

impl ShmHandler for WaylandApp {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for WaylandApp {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState, SeatState];
}

// Delegate macros
delegate_compositor!(WaylandApp);
delegate_output!(WaylandApp);
delegate_seat!(WaylandApp);
delegate_keyboard!(WaylandApp);
delegate_pointer!(WaylandApp);
delegate_shm!(WaylandApp);
delegate_xdg_shell!(WaylandApp);
delegate_xdg_window!(WaylandApp);
delegate_registry!(WaylandApp);

/// Open the viewer window and run the event loop until the user quits
pub fn run(viewer: ViewerState) -> Result<()> {
    info!("Connecting to Wayland display");

    // Connect to Wayland display
    let conn = Connection::connect_to_env().context("Failed to connect to Wayland display")?;

    // Initialize registry and event queue
    let (globals, mut event_queue) =
        registry_queue_init(&conn).context("Failed to initialize registry")?;
    let qh = event_queue.handle();

    // Initialize required globals
    let compositor_state =
        CompositorState::bind(&globals, &qh).context("Failed to bind compositor")?;
    let xdg_shell = XdgShell::bind(&globals, &qh).context("Failed to bind xdg shell")?;
    let shm = Shm::bind(&globals, &qh).context("Failed to bind shm")?;

    // Create application state
    let mut app = WaylandApp::new(
        RegistryState::new(&globals),
        SeatState::new(&globals, &qh),
        OutputState::new(&globals, &qh),
        shm,
        viewer,
    );

    // Create a window pinned to the target size
    let surface = compositor_state.create_surface(&qh);
    let window = xdg_shell.create_window(surface, WindowDecorations::RequestServer, &qh);
    let size = (app.width, app.height);
    window.set_title(app.viewer.title());
    window.set_app_id(APP_ID);
    window.set_min_size(Some(size));
    window.set_max_size(Some(size));

    // Commit the surface to trigger configure
    window.commit();

    app.window = Some(window);

    info!("Starting event loop ({}x{})", size.0, size.1);
    info!("Controls: Left/Right to browse, Escape to quit");

    // Main event loop
    loop {
        if let Err(e) = event_queue.blocking_dispatch(&mut app) {
            error!("Wayland dispatch failed: {}", e);
            return Err(e).context("Lost connection to the Wayland display");
        }

        if app.viewer.state() == LoopState::Quit {
            info!("Exiting application");
            break;
        }

        if app.needs_redraw {
            app.draw();
        }
    }

    Ok(())
}
