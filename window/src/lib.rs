use anyhow::Context as _;
use raw_window_handle as rwh;

mod backend_winit;

pub const DEFAULT_LOGICAL_SIZE: (u32, u32) = (800, 600);

#[derive(Debug, Clone)]
pub struct WindowAttrs {
    pub logical_size: Option<(u32, u32)>,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowAttrs {
    fn default() -> Self {
        Self {
            logical_size: None,
            title: String::new(),
            resizable: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// delivered exactly once, after the backend has created the native window. graphics
    /// context initialization has to wait for it.
    Configure { logical_size: (u32, u32) },
    Resized { physical_size: (u32, u32) },
    CloseRequested,
}

#[derive(Debug, Clone)]
pub enum Event {
    Window(WindowEvent),
    Pointer(input::PointerEvent),
    Keyboard(input::KeyboardEvent),
}

pub trait Window: rwh::HasDisplayHandle + rwh::HasWindowHandle {
    /// drives the platform event queue without blocking. queued events become available via
    /// [`Window::pop_event`].
    fn pump_events(&mut self) -> anyhow::Result<()>;
    fn pop_event(&mut self) -> Option<Event>;
    /// physical (pixel) size of the window's inner area.
    fn size(&self) -> (u32, u32);
    fn set_title(&mut self, title: &str);
}

pub fn create_window(attrs: WindowAttrs) -> anyhow::Result<Box<dyn Window>> {
    let backend =
        backend_winit::WinitBackend::new(attrs).context("could not create winit backend")?;
    Ok(Box::new(backend))
}
