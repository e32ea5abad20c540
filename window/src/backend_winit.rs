use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, anyhow};
use input::{Button, ButtonState, KeyState, KeyboardEvent, PointerEvent, Scancode};
use raw_window_handle as rwh;
use winit::platform::pump_events::EventLoopExtPumpEvents;

use crate::{DEFAULT_LOGICAL_SIZE, Event, Window, WindowAttrs, WindowEvent};

#[inline]
fn map_pointer_button(button: winit::event::MouseButton) -> Option<Button> {
    use winit::event::MouseButton;
    match button {
        MouseButton::Left => Some(Button::Primary),
        MouseButton::Right => Some(Button::Secondary),
        MouseButton::Middle => Some(Button::Tertiary),
        _ => None,
    }
}

#[inline]
fn map_keyboard_physical_key(physical_key: winit::keyboard::PhysicalKey) -> Option<Scancode> {
    use winit::keyboard::{KeyCode, PhysicalKey};
    match physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Some(Scancode::Esc),
        PhysicalKey::Code(KeyCode::Digit0) => Some(Scancode::Num0),
        PhysicalKey::Code(KeyCode::KeyR) => Some(Scancode::R),
        PhysicalKey::Code(KeyCode::KeyG) => Some(Scancode::G),
        PhysicalKey::Code(KeyCode::KeyB) => Some(Scancode::B),
        PhysicalKey::Code(KeyCode::Space) => Some(Scancode::Space),
        PhysicalKey::Code(KeyCode::F12) => Some(Scancode::F12),
        _ => None,
    }
}

struct App {
    window_attrs: WindowAttrs,

    window: Option<winit::window::Window>,
    window_create_error: Option<winit::error::OsError>,

    events: VecDeque<Event>,
}

pub struct WinitBackend {
    event_loop: winit::event_loop::EventLoop<()>,
    app: App,
}

impl winit::application::ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let logical_size = self
            .window_attrs
            .logical_size
            .unwrap_or(DEFAULT_LOGICAL_SIZE);

        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(&self.window_attrs.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                logical_size.0 as f64,
                logical_size.1 as f64,
            ))
            .with_resizable(self.window_attrs.resizable);
        match event_loop.create_window(window_attrs) {
            Ok(window) => self.window = Some(window),
            Err(err) => self.window_create_error = Some(err),
        }

        self.events
            .push_back(Event::Window(WindowEvent::Configure { logical_size }));

        log::info!("created winit window");
    }

    fn window_event(
        &mut self,
        _event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        window_event: winit::event::WindowEvent,
    ) {
        let window = self.window.as_ref().unwrap();
        assert!(window.id() == window_id);

        use winit::event::WindowEvent::*;
        let maybe_event = match window_event {
            Resized(physical_size) => Some(Event::Window(WindowEvent::Resized {
                physical_size: (physical_size.width, physical_size.height),
            })),
            CursorMoved { position, .. } => Some(Event::Pointer(PointerEvent::Move {
                position: (position.x, position.y),
            })),
            MouseInput { button, state, .. } => {
                map_pointer_button(button).map(|button| {
                    Event::Pointer(PointerEvent::Button {
                        state: if state.is_pressed() {
                            ButtonState::Pressed
                        } else {
                            ButtonState::Released
                        },
                        button,
                    })
                })
            }
            KeyboardInput { event, .. } => {
                map_keyboard_physical_key(event.physical_key).map(|scancode| {
                    Event::Keyboard(KeyboardEvent {
                        state: if event.state.is_pressed() {
                            KeyState::Pressed
                        } else {
                            KeyState::Released
                        },
                        scancode,
                        repeat: event.repeat,
                    })
                })
            }
            CloseRequested => Some(Event::Window(WindowEvent::CloseRequested)),
            other => {
                log::trace!("unused window event: {other:?}");
                None
            }
        };
        if let Some(event) = maybe_event {
            self.events.push_back(event);
        }
    }
}

impl WinitBackend {
    pub fn new(attrs: WindowAttrs) -> anyhow::Result<Self> {
        let this = Self {
            event_loop: winit::event_loop::EventLoop::new()?,
            app: App {
                window_attrs: attrs,

                window: None,
                window_create_error: None,

                events: VecDeque::new(),
            },
        };
        Ok(this)
    }
}

impl rwh::HasDisplayHandle for WinitBackend {
    fn display_handle(&self) -> Result<rwh::DisplayHandle<'_>, rwh::HandleError> {
        self.event_loop.display_handle()
    }
}

impl rwh::HasWindowHandle for WinitBackend {
    fn window_handle(&self) -> Result<rwh::WindowHandle<'_>, rwh::HandleError> {
        if let Some(ref window) = self.app.window {
            window.window_handle()
        } else {
            Err(rwh::HandleError::Unavailable)
        }
    }
}

impl Window for WinitBackend {
    fn pump_events(&mut self) -> anyhow::Result<()> {
        use winit::platform::pump_events::PumpStatus;
        // NOTE: zero timeout; the frame loop must never stall waiting for input.
        let ret = match self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app)
        {
            PumpStatus::Exit(code) => Err(anyhow!(format!("unexpected exit (code {code})"))),
            PumpStatus::Continue => Ok(()),
        };

        if let Some(err) = self.app.window_create_error.take() {
            return Err(err).context("could not create window");
        }
        assert!(self.app.window.is_some());

        ret
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.app.events.pop_front()
    }

    fn size(&self) -> (u32, u32) {
        let window = self.app.window.as_ref().expect("initialized window");
        let inner_size = window.inner_size();
        (inner_size.width, inner_size.height)
    }

    fn set_title(&mut self, title: &str) {
        let window = self.app.window.as_ref().expect("initialized window");
        window.set_title(title);
    }
}
