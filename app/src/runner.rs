use raw_window_handle::{HasDisplayHandle as _, HasWindowHandle as _};
use window::{Event, Window, WindowAttrs, WindowEvent};

use crate::{AppContext, AppHandler, Flow};

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        println!(
            "{level:<5} {file}:{line} > {text}",
            level = record.level(),
            file = record.file().unwrap_or_else(|| record.target()),
            line = record
                .line()
                .map_or_else(|| "??".to_string(), |line| line.to_string()),
            text = record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    fn init() {
        log::set_logger(&Logger).expect("could not set logger");
        log::set_max_level(log::LevelFilter::Info);
    }
}

enum Graphics {
    Initialized(gfx::GraphicsContext),
    Uninit,
}

impl Graphics {
    fn init(
        &mut self,
        display_handle: raw_window_handle::DisplayHandle,
        window_handle: raw_window_handle::WindowHandle,
        physical_size: (u32, u32),
    ) -> anyhow::Result<&mut gfx::GraphicsContext> {
        assert!(matches!(self, Self::Uninit));

        let context = gfx::GraphicsContext::new(display_handle, window_handle, physical_size)?;

        *self = Self::Initialized(context);
        let Self::Initialized(init) = self else {
            unreachable!();
        };
        Ok(init)
    }
}

struct Context<A: AppHandler> {
    window: Box<dyn Window>,
    graphics: Graphics,
    events: Vec<Event>,
    handler: Option<A>,
    close_requested: bool,
}

impl<A: AppHandler> Context<A> {
    fn new(window_attrs: WindowAttrs) -> anyhow::Result<Self> {
        let window = window::create_window(window_attrs)?;
        Ok(Self {
            window,
            graphics: Graphics::Uninit,
            events: Vec::new(),
            handler: None,
            close_requested: false,
        })
    }

    fn iterate(&mut self) -> anyhow::Result<()> {
        self.window.pump_events()?;

        while let Some(event) = self.window.pop_event() {
            match event {
                Event::Window(WindowEvent::Configure { .. }) => match self.graphics {
                    Graphics::Uninit => {
                        let igc = self.graphics.init(
                            self.window.display_handle()?,
                            self.window.window_handle()?,
                            self.window.size(),
                        )?;

                        self.handler = Some(A::create(AppContext {
                            window: self.window.as_mut(),
                            gfx: igc,
                        })?);
                    }
                    Graphics::Initialized(_) => {
                        unreachable!();
                    }
                },
                Event::Window(WindowEvent::Resized { physical_size }) => {
                    if let Graphics::Initialized(ref mut igc) = self.graphics {
                        if let Err(err) = igc.resize(physical_size) {
                            log::warn!("could not resize surface: {err:?}");
                        }
                    }
                }
                Event::Window(WindowEvent::CloseRequested) => {
                    self.close_requested = true;
                }
                _ => {}
            }
            self.events.push(event);
        }

        let events = self.events.drain(..);

        let (Some(handler), Graphics::Initialized(igc)) =
            (self.handler.as_mut(), &mut self.graphics)
        else {
            return Ok(());
        };

        let flow = handler.frame(
            AppContext {
                window: self.window.as_mut(),
                gfx: igc,
            },
            events,
        );
        if flow == Flow::Exit {
            self.close_requested = true;
        }

        igc.swap_buffers()?;

        Ok(())
    }

    fn shutdown(&mut self) {
        if let (Some(handler), Graphics::Initialized(igc)) =
            (self.handler.as_mut(), &mut self.graphics)
        {
            handler.destroy(AppContext {
                window: self.window.as_mut(),
                gfx: igc,
            });
        }
    }
}

pub fn run<A: AppHandler>(window_attrs: WindowAttrs) -> anyhow::Result<()> {
    Logger::init();

    let mut ctx = Context::<A>::new(window_attrs)?;
    while !ctx.close_requested {
        ctx.iterate()?;
    }
    ctx.shutdown();

    Ok(())
}
