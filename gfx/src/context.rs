use std::num::NonZeroU32;

use anyhow::Context as _;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle as rwh;

fn non_zero_size(physical_size: (u32, u32)) -> anyhow::Result<(NonZeroU32, NonZeroU32)> {
    let width = NonZeroU32::new(physical_size.0).context("zero window width")?;
    let height = NonZeroU32::new(physical_size.1).context("zero window height")?;
    Ok((width, height))
}

/// owns the gl context and window surface; everything is acquired in [`Self::new`] and
/// released exactly once when the value drops. the surface and context keep the display
/// alive internally.
pub struct GraphicsContext {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    pub gl: glow::Context,
}

impl GraphicsContext {
    pub fn new(
        display_handle: rwh::DisplayHandle,
        window_handle: rwh::WindowHandle,
        physical_size: (u32, u32),
    ) -> anyhow::Result<Self> {
        let raw_display_handle = display_handle.as_raw();
        let raw_window_handle = window_handle.as_raw();

        #[cfg(target_os = "macos")]
        let preference = DisplayApiPreference::Cgl;
        #[cfg(windows)]
        let preference = DisplayApiPreference::Wgl(Some(raw_window_handle));
        #[cfg(not(any(windows, target_os = "macos")))]
        let preference = DisplayApiPreference::Egl;

        let display = unsafe { Display::new(raw_display_handle, preference) }
            .context("could not create gl display")?;

        let config = Self::choose_config(&display, raw_window_handle)?;

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current_context = unsafe { display.create_context(&config, &context_attrs) }
            .context("could not create gl context")?;

        let (width, height) = non_zero_size(physical_size)?;
        let surface_attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .context("could not create window surface")?;

        let context = not_current_context
            .make_current(&surface)
            .context("could not make gl context current")?;

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };

        Ok(Self {
            context,
            surface,
            gl,
        })
    }

    fn choose_config(
        display: &Display,
        raw_window_handle: rwh::RawWindowHandle,
    ) -> anyhow::Result<Config> {
        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .compatible_with_native_window(raw_window_handle)
            .build();
        let configs = unsafe { display.find_configs(template) }
            .context("could not enumerate gl configs")?;
        configs
            .reduce(|accum, config| {
                if config.num_samples() > accum.num_samples() {
                    config
                } else {
                    accum
                }
            })
            .context("no compatible gl config")
    }

    pub fn resize(&self, physical_size: (u32, u32)) -> anyhow::Result<()> {
        let (width, height) = non_zero_size(physical_size)?;
        self.surface.resize(&self.context, width, height);
        Ok(())
    }

    /// applies the new swap interval immediately; 1 when vsync is enabled, 0 otherwise.
    pub fn set_swap_interval(&self, vsync: bool) -> anyhow::Result<()> {
        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        self.surface
            .set_swap_interval(&self.context, interval)
            .context("could not set swap interval")
    }

    pub fn swap_buffers(&self) -> anyhow::Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("could not swap buffers")
    }
}
