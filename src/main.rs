use app::{AppContext, AppHandler, Flow};
use window::WindowAttrs;

mod clock;
mod color;
mod policy;
mod sampler;

use clock::{FpsMeter, FrameClock};
use color::{ColorState, ToggleState};
use sampler::InputSampler;

const APP_NAME: &str = "prism";
const WINDOW_SIZE: (u32, u32) = (800, 600);

struct Demo {
    color: ColorState,
    toggles: ToggleState,
    sampler: InputSampler,
    clock: FrameClock,
    fps: FpsMeter,
    pipeline: gfx::Pipeline,
}

impl AppHandler for Demo {
    fn create(ctx: AppContext) -> anyhow::Result<Self> {
        let pipeline = gfx::Pipeline::new(&ctx.gfx.gl)?;

        // vsync starts off for maximum frame rate; F12 flips it at runtime
        ctx.gfx.set_swap_interval(false)?;

        let clock = FrameClock::start();
        let fps = FpsMeter::new(clock.now_secs());
        Ok(Self {
            color: ColorState::INITIAL,
            toggles: ToggleState::default(),
            sampler: InputSampler::default(),
            clock,
            fps,
            pipeline,
        })
    }

    fn frame(&mut self, ctx: AppContext, events: impl Iterator<Item = window::Event>) -> Flow {
        let elapsed = self.clock.elapsed();
        let sample = self.sampler.sample(events, ctx.window.size());

        if sample.close {
            return Flow::Exit;
        }

        if sample.toggle_animate {
            self.toggles.animate_color = !self.toggles.animate_color;
        }
        if sample.toggle_vsync {
            self.toggles.vsync_enabled = !self.toggles.vsync_enabled;
            if let Err(err) = ctx.gfx.set_swap_interval(self.toggles.vsync_enabled) {
                log::warn!("could not apply swap interval: {err:?}");
            }
            log::info!(
                "vsync: {}",
                if self.toggles.vsync_enabled { "ON" } else { "OFF" }
            );
        }

        self.color = policy::next_color(
            self.color,
            &sample,
            self.toggles.animate_color,
            elapsed,
        );

        self.pipeline.draw(&ctx.gfx.gl, self.color.as_array());

        if let Some(fps) = self.fps.tick(self.clock.now_secs()) {
            ctx.window
                .set_title(&window_title(fps, self.toggles.vsync_enabled, self.color));
        }

        Flow::Continue
    }

    fn destroy(&mut self, ctx: AppContext) {
        self.pipeline.destroy(&ctx.gfx.gl);
    }
}

fn window_title(fps: f64, vsync: bool, color: ColorState) -> String {
    format!(
        "{APP_NAME} | FPS: {fps:.1} | VSync: {vsync} | R:{r:.2} G:{g:.2} B:{b:.2}",
        vsync = if vsync { "ON" } else { "OFF" },
        r = color.r,
        g = color.g,
        b = color.b,
    )
}

fn main() {
    let attrs = WindowAttrs {
        logical_size: Some(WINDOW_SIZE),
        title: APP_NAME.to_string(),
        resizable: false,
    };
    if let Err(err) = app::run::<Demo>(attrs) {
        log::error!("fatal: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title_format() {
        let title = window_title(59.9604, false, ColorState::INITIAL);
        assert_eq!(title, "prism | FPS: 60.0 | VSync: OFF | R:1.00 G:0.00 B:0.00");

        let color = ColorState {
            r: 0.25,
            g: 0.5,
            b: 0.066_987_3,
            a: 1.0,
        };
        let title = window_title(143.21, true, color);
        assert_eq!(title, "prism | FPS: 143.2 | VSync: ON | R:0.25 G:0.50 B:0.07");
    }
}
