use window::{Event, Window};

pub struct AppContext<'a> {
    pub window: &'a mut dyn Window,
    pub gfx: &'a mut gfx::GraphicsContext,
}

/// what the frame loop should do after the current iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait AppHandler {
    fn create(ctx: AppContext) -> anyhow::Result<Self>
    where
        Self: Sized;
    fn frame(&mut self, ctx: AppContext, events: impl Iterator<Item = Event>) -> Flow;
    /// runs once after the loop ends, while the gl context is still alive.
    fn destroy(&mut self, _ctx: AppContext) {}
}

mod runner;
pub use runner::run;
