mod context;
mod pipeline;

pub use context::GraphicsContext;
pub use pipeline::{Pipeline, PipelineError, TRIANGLE_VERTICES, Vertex};
