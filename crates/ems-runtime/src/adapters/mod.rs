pub mod logging_renderer;

pub use logging_renderer::LoggingRenderer;
