pub mod renderer;

pub use renderer::ViewRenderer;
