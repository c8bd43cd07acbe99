pub mod cli;
pub mod core;
pub mod fixtures;
pub mod models;
pub mod theme;
pub mod utils;

// Re-export commonly used types and traits
pub use crate::core::{PostApi, PostView, ViewContext, ViewState};
pub use crate::fixtures::FixtureStore;
pub use crate::models::{Category, Config, Post, User, UserRole};
pub use crate::theme::renderer::ViewRenderer;
