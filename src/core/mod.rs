pub mod api;
pub mod context;
pub mod controls;
pub mod server;
pub mod view;

pub use api::{ApiError, FixtureApi, PostApi};
pub use context::{AuthContext, ViewContext};
pub use controls::{FontDirection, FontSizeLevel, PlaybackRate};
pub use server::Server;
pub use view::{LoadOutcome, PostView, ViewError, ViewState};
