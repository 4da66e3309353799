pub mod app;
pub mod bridge;
pub mod context;
pub mod vm;
pub mod views;

pub use app::{App, WINDOW_TITLE};
pub use bridge::ScriptBridge;
pub use context::{AppContext, FragmentSource, HostMode, UiApp, build_app_context};
