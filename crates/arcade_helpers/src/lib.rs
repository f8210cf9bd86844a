mod app;
pub use app::*;

mod window_resizing;
