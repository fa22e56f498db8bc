//! UI layer: app shell and the painted draft canvas.

pub mod app;
pub mod canvas;

pub use app::WeaveApp;
