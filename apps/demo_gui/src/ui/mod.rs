//! UI layer: the screen controller and its small presentation widgets.

pub mod app;
pub mod widgets;

pub use app::{BlankScene, LayoutMetrics, ScreenApp, ScreenText};
