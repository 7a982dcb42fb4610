//! greencore - shared library for the green calculator

pub mod logging;
pub mod repaint;
pub mod safety;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::GreenTheme;
