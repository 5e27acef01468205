//! Application root: auth gate, view switching and shared-link handling.

mod app;
pub mod state;

pub use app::{OncoVisionApp, Shell};
