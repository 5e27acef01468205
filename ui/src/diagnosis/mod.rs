//! The simulated analysis pipeline and the workspace that drives it.

pub mod generator;
pub mod inputs;
pub mod interpretation;
pub mod model;
pub mod pipeline;
pub mod stages;
mod view;
pub mod workspace;

pub use view::DiagnosisWorkspace;
