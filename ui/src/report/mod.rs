//! Result presentation plus the publish/share link codec.

mod chart;
pub mod share;
mod view;

pub use chart::{bar_span, ShapChart};
pub use view::ResultsView;
