//! Page-level views selected by the shell.

mod about;
mod architecture;
mod diagnosis;
mod home;
mod login;
mod public_report;

pub use about::About;
pub use architecture::{Architecture, PipelineDiagram};
pub use diagnosis::DiagnosisPage;
pub use home::Home;
pub use login::Login;
pub use public_report::PublicReport;
