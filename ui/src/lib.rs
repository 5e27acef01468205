//! Shared UI crate for OncoVision. Domain logic and every view live here; the
//! `web` and `desktop` crates only configure logging and launch
//! [`OncoVisionApp`].

pub mod auth;
pub mod core;
pub mod diagnosis;
pub mod i18n;
pub mod report;
pub mod shell;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;

    mod footer;
    pub use footer::Footer;
}

pub use shell::OncoVisionApp;

/// Unified theme, embedded so both shells can inline it.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
