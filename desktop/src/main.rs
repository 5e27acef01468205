#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::logger::tracing::{info, Level};
use dioxus::prelude::*;

use ui::core::config::AppConfig;
use ui::core::location;
use ui::OncoVisionApp;

const THEME_CSS: &str = ui::THEME_CSS;

/// First argument that looks like a url, e.g. a shared report link.
fn deep_link<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter().skip(1).find(|arg| arg.contains("://"))
}

fn prepare() -> AppConfig {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }

    let config = AppConfig::from_env();
    let href = deep_link(std::env::args()).unwrap_or_else(|| config.public_base_url.clone());
    info!(%href, "starting OncoVision desktop");
    location::install_href(&href);
    config
}

#[cfg(feature = "desktop")]
fn main() {
    let config = prepare();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("OncoVision XAI – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                ),
        )
        .with_context(config)
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    let config = prepare();
    LaunchBuilder::server().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    // Runtime maximize fallback (in case initial builder maximize is ignored by WM)
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        // Theme is always inlined; desktop builds ship no stylesheet file.
        document::Style { "{THEME_CSS}" }
        OncoVisionApp {}
    }
}

#[cfg(test)]
mod tests {
    use super::deep_link;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn picks_the_first_url_argument() {
        let found = deep_link(args(&[
            "oncovision-desktop",
            "--verbose",
            "http://localhost:8080/?reportId=ONCO-M12345",
        ]));
        assert_eq!(
            found.as_deref(),
            Some("http://localhost:8080/?reportId=ONCO-M12345")
        );
    }

    #[test]
    fn ignores_the_binary_path_and_plain_flags() {
        assert_eq!(deep_link(args(&["file:///opt/oncovision"])), None);
        assert_eq!(deep_link(args(&["oncovision-desktop", "-psn_0_1"])), None);
    }
}
