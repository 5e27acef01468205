use dioxus::logger::tracing::{info, Level};
use dioxus::prelude::*;

use ui::core::config::AppConfig;
use ui::OncoVisionApp;

const THEME_CSS: &str = ui::THEME_CSS;

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }

    let config = AppConfig::from_env();
    info!(
        model = %config.interpretation.model,
        interpretation = config.interpretation.api_key.is_some(),
        "starting OncoVision web"
    );

    LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "OncoVision XAI" }
        document::Style { "{THEME_CSS}" }
        OncoVisionApp {}
    }
}
