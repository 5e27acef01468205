use dioxus::prelude::*;

use crate::shell::state::{AppEvent, AppView};
use crate::shell::Shell;
use crate::t;

use super::PipelineDiagram;

#[component]
pub fn Home() -> Element {
    let mut shell = use_context::<Shell>();

    rsx! {
        section { class: "page-home",
            div { class: "page-home__hero",
                span { class: "badge", {t!("home-badge")} }
                h1 { class: "page-home__title",
                    {t!("home-title-lead")}
                    br {}
                    span { class: "page-home__accent", {t!("home-title-accent")} }
                }
                p { class: "page-home__intro", {t!("home-intro")} }
                ul { class: "page-home__features",
                    li { {t!("home-feature-cnn")} }
                    li { {t!("home-feature-ml")} }
                    li { {t!("home-feature-xai")} }
                }
                button {
                    r#type: "button",
                    class: "button button--primary page-home__cta",
                    onclick: move |_| shell.dispatch(AppEvent::Navigate(AppView::Diagnosis)),
                    {t!("home-cta")}
                }
            }
            PipelineDiagram {}
        }
    }
}
