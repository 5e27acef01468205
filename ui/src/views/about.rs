use dioxus::prelude::*;

use crate::t;

#[component]
pub fn About() -> Element {
    rsx! {
        article { class: "page-about",
            h1 { {t!("about-title")} }
            section { class: "card",
                h2 { {t!("about-abstract-heading")} }
                p { {t!("about-abstract-1")} }
                p { {t!("about-abstract-2")} }
            }
            section { class: "card card--muted",
                h2 { {t!("about-demo-heading")} }
                p { {t!("about-demo-body")} }
            }
        }
    }
}
