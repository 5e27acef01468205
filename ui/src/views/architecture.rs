use dioxus::prelude::*;

use crate::t;

/// The six boxes of the hybrid pipeline, top to bottom.
#[component]
pub fn PipelineDiagram() -> Element {
    let steps = [
        (t!("arch-step-input"), t!("arch-step-input-detail")),
        (t!("arch-step-preprocess"), t!("arch-step-preprocess-detail")),
        (t!("arch-step-cnn"), t!("arch-step-cnn-detail")),
        (t!("arch-step-ml"), t!("arch-step-ml-detail")),
        (t!("arch-step-xai"), t!("arch-step-xai-detail")),
        (t!("arch-step-insight"), t!("arch-step-insight-detail")),
    ];
    let last = steps.len() - 1;

    rsx! {
        ol { class: "pipeline-diagram",
            for (index, (title, detail)) in steps.into_iter().enumerate() {
                li { key: "{index}", class: "pipeline-diagram__step",
                    span { class: "pipeline-diagram__index", "{index + 1}" }
                    div {
                        h3 { class: "pipeline-diagram__title", "{title}" }
                        p { class: "pipeline-diagram__detail", "{detail}" }
                    }
                    if index < last {
                        span { class: "pipeline-diagram__arrow", aria_hidden: "true", "↓" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Architecture() -> Element {
    rsx! {
        section { class: "page-architecture",
            h1 { {t!("arch-title")} }
            p { class: "page-architecture__intro", {t!("arch-intro")} }
            PipelineDiagram {}
        }
    }
}
