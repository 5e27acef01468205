use dioxus::prelude::*;

use crate::t;

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            p { class: "footer__note", {t!("footer-note")} }
        }
    }
}
