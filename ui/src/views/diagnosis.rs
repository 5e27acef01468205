use dioxus::prelude::*;

use crate::diagnosis::DiagnosisWorkspace;
use crate::t;

#[component]
pub fn DiagnosisPage() -> Element {
    rsx! {
        section { class: "page-diagnosis",
            header { class: "page-diagnosis__header",
                h1 { {t!("workspace-title")} }
                p { {t!("workspace-intro")} }
            }
            DiagnosisWorkspace {}
        }
    }
}
