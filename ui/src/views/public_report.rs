use dioxus::prelude::*;

use crate::diagnosis::model::DiagnosisResult;
use crate::report::ResultsView;
use crate::shell::state::AppEvent;
use crate::shell::Shell;
use crate::t;

/// Read-only view of a report opened from a shared link.
#[component]
pub fn PublicReport(report: DiagnosisResult) -> Element {
    let mut shell = use_context::<Shell>();

    rsx! {
        section { class: "public-report",
            div { class: "public-report__banner",
                span { class: "public-report__title", {t!("report-banner")} }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| shell.dispatch(AppEvent::LeaveReport),
                    {t!("report-back")}
                }
            }
            ResultsView { result: report }
            aside { class: "public-report__disclosure",
                strong { {t!("report-disclosure-label")} }
                " "
                {t!("report-disclosure")}
            }
        }
    }
}
