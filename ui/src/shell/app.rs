use dioxus::prelude::*;
use tracing::{info, warn};

use crate::components::{AppNavbar, Footer};
use crate::core::config::AppConfig;
use crate::core::location;
use crate::core::platform::Platform;
use crate::report::share::{report_from_href, strip_report_id};
use crate::views::{About, Architecture, DiagnosisPage, Home, Login, PublicReport};

use super::state::{transition, AppEvent, AppState, AppView, Screen, ShellEffect};

/// Handle to the shell state, shared with every view through context.
#[derive(Clone, Copy)]
pub struct Shell {
    state: Signal<AppState>,
}

impl Shell {
    pub fn state(&self) -> AppState {
        self.state.read().clone()
    }

    pub fn view(&self) -> AppView {
        self.state.read().view
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        let next = transition(&self.state.read(), event);
        for effect in &next.effects {
            apply_effect(*effect);
        }
        self.state.set(next.state);
    }
}

fn apply_effect(effect: ShellEffect) {
    match effect {
        ShellEffect::ClearReportParam => {
            let result = location::current_href()
                .and_then(|href| location::replace_href(&strip_report_id(&href)));
            if let Err(err) = result {
                warn!("could not clear report parameter: {err}");
            }
        }
    }
}

fn boot_state() -> AppState {
    let report = match location::current_href() {
        Ok(href) => report_from_href(&href),
        Err(err) => {
            warn!("location unavailable at start-up: {err}");
            None
        }
    };
    info!(
        platform = Platform::current().as_str(),
        shared_report = report.is_some(),
        "shell booting"
    );
    if let Some(report) = &report {
        info!(id = %report.id, "opening shared report");
    }
    AppState::boot(report)
}

#[component]
pub fn OncoVisionApp() -> Element {
    crate::i18n::init();

    // Entry points may hand in a config through the launch context.
    use_hook(|| {
        if try_consume_context::<AppConfig>().is_none() {
            provide_context(AppConfig::from_env());
        }
    });

    let state = use_signal(boot_state);
    let shell = use_context_provider(|| Shell { state });

    // Language code shared with the navbar; keying the tree on it re-renders
    // every translated string after a switch.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    let snapshot = shell.state();
    let screen = snapshot.screen();

    rsx! {
        div {
            key: "{lang_code()}",
            class: "app",
            if snapshot.shows_navbar() {
                AppNavbar { current: snapshot.view }
            }
            main { class: "page",
                {
                    match screen {
                        Screen::Login => rsx! { Login {} },
                        Screen::PublicReport => match snapshot.public_report {
                            Some(report) => rsx! { PublicReport { report } },
                            None => rsx! { Login {} },
                        },
                        Screen::Page(AppView::Diagnosis) => rsx! { DiagnosisPage {} },
                        Screen::Page(AppView::Architecture) => rsx! { Architecture {} },
                        Screen::Page(AppView::About) => rsx! { About {} },
                        Screen::Page(_) => rsx! { Home {} },
                    }
                }
            }
            Footer {}
        }
    }
}
