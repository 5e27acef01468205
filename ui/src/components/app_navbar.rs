use dioxus::prelude::*;
use tracing::error;

use crate::core::{clipboard, location, platform, timing};
use crate::i18n;
use crate::shell::state::{AppEvent, AppView};
use crate::shell::Shell;
use crate::t;

const COPIED_RESET_MS: u64 = 2_000;

fn nav_label(view: AppView) -> String {
    match view {
        AppView::Home => t!("nav-home"),
        AppView::Diagnosis => t!("nav-diagnosis"),
        AppView::Architecture => t!("nav-architecture"),
        AppView::About => t!("nav-about"),
        AppView::PublicReport => String::new(),
    }
}

fn link_class(active: bool) -> &'static str {
    if active {
        "navbar__link navbar__link--active"
    } else {
        "navbar__link"
    }
}

/// Top bar for authenticated pages.
///
/// The language selector writes to the `Signal<String>` context provided by
/// the shell, which keys the page tree so every `t!` lookup re-runs.
#[component]
pub fn AppNavbar(current: AppView) -> Element {
    let mut shell = use_context::<Shell>();
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let current_lang = lang_code_ctx
        .as_ref()
        .map(|code| code())
        .unwrap_or_else(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let mut app_link_copied = use_signal(|| false);

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let share_app = move |_: MouseEvent| {
        platform::spawn_future(async move {
            let href = match location::current_href() {
                Ok(href) => href,
                Err(err) => {
                    error!("share app: {err}");
                    return;
                }
            };
            match clipboard::copy_to_clipboard(href).await {
                Ok(()) => {
                    app_link_copied.set(true);
                    timing::sleep_ms(COPIED_RESET_MS).await;
                    app_link_copied.set(false);
                }
                Err(err) => error!("share app: {err}"),
            }
        });
    };

    let share_label = if app_link_copied() {
        t!("nav-link-copied")
    } else {
        t!("nav-share-app")
    };

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                button {
                    r#type: "button",
                    class: "navbar__brand",
                    onclick: move |_| shell.dispatch(AppEvent::Navigate(AppView::Home)),
                    span { class: "navbar__brand-spark", aria_hidden: "true" }
                    span { class: "navbar__brand-mark", {t!("brand-name")} }
                    span { class: "navbar__brand-subtitle", {t!("brand-tagline")} }
                }

                nav { class: "navbar__links",
                    for view in AppView::NAV {
                        button {
                            key: "{view:?}",
                            r#type: "button",
                            class: link_class(view == current),
                            onclick: move |_| shell.dispatch(AppEvent::Navigate(view)),
                            {nav_label(view)}
                        }
                    }
                }

                div { class: "navbar__actions",
                    button {
                        r#type: "button",
                        class: "button button--ghost navbar__share",
                        onclick: share_app,
                        "{share_label}"
                    }

                    if show_switcher {
                        div { class: "navbar__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current_lang}",
                                oninput: on_change,
                                for code in langs() {
                                    option { key: "{code}", value: "{code}", "{code}" }
                                }
                            }
                        }
                    }

                    span { class: "navbar__user", {t!("nav-user")} }
                    button {
                        r#type: "button",
                        class: "button button--ghost navbar__logout",
                        onclick: move |_| shell.dispatch(AppEvent::Logout),
                        {t!("nav-sign-out")}
                    }
                }
            }
        }
    }
}
