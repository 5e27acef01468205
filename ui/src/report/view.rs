use dioxus::prelude::*;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::platform::{self, Platform};
use crate::core::{clipboard, format, location, timing};
use crate::diagnosis::model::{DiagnosisResult, Prediction};
use crate::shell::state::AppEvent;
use crate::shell::Shell;
use crate::t;

use super::chart::ShapChart;
use super::share::{decode_report, share_link};

const COPIED_RESET_MS: u64 = 2_000;
/// The attention overlay is visible when a scan card first renders.
const HEATMAP_ON_OPEN: bool = true;

fn heatmap_class(prediction: Prediction) -> &'static str {
    match prediction {
        Prediction::Malignant => "results__heatmap results__heatmap--malignant",
        _ => "results__heatmap results__heatmap--clear",
    }
}

/// Full report card. `on_publish` is absent for read-only (shared) reports.
#[component]
pub fn ResultsView(result: DiagnosisResult, on_publish: Option<EventHandler<()>>) -> Element {
    let config = use_context::<AppConfig>();
    let mut shell = use_context::<Shell>();
    let mut show_heatmap = use_signal(|| HEATMAP_ON_OPEN);
    let mut link_copied = use_signal(|| false);

    let current = location::current_href().unwrap_or_default();
    let link = share_link(&current, &config.public_base_url, &result.id);

    let copy_link = {
        let link = link.clone();
        move |_: MouseEvent| {
            let link = link.clone();
            platform::spawn_future(async move {
                match clipboard::copy_to_clipboard(link).await {
                    Ok(()) => {
                        info!("share link copied");
                        link_copied.set(true);
                        timing::sleep_ms(COPIED_RESET_MS).await;
                        link_copied.set(false);
                    }
                    Err(err) => error!("copy share link: {err}"),
                }
            });
        }
    };

    // Desktop has no second tab to open, so the link is followed in place.
    let follow_link = {
        let link = link.clone();
        let id = result.id.clone();
        move |_: MouseEvent| {
            if let Err(err) = location::replace_href(&link) {
                error!("follow share link: {err}");
            }
            shell.dispatch(AppEvent::OpenReport(decode_report(&id)));
        }
    };

    let copied_label = if link_copied() {
        t!("results-link-copied")
    } else {
        t!("results-copy-shared")
    };
    let copy_panel_label = if link_copied() {
        t!("results-link-copied")
    } else {
        t!("results-copy-link")
    };
    let heatmap_label = if show_heatmap() {
        t!("results-heatmap-hide")
    } else {
        t!("results-heatmap-show")
    };

    let confidence = format::format_percent(result.confidence);
    let bar_width = format!("{:.1}%", (result.confidence * 100.0).clamp(0.0, 100.0));
    let generated = format::format_timestamp(result.created_at);
    let interpretation = result.interpretation.clone().unwrap_or_default();
    let prediction = result.prediction;
    let is_web = Platform::current() == Platform::Web;

    rsx! {
        article { class: "results",
            header { class: "results__header",
                div {
                    span { class: "results__protocol", {t!("results-protocol")} }
                    h2 { {t!("results-title")} }
                    p { class: "results__meta",
                        {t!("results-ref")}
                        " "
                        code { "{result.id}" }
                        " · "
                        {t!("results-generated", timestamp = generated.clone())}
                    }
                }
                div { class: "results__actions",
                    if !result.published {
                        if let Some(handler) = on_publish {
                            button {
                                r#type: "button",
                                class: "button button--primary",
                                onclick: move |_| handler.call(()),
                                {t!("results-publish")}
                            }
                        }
                    } else {
                        button {
                            r#type: "button",
                            class: "button button--accent",
                            onclick: copy_link.clone(),
                            "{copied_label}"
                        }
                    }
                }
            }

            div { class: "results__panels",
                section { class: "results-card results__summary",
                    span { class: "results-card__meta", {t!("results-final-prediction")} }
                    strong { class: "prediction-badge prediction-badge--{prediction.css_modifier()}",
                        "{prediction}"
                    }
                    div { class: "confidence",
                        div { class: "confidence__header",
                            span { {t!("results-confidence")} }
                            strong { "{confidence}" }
                        }
                        div { class: "confidence__track",
                            div {
                                class: "confidence__fill confidence__fill--{prediction.css_modifier()}",
                                style: "width: {bar_width}",
                            }
                        }
                    }
                }

                section { class: "results-card results__interpretation",
                    div { class: "results-card__header",
                        h3 { {t!("results-interpretation-heading")} }
                    }
                    p { class: "results__interpretation-text", "{interpretation}" }
                }

                section { class: "results-card results__scan",
                    div { class: "results-card__header",
                        h3 { {t!("results-scan-heading")} }
                        if result.image.is_some() {
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                onclick: move |_| show_heatmap.set(!show_heatmap()),
                                "{heatmap_label}"
                            }
                        }
                    }
                    {
                        match &result.image {
                            Some(image) => rsx! {
                                figure { class: "results__figure",
                                    img { src: "{image.data_url}", alt: "{image.file_name}" }
                                    if show_heatmap() {
                                        div { class: heatmap_class(prediction) }
                                    }
                                    figcaption { "{image.file_name}" }
                                }
                            },
                            None => rsx! {
                                p { class: "results-card__placeholder", {t!("results-numeric-only")} }
                            },
                        }
                    }
                }

                section { class: "results-card results__chart",
                    div { class: "results-card__header",
                        h3 { {t!("results-chart-heading")} }
                    }
                    ShapChart { features: result.features.clone() }
                }
            }

            if result.published {
                section { class: "results-card results__share",
                    h3 { {t!("results-share-heading")} }
                    div { class: "results__share-row",
                        input { r#type: "text", readonly: true, value: "{link}" }
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: copy_link,
                            "{copy_panel_label}"
                        }
                        if is_web {
                            a {
                                class: "button button--ghost",
                                href: "{link}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                {t!("results-test-link")}
                            }
                        } else {
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                onclick: follow_link,
                                {t!("results-test-link")}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_card_opens_with_the_overlay_shown() {
        assert!(HEATMAP_ON_OPEN);
        assert!(heatmap_class(Prediction::Malignant).ends_with("--malignant"));
        assert!(heatmap_class(Prediction::Benign).ends_with("--clear"));
        assert!(heatmap_class(Prediction::Normal).ends_with("--clear"));
    }
}
