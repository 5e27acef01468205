use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use futures_util::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::core::{format, platform};
use crate::report::ResultsView;
use crate::t;

use super::inputs::{MarkerField, ScanFile};
use super::interpretation::Interpreter;
use super::model::DiagnosisMode;
use super::pipeline::Pipeline;
use super::stages::{CancelToken, Stage};
use super::workspace::{SubmitLabel, WorkspaceState};

#[derive(Debug)]
enum WorkspaceEvent {
    SelectMode(DiagnosisMode),
    SelectScan(ScanFile),
    SetMarker(MarkerField, String),
    Submit,
    Reset,
    Publish,
}

type ActiveRun = Rc<RefCell<Option<CancelToken>>>;

fn cancel_active(active: &ActiveRun) {
    if let Some(token) = active.borrow_mut().take() {
        token.cancel();
    }
}

/// Base name of a picked file; desktop file engines hand out full paths.
fn display_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Files carried by a drop or a picker change.
fn file_engine_of<D: HasFileData + ?Sized>(data: &D) -> Option<Arc<dyn FileEngine>> {
    data.files()
}

async fn read_scan(engine: Arc<dyn FileEngine>) -> Option<ScanFile> {
    let path = engine.files().into_iter().next()?;
    let name = display_name(&path).to_string();
    match engine.read_file(&path).await {
        Some(bytes) => Some(ScanFile::new(name, 0).with_bytes(&bytes)),
        None => {
            warn!(file = %name, "could not read scan contents; continuing without preview");
            let size = engine.file_size(&path).await.unwrap_or(0);
            Some(ScanFile::new(name, size))
        }
    }
}

fn submit_text(label: SubmitLabel) -> String {
    match label {
        SubmitLabel::Initialize => t!("workspace-submit-initialize"),
        SubmitLabel::Running => t!("workspace-submit-running"),
        SubmitLabel::Restart => t!("workspace-submit-restart"),
    }
}

fn log_line_class(stage: Stage, current: Stage) -> &'static str {
    if current == stage {
        "system-log__line system-log__line--active"
    } else if current > stage {
        "system-log__line system-log__line--done"
    } else {
        "system-log__line"
    }
}

fn mode_class(mode: DiagnosisMode, selected: DiagnosisMode) -> &'static str {
    if mode == selected {
        "mode-toggle__option mode-toggle__option--active"
    } else {
        "mode-toggle__option"
    }
}

fn drop_zone_class(dragging: bool) -> &'static str {
    if dragging {
        "drop-zone drop-zone--active"
    } else {
        "drop-zone"
    }
}

#[component]
pub fn DiagnosisWorkspace() -> Element {
    let config = use_context::<AppConfig>();
    let pipeline = use_hook(|| {
        Pipeline::new(
            config.stages,
            Interpreter::from_config(&config.interpretation),
        )
    });
    let state = use_signal(WorkspaceState::default);
    let notice = use_signal(|| Option::<String>::None);
    let mut dragging = use_signal(|| false);
    let active: ActiveRun = use_hook(|| Rc::new(RefCell::new(None)));

    {
        let active = active.clone();
        use_drop(move || cancel_active(&active));
    }

    let coroutine = {
        let active = active.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<WorkspaceEvent>| {
            let active = active.clone();
            let pipeline = pipeline.clone();
            let mut state = state;
            let mut notice = notice;

            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        WorkspaceEvent::SelectMode(mode) => {
                            cancel_active(&active);
                            notice.set(None);
                            state.with_mut(|ws| ws.select_mode(mode));
                        }
                        WorkspaceEvent::SelectScan(scan) => {
                            if !scan.is_image() {
                                notice.set(Some(t!("workspace-not-image")));
                                continue;
                            }
                            cancel_active(&active);
                            notice.set(None);
                            info!(file = %scan.name, size = scan.size_bytes, "scan selected");
                            state.with_mut(|ws| ws.select_scan(scan));
                        }
                        WorkspaceEvent::SetMarker(field, value) => {
                            state.with_mut(|ws| ws.set_marker(field, value));
                        }
                        WorkspaceEvent::Reset => {
                            cancel_active(&active);
                            notice.set(None);
                            state.with_mut(|ws| ws.reset());
                        }
                        WorkspaceEvent::Publish => {
                            if let Some(result) = state.with_mut(|ws| ws.publish_result().cloned()) {
                                info!(id = %result.id, "result published");
                            }
                        }
                        WorkspaceEvent::Submit => {
                            let Some((run_id, request)) = state.with_mut(|ws| ws.begin_run())
                            else {
                                debug!("submit ignored: no input or run in progress");
                                continue;
                            };

                            cancel_active(&active);
                            let cancel = CancelToken::new();
                            active.borrow_mut().replace(cancel.clone());

                            let pipeline = pipeline.clone();
                            let mut state = state;
                            platform::spawn_future(async move {
                                let mut rng = StdRng::from_entropy();
                                let outcome = pipeline
                                    .run(request, &mut rng, &cancel, move |stage| {
                                        if !state.with_mut(|ws| ws.apply_stage(run_id, stage)) {
                                            debug!(run_id, ?stage, "stale stage update dropped");
                                        }
                                    })
                                    .await;
                                match outcome {
                                    Ok(result) => {
                                        if !state.with_mut(|ws| ws.finish_run(run_id, result)) {
                                            debug!(run_id, "stale result dropped");
                                        }
                                    }
                                    Err(err) => info!(run_id, "run abandoned: {err}"),
                                }
                            });
                        }
                    }
                }
            }
        })
    };

    let send = move |event: WorkspaceEvent| coroutine.send(event);

    let on_files = move |engine: Option<Arc<dyn FileEngine>>| {
        let Some(engine) = engine else {
            return;
        };
        platform::spawn_future(async move {
            if let Some(scan) = read_scan(engine).await {
                coroutine.send(WorkspaceEvent::SelectScan(scan));
            }
        });
    };

    let snapshot = state();
    let stage = snapshot.stage();
    let mode = snapshot.mode;
    let processing = snapshot.is_processing();
    let can_submit = snapshot.can_submit();
    let submit_label = submit_text(snapshot.submit_label());
    let notice_text = notice();

    rsx! {
        div { class: "workspace",
            aside { class: "workspace__inputs",
                div { class: "mode-toggle", role: "tablist",
                    button {
                        r#type: "button",
                        class: mode_class(DiagnosisMode::Image, mode),
                        onclick: move |_| send(WorkspaceEvent::SelectMode(DiagnosisMode::Image)),
                        {t!("workspace-mode-image")}
                    }
                    button {
                        r#type: "button",
                        class: mode_class(DiagnosisMode::Clinical, mode),
                        onclick: move |_| send(WorkspaceEvent::SelectMode(DiagnosisMode::Clinical)),
                        {t!("workspace-mode-clinical")}
                    }
                }

                section { class: "card workspace__card",
                    h2 { class: "workspace__heading", {t!("workspace-input-heading")} }

                    if mode == DiagnosisMode::Image {
                        {
                            match snapshot.scan.clone() {
                                Some(scan) => rsx! {
                                    div { class: "scan-summary",
                                        if let Some(preview) = scan.preview.clone() {
                                            img { class: "scan-summary__thumb", src: "{preview.data_url}", alt: "{scan.name}" }
                                        }
                                        div {
                                            p { class: "scan-summary__name", "{scan.name}" }
                                            p { class: "scan-summary__size",
                                                {t!("workspace-scan-size", size = format::format_kilobytes(scan.size_bytes))}
                                            }
                                        }
                                        button {
                                            r#type: "button",
                                            class: "button button--ghost",
                                            disabled: processing,
                                            onclick: move |_| send(WorkspaceEvent::Reset),
                                            {t!("workspace-remove-scan")}
                                        }
                                    }
                                },
                                None => rsx! {
                                    label {
                                        class: drop_zone_class(dragging()),
                                        ondragover: move |evt| {
                                            evt.prevent_default();
                                            dragging.set(true);
                                        },
                                        ondragleave: move |_| dragging.set(false),
                                        ondrop: move |evt| {
                                            evt.prevent_default();
                                            dragging.set(false);
                                            on_files(file_engine_of(&*evt.data()));
                                        },
                                        span { class: "drop-zone__title", {t!("workspace-drop-title")} }
                                        span { class: "drop-zone__hint", {t!("workspace-drop-hint")} }
                                        span { class: "button button--accent", {t!("workspace-browse")} }
                                        input {
                                            class: "visually-hidden",
                                            r#type: "file",
                                            accept: "image/*",
                                            multiple: false,
                                            onchange: move |evt| on_files(file_engine_of(&*evt.data())),
                                        }
                                    }
                                },
                            }
                        }
                    } else {
                        div { class: "marker-form",
                            for field in MarkerField::FORM {
                                label { key: "{field.key()}", class: "marker-form__field",
                                    span { "{field.label()}" }
                                    input {
                                        r#type: "number",
                                        step: "any",
                                        value: "{snapshot.markers.get(field)}",
                                        disabled: processing,
                                        oninput: move |evt| send(WorkspaceEvent::SetMarker(field, evt.value())),
                                    }
                                }
                            }
                        }
                    }

                    if let Some(text) = notice_text {
                        p { class: "workspace__notice", role: "status", "{text}" }
                    }

                    button {
                        r#type: "button",
                        class: "button button--primary workspace__submit",
                        disabled: !can_submit,
                        onclick: move |_| send(WorkspaceEvent::Submit),
                        if processing {
                            span { class: "spinner", aria_hidden: "true" }
                        }
                        "{submit_label}"
                    }
                }

                section { class: "system-log",
                    h3 { class: "system-log__heading", {t!("workspace-log-heading")} }
                    ul {
                        for step in Stage::PIPELINE {
                            li { key: "{step.log_tag()}", class: log_line_class(step, stage),
                                span { class: "system-log__tag", "[{step.log_tag()}]" }
                                " "
                                span { "{step.label()}" }
                            }
                        }
                    }
                    if stage == Stage::Complete {
                        p { class: "system-log__success", {t!("workspace-log-success")} }
                    }
                }
            }

            div { class: "workspace__output",
                {
                    match snapshot.result.clone() {
                        Some(result) => rsx! {
                            ResultsView {
                                result,
                                on_publish: move |_| send(WorkspaceEvent::Publish),
                            }
                        },
                        None if processing => rsx! {
                            div { class: "workspace__progress",
                                span { class: "spinner spinner--large", aria_hidden: "true" }
                                p { class: "workspace__progress-label", "{stage.label()}" }
                            }
                        },
                        None => rsx! {
                            div { class: "workspace__placeholder",
                                h3 { {t!("workspace-awaiting-title")} }
                                p { {t!("workspace-awaiting-body")} }
                            }
                        },
                    }
                }
            }
        }
    }
}
