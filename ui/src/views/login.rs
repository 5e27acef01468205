use std::rc::Rc;

use dioxus::prelude::*;

use crate::auth::{AuthOutcome, CredentialVerifier, DemoVerifier};
use crate::core::config::AppConfig;
use crate::shell::state::AppEvent;
use crate::shell::Shell;
use crate::t;

#[component]
pub fn Login() -> Element {
    let config = use_context::<AppConfig>();
    let mut shell = use_context::<Shell>();
    let verifier: Rc<dyn CredentialVerifier> =
        use_hook(|| Rc::new(DemoVerifier::new(config.demo_account.clone())));

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut verifying = use_signal(|| false);
    let mut rejected = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if verifying() {
            return;
        }
        verifying.set(true);
        rejected.set(false);

        let verifier = verifier.clone();
        let identity = email();
        let secret = password();
        spawn(async move {
            let outcome = verifier.verify(&identity, &secret).await;
            verifying.set(false);
            match outcome {
                AuthOutcome::Authenticated => shell.dispatch(AppEvent::LoggedIn),
                AuthOutcome::Rejected => rejected.set(true),
            }
        });
    };

    let demo_email = config.demo_account.email.clone();
    let demo_password = config.demo_account.password.clone();

    rsx! {
        section { class: "login",
            div { class: "login__card",
                div { class: "login__brand",
                    span { class: "navbar__brand-spark", aria_hidden: "true" }
                    h1 { {t!("login-title")} }
                    p { class: "login__subtitle", {t!("login-subtitle")} }
                }

                form { class: "login__form", onsubmit,
                    if rejected() {
                        p { class: "login__error", role: "alert", {t!("login-error")} }
                    }
                    label { class: "login__field",
                        span { {t!("login-email")} }
                        input {
                            r#type: "email",
                            required: true,
                            autocomplete: "username",
                            placeholder: "{demo_email}",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label { class: "login__field",
                        span { {t!("login-password")} }
                        input {
                            r#type: "password",
                            required: true,
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }
                    div { class: "login__options",
                        label { class: "login__remember",
                            input { r#type: "checkbox" }
                            " "
                            {t!("login-remember")}
                        }
                        span { class: "login__forgot", {t!("login-forgot")} }
                    }
                    button {
                        r#type: "submit",
                        class: "button button--primary login__submit",
                        disabled: verifying(),
                        if verifying() {
                            span { class: "spinner", aria_hidden: "true" }
                            {t!("login-verifying")}
                        } else {
                            {t!("login-submit")}
                        }
                    }
                }

                p { class: "login__footnote", {t!("login-footnote")} }
                div { class: "login__demo",
                    strong { {t!("login-demo-heading")} }
                    code { "{demo_email}" }
                    code { "{demo_password}" }
                }
            }
        }
    }
}
