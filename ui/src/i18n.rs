//! Localisation for `oncovision-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/oncovision-ui.ftl` and are embedded
//! with `rust-embed`. `en-US` is the fallback and the reference for key
//! parity (see `tests/locale_parity.rs`).
//!
//! ```ignore
//! ui::i18n::init(); // idempotent
//! let label = ui::t!("nav-home");
//! let size = ui::t!("workspace-scan-size", size = "12.0 KB");
//! ```
//!
//! Clinical labels (prediction names, stage names, feature keys) are kept in
//! English on purpose and do not go through this module.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!` takes a message id plus optional `name = value` arguments and routes
/// through [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

const DOMAIN: &str = "oncovision-ui";
const FALLBACK: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK.parse().unwrap_or_default();
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparsable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // The loader is process-wide; tests that switch language take turns.
    static LOCALE: Mutex<()> = Mutex::new(());

    fn locale_lock() -> MutexGuard<'static, ()> {
        LOCALE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn both_locales_are_embedded() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let _guard = locale_lock();
        init();
        set_language("en-US").expect("fallback locale loads");
        let before = crate::t!("nav-home");
        let _ = set_language("zz-ZZ");
        let after = crate::t!("nav-home");
        assert_eq!(before, after);
        assert_eq!(after, "Home");
    }

    #[test]
    fn spanish_messages_replace_english_ones() {
        let _guard = locale_lock();
        init();
        set_language("en-US").expect("fallback locale loads");
        let english = crate::t!("nav-home");
        let english_size = crate::t!("workspace-scan-size", size = "12.0 KB");

        set_language("es-ES").expect("spanish locale loads");
        let spanish = crate::t!("nav-home");
        let spanish_size = crate::t!("workspace-scan-size", size = "12.0 KB");
        set_language("en-US").expect("fallback locale loads");

        assert_eq!(english, "Home");
        assert_eq!(spanish, "Inicio");
        assert_ne!(english_size, spanish_size);
        assert!(spanish_size.contains("12.0 KB"));
        assert!(spanish_size.contains("DE DATOS"));
    }

    #[test]
    fn login_error_matches_auth_message() {
        let _guard = locale_lock();
        init();
        set_language("en-US").expect("fallback locale loads");
        assert_eq!(crate::t!("login-error"), crate::auth::REJECTED_MESSAGE);
    }

    #[test]
    fn garbage_tag_is_ignored() {
        assert!(set_language("not a tag!").is_ok());
    }
}
