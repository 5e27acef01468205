//! Access to the page location.
//!
//! On the web this is `window.location` / `history.replaceState`. Desktop builds
//! have no address bar, so they keep an in-process href that starts at the
//! configured public base URL (or a deep link passed on the command line).

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("browser location unavailable")]
    Unavailable,
    #[error("history.replaceState rejected the new url")]
    ReplaceRejected,
}

#[cfg(not(target_arch = "wasm32"))]
static NATIVE_HREF: once_cell::sync::Lazy<std::sync::Mutex<String>> =
    once_cell::sync::Lazy::new(|| {
        std::sync::Mutex::new(crate::core::config::DEFAULT_PUBLIC_BASE_URL.to_string())
    });

/// Seed the desktop location. No-op on the web, where the browser owns it.
pub fn install_href(href: &str) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(mut slot) = NATIVE_HREF.lock() {
            *slot = href.to_string();
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = href;
    }
}

pub fn current_href() -> Result<String, LocationError> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or(LocationError::Unavailable)?;
        window
            .location()
            .href()
            .map_err(|_| LocationError::Unavailable)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        NATIVE_HREF
            .lock()
            .map(|href| href.clone())
            .map_err(|_| LocationError::Unavailable)
    }
}

/// Swap the current url without adding a history entry or reloading.
pub fn replace_href(href: &str) -> Result<(), LocationError> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or(LocationError::Unavailable)?;
        let history = window.history().map_err(|_| LocationError::Unavailable)?;
        history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))
            .map_err(|_| LocationError::ReplaceRejected)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut slot = NATIVE_HREF.lock().map_err(|_| LocationError::Unavailable)?;
        *slot = href.to_string();
        Ok(())
    }
}
