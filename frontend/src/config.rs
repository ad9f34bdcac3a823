//! Runtime configuration: API base URL and file base URL.
//!
//! Resolution order (first hit wins): `window.__ROLLCALL_ENV` (env.js),
//! `window.__ROLLCALL_CONFIG`, fetched `./config.json`, compiled defaults.
//! Resolved values are cached in `OnceLock`s for the page lifetime.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_FILE_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub file_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static FILE_BASE_URL: OnceLock<String> = OnceLock::new();

/// Uploaded files and avatars are served from the file base, not the API
/// base, under a fixed view path.
pub fn compose_file_view_url(file_base: &str, relative_path: &str) -> String {
    format!(
        "{}/wx/file/view/{}",
        file_base.trim_end_matches('/'),
        relative_path.trim_start_matches('/')
    )
}

/// When only the API base is configured, the file base falls back to the API
/// origin with the path stripped.
fn file_base_from_api_base(api_base: &str) -> String {
    let trimmed = api_base.trim_end_matches('/');
    match trimmed.find("://") {
        Some(scheme_end) => {
            let rest = &trimmed[scheme_end + 3..];
            match rest.find('/') {
                Some(path_start) => trimmed[..scheme_end + 3 + path_start].to_string(),
                None => trimmed.to_string(),
            }
        }
        None => trimmed.to_string(),
    }
}

fn cache_api_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/').to_string();
    let _ = API_BASE_URL.set(value.clone());
    value
}

fn cache_file_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/').to_string();
    let _ = FILE_BASE_URL.set(value.clone());
    value
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;

    fn window() -> Option<web_sys::Window> {
        web_sys::window()
    }

    fn string_prop(obj: &js_sys::Object, key: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &key.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    }

    fn global_object(name: &str) -> Option<js_sys::Object> {
        let w = window()?;
        let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(js_sys::Object::from(any))
    }

    // window.__ROLLCALL_ENV = { API_BASE_URL: "...", FILE_BASE_URL: "..." }
    // window.__ROLLCALL_CONFIG = { api_base_url: "...", file_base_url: "..." }
    pub fn snapshot_from_globals() -> RuntimeConfig {
        let mut cfg = RuntimeConfig::default();
        if let Some(env) = global_object("__ROLLCALL_ENV") {
            cfg.api_base_url = string_prop(&env, "API_BASE_URL")
                .or_else(|| string_prop(&env, "api_base_url"));
            cfg.file_base_url = string_prop(&env, "FILE_BASE_URL")
                .or_else(|| string_prop(&env, "file_base_url"));
        }
        if let Some(obj) = global_object("__ROLLCALL_CONFIG") {
            if cfg.api_base_url.is_none() {
                cfg.api_base_url = string_prop(&obj, "api_base_url")
                    .or_else(|| string_prop(&obj, "API_BASE_URL"));
            }
            if cfg.file_base_url.is_none() {
                cfg.file_base_url = string_prop(&obj, "file_base_url")
                    .or_else(|| string_prop(&obj, "FILE_BASE_URL"));
            }
        }
        cfg
    }

    // Write the fetched config back so a later boot sees it without refetching.
    pub fn write_window_config(cfg: &RuntimeConfig) {
        if cfg.api_base_url.is_none() && cfg.file_base_url.is_none() {
            return;
        }
        let Some(w) = window() else {
            return;
        };
        let obj = js_sys::Object::new();
        if let Some(url) = &cfg.api_base_url {
            let _ = js_sys::Reflect::set(
                &obj,
                &"api_base_url".into(),
                &wasm_bindgen::JsValue::from_str(url),
            );
        }
        if let Some(url) = &cfg.file_base_url {
            let _ = js_sys::Reflect::set(
                &obj,
                &"file_base_url".into(),
                &wasm_bindgen::JsValue::from_str(url),
            );
        }
        let _ = js_sys::Reflect::set(&w, &"__ROLLCALL_CONFIG".into(), &obj);
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
async fn resolve() -> RuntimeConfig {
    let mut cfg = browser::snapshot_from_globals();
    if cfg.api_base_url.is_none() || cfg.file_base_url.is_none() {
        if let Some(fetched) = browser::fetch_runtime_config().await {
            browser::write_window_config(&fetched);
            cfg.api_base_url = cfg.api_base_url.or(fetched.api_base_url);
            cfg.file_base_url = cfg.file_base_url.or(fetched.file_base_url);
        }
    }
    cfg
}

#[cfg(not(target_arch = "wasm32"))]
async fn resolve() -> RuntimeConfig {
    // Host builds exist for tests only; tests construct clients with an
    // explicit base URL and never hit the defaults.
    RuntimeConfig::default()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let cfg = resolve().await;
    match cfg.api_base_url {
        Some(url) => cache_api_base_url(&url),
        None => cache_api_base_url(DEFAULT_API_BASE_URL),
    }
}

pub async fn await_file_base_url() -> String {
    if let Some(cached) = FILE_BASE_URL.get() {
        return cached.clone();
    }
    let cfg = resolve().await;
    match cfg.file_base_url {
        Some(url) => cache_file_base_url(&url),
        None => {
            let api_base = await_api_base_url().await;
            cache_file_base_url(&file_base_from_api_base(&api_base))
        }
    }
}

pub async fn init() {
    let _ = await_api_base_url().await;
    let _ = await_file_base_url().await;
}
