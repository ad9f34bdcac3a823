//! Persisted client state under fixed keys.
//!
//! On wasm this is browser localStorage. On the host target the same API is
//! backed by a thread-local map so session and client code paths stay
//! testable without a browser.

use thiserror::Error;

/// Fixed storage key names. The server validates the token on every call;
/// nothing here expires client-side.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_PROFILE: &str = "user_profile";
    pub const ROLE: &str = "role";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("无法访问浏览器本地存储")]
    Unavailable,
    #[error("本地存储写入失败: {0}")]
    WriteFailed(String),
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::StorageError;

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }

    pub fn get_item(key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed(key.to_string()))
    }

    pub fn remove_item(key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::StorageError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get_item(key: &str) -> Option<String> {
        STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
        STORE.with(|store| {
            store
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        });
        Ok(())
    }

    pub fn remove_item(key: &str) {
        STORE.with(|store| {
            store.borrow_mut().remove(key);
        });
    }
}

pub fn get_item(key: &str) -> Option<String> {
    backend::get_item(key)
}

pub fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
    backend::set_item(key, value)
}

pub fn remove_item(key: &str) {
    backend::remove_item(key)
}
