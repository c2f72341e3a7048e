use gloo::storage::{LocalStorage, Storage};
use shared::auth::TokenStore;

use crate::services::config::AppConfig;

/// Session tokens kept in local storage as raw strings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore {
    token_key: String,
    refresh_token_key: String,
}

impl SessionStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            token_key: config.token_storage_key.clone(),
            refresh_token_key: config.refresh_token_storage_key.clone(),
        }
    }

    fn read(key: &str) -> Option<String> {
        LocalStorage::raw()
            .get_item(key)
            .ok()
            .flatten()
            .filter(|value| !value.is_empty())
    }

    fn write(key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            log::warn!("Could not persist {} to local storage", key);
        }
    }
}

impl TokenStore for SessionStore {
    fn token(&self) -> Option<String> {
        Self::read(&self.token_key)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::read(&self.refresh_token_key)
    }

    fn save(&self, token: &str, refresh_token: Option<&str>) {
        Self::write(&self.token_key, token);
        if let Some(refresh_token) = refresh_token {
            Self::write(&self.refresh_token_key, refresh_token);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.token_key);
        LocalStorage::delete(&self.refresh_token_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::auth::AuthState;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn store() -> SessionStore {
        SessionStore::new(&AppConfig {
            token_storage_key: "test_auth_token".to_string(),
            refresh_token_storage_key: "test_refresh_token".to_string(),
            ..AppConfig::default()
        })
    }

    #[wasm_bindgen_test]
    fn test_tokens_survive_as_raw_strings() {
        let store = store();
        store.clear();
        assert!(!AuthState::from_store(&store).is_authenticated);

        store.save("eyJhbGciOi.payload.sig", Some("refresh-1"));
        assert_eq!(
            LocalStorage::raw().get_item("test_auth_token").ok().flatten().as_deref(),
            Some("eyJhbGciOi.payload.sig")
        );
        assert!(AuthState::from_store(&store).is_authenticated);
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.refresh_token(), None);
    }
}
