use std::collections::BTreeMap;
use std::sync::Arc;

use safecare_auth::jwt::TokenKeys;
use safecare_core::store_keys;
use safecare_storage::error::StorageError;
use safecare_storage::objects::ObjectStore;
use safecare_storage::state::{load_state_or_default, save_state};
use tokio::sync::Mutex;

use crate::config::ApiConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: ObjectStore,
    pub tokens: Arc<TokenKeys>,
    /// Revoked token ids mapped to their expiry (unix seconds).
    pub revoked: Arc<Mutex<BTreeMap<String, i64>>>,
    /// Serializes sign-ups so two requests cannot claim the same email.
    pub signup_lock: Arc<Mutex<()>>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub async fn new(config: &ApiConfig) -> Result<Self, StorageError> {
        let store = match &config.data_file {
            Some(path) => ObjectStore::open(path).await?,
            None => ObjectStore::in_memory(),
        };
        let revoked: BTreeMap<String, i64> =
            load_state_or_default(&store, store_keys::REVOKED_TOKENS).await?;

        Ok(Self {
            store,
            tokens: Arc::new(TokenKeys::from_secret(
                config.jwt_secret.as_bytes(),
                config.token_ttl_secs,
            )),
            revoked: Arc::new(Mutex::new(revoked)),
            signup_lock: Arc::new(Mutex::new(())),
            bcrypt_cost: config.bcrypt_cost,
        })
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.lock().await.contains_key(jti)
    }

    /// Revoke a token until its expiry, dropping entries that have expired
    /// on their own, and persist the list.
    pub async fn revoke(&self, jti: &str, exp: i64) -> Result<(), StorageError> {
        let now = jiff::Timestamp::now().as_second();
        let mut revoked = self.revoked.lock().await;
        revoked.retain(|_, expires| *expires > now);
        revoked.insert(jti.to_string(), exp);
        save_state(&self.store, store_keys::REVOKED_TOKENS, &*revoked).await?;
        tracing::info!(jti = jti, remaining = revoked.len(), "token revoked");
        Ok(())
    }
}
