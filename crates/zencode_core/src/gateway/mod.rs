//! Idempotent share/resolve over a [`KvStore`].
//!
//! `share` derives the id from content, checks existence, and writes only when
//! absent. The check and the write are two separate store calls; concurrent
//! shares of identical text may both write, which is harmless because the
//! payload is identical. A hash collision between distinct texts is reported
//! as "already exists" without comparing content.

use crate::codec;
use crate::constants::SHARE_PATH_SEGMENT;
use crate::error::AppError;
use crate::ident::{derive_id, is_valid_short_id, ShortId};
use crate::store::KvStore;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;


/// Outcome of a share request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResult {
    pub id: ShortId,
    pub url: String,
    /// `false` when the id was already stored and no write happened.
    pub is_new: bool,
}

/// Build the canonical share URL for `id` under `base_url`.
pub fn canonical_url(base_url: &str, id: &ShortId) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        SHARE_PATH_SEGMENT,
        id
    )
}

/// Orchestrates id derivation, existence checks, and writes.
pub struct ShareGateway {
    store: Arc<dyn KvStore>,
    base_url: String,
    timeout: Duration,
}

impl ShareGateway {
    /// Construct a gateway.
    ///
    /// # Arguments
    /// - `store`: Backend holding encoded payloads.
    /// - `base_url`: Origin used by [`ShareGateway::share`] for canonical URLs.
    /// - `timeout`: Upper bound for each individual store call.
    pub fn new(store: Arc<dyn KvStore>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Default origin for canonical URLs.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Share `text` under the configured base URL.
    ///
    /// # Errors
    /// Returns a transient error when the store read or write fails or times
    /// out. A failed read is never treated as absent.
    pub async fn share(&self, text: &str) -> Result<ShareResult, AppError> {
        self.share_at(text, &self.base_url).await
    }

    /// Share `text`, building the URL from a caller-supplied origin.
    ///
    /// # Errors
    /// Same as [`ShareGateway::share`].
    pub async fn share_at(&self, text: &str, base_url: &str) -> Result<ShareResult, AppError> {
        let id = derive_id(text);
        let url = canonical_url(base_url, &id);

        let existing = self.guarded("get", self.store.get(id.as_str())).await?;
        if existing.is_some() {
            tracing::debug!(id = %id, "Code already stored; skipping write");
            return Ok(ShareResult {
                id,
                url,
                is_new: false,
            });
        }

        let payload = codec::encode(text);
        self.guarded("set", self.store.set(id.as_str(), &payload))
            .await?;
        tracing::debug!(id = %id, bytes = text.len(), "Stored new code");
        Ok(ShareResult {
            id,
            url,
            is_new: true,
        })
    }

    /// Fetch and decode the text stored under `id`.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when nothing is stored under `id` (or `id`
    ///   could not have been derived).
    /// - [`AppError::Codec`] when the stored value is corrupt.
    /// - A transient error when the store fails or times out.
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        if !is_valid_short_id(id) {
            return Err(AppError::NotFound);
        }
        let Some(encoded) = self.guarded("get", self.store.get(id)).await? else {
            tracing::debug!(id, "No code stored under id");
            return Err(AppError::NotFound);
        };
        codec::decode(&encoded)
    }

    async fn guarded<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|err| {
                tracing::warn!(op, error = %err, "Store call failed");
                err
            }),
            Err(_) => {
                tracing::warn!(op, timeout_ms = self.timeout.as_millis() as u64, "Store call timed out");
                Err(AppError::StoreTimeout(self.timeout))
            }
        }
    }
}
