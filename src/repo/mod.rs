use crate::domain::settings::PaymentSettings;
use crate::domain::status::StatusCheck;
use crate::error::StoreError;
use async_trait::async_trait;

pub mod in_memory;
pub mod settings_repo;
pub mod status_checks_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-document store for [`PaymentSettings`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored document, or `None` if it was never written.
    async fn load(&self) -> StoreResult<Option<PaymentSettings>>;

    /// Writes `defaults` only if no document exists yet, then returns whatever
    /// is stored. Concurrent callers all observe the same document.
    async fn insert_default(&self, defaults: PaymentSettings) -> StoreResult<PaymentSettings>;

    /// Replaces the whole document.
    async fn save(&self, settings: &PaymentSettings) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Append-only log of status pings.
#[async_trait]
pub trait StatusLog: Send + Sync {
    async fn append(&self, check: &StatusCheck) -> StoreResult<()>;

    /// At most `limit` entries, oldest first.
    async fn list(&self, limit: i64) -> StoreResult<Vec<StatusCheck>>;

    async fn ping(&self) -> StoreResult<()>;
}
