use crate::domain::settings::PaymentSettings;
use crate::domain::status::StatusCheck;
use crate::repo::{SettingsStore, StatusLog, StoreResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local settings document. Used by tests and by local runs without Postgres.
#[derive(Default, Clone)]
pub struct InMemorySettingsStore {
    doc: Arc<RwLock<Option<PaymentSettings>>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> StoreResult<Option<PaymentSettings>> {
        Ok(self.doc.read().await.clone())
    }

    async fn insert_default(&self, defaults: PaymentSettings) -> StoreResult<PaymentSettings> {
        let mut doc = self.doc.write().await;
        Ok(doc.get_or_insert(defaults).clone())
    }

    async fn save(&self, settings: &PaymentSettings) -> StoreResult<()> {
        *self.doc.write().await = Some(settings.clone());
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Append-only status log kept in insertion order.
#[derive(Default, Clone)]
pub struct InMemoryStatusLog {
    entries: Arc<RwLock<Vec<StatusCheck>>>,
}

impl InMemoryStatusLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusLog for InMemoryStatusLog {
    async fn append(&self, check: &StatusCheck) -> StoreResult<()> {
        self.entries.write().await.push(check.clone());
        Ok(())
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<StatusCheck>> {
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit).cloned().collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
