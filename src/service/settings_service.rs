use crate::domain::settings::{PaymentSettings, PaymentSettingsUpdate};
use crate::error::AppError;
use crate::repo::SettingsStore;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsService {
    pub store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Current settings, creating the default document on first access.
    pub async fn get(&self) -> Result<PaymentSettings, AppError> {
        if let Some(settings) = self.store.load().await? {
            return Ok(settings);
        }

        tracing::info!("payment settings missing, writing defaults");
        Ok(self
            .store
            .insert_default(PaymentSettings::defaults(Utc::now()))
            .await?)
    }

    /// Read, merge, write. There is no version check, so two concurrent
    /// updates race and the later write replaces the whole document.
    pub async fn update(&self, update: PaymentSettingsUpdate) -> Result<PaymentSettings, AppError> {
        let touched = update.touched();
        let mut settings = self.get().await?;
        settings.apply(update, Utc::now());
        self.store.save(&settings).await?;

        tracing::info!(gateways = ?touched, "payment settings updated");
        Ok(settings)
    }
}
