use crate::domain::settings::{PaymentSettings, SETTINGS_ID};
use crate::error::StoreError;
use crate::repo::{SettingsStore, StoreResult};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgSettingsRepo {
    pub pool: PgPool,
}

impl PgSettingsRepo {
    async fn fetch(&self) -> StoreResult<Option<PaymentSettings>> {
        let row = sqlx::query("SELECT document FROM payment_settings WHERE id = $1")
            .bind(SETTINGS_ID)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => {
                let doc: serde_json::Value = r.try_get("document").map_err(StoreError::from_decode)?;
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsRepo {
    async fn load(&self) -> StoreResult<Option<PaymentSettings>> {
        self.fetch().await
    }

    async fn insert_default(&self, defaults: PaymentSettings) -> StoreResult<PaymentSettings> {
        sqlx::query(
            r#"
            INSERT INTO payment_settings (id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(Json(&defaults))
        .bind(defaults.created_at)
        .bind(defaults.updated_at)
        .execute(&self.pool)
        .await?;

        // Another writer may have won the insert; the stored row is authoritative.
        Ok(self.fetch().await?.unwrap_or(defaults))
    }

    async fn save(&self, settings: &PaymentSettings) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payment_settings (id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(Json(settings))
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
