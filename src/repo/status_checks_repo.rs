use crate::domain::status::StatusCheck;
use crate::repo::{StatusLog, StoreResult};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgStatusChecksRepo {
    pub pool: PgPool,
}

#[async_trait]
impl StatusLog for PgStatusChecksRepo {
    async fn append(&self, check: &StatusCheck) -> StoreResult<()> {
        sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES ($1, $2, $3)")
            .bind(check.id)
            .bind(&check.client_name)
            .bind(check.timestamp)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<StatusCheck>> {
        let rows = sqlx::query(
            "SELECT id, client_name, timestamp FROM status_checks ORDER BY seq ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StatusCheck {
                id: r.get("id"),
                client_name: r.get("client_name"),
                timestamp: r.get("timestamp"),
            })
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
