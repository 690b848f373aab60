use crate::domain::status::StatusCheck;
use crate::error::AppError;
use crate::repo::StatusLog;
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusService {
    pub log: Arc<dyn StatusLog>,
    pub list_limit: i64,
}

impl StatusService {
    pub async fn create(&self, client_name: String) -> Result<StatusCheck, AppError> {
        let check = StatusCheck::new(client_name);
        self.log.append(&check).await?;
        Ok(check)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>, AppError> {
        Ok(self.log.list(self.list_limit).await?)
    }
}
