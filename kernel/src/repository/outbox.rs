use crate::model::id::OutboxEmailId;
use crate::model::outbox::{EnqueueEmail, OutboxEmail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait OutboxRepository: Send + Sync {
    async fn enqueue(&self, event: EnqueueEmail) -> AppResult<OutboxEmailId>;
    /// Queued emails whose next attempt is due, oldest first.
    async fn fetch_due(&self, limit: i64) -> AppResult<Vec<OutboxEmail>>;
    async fn mark_sent(&self, id: OutboxEmailId) -> AppResult<()>;
    /// Records a delivery failure. `retry_at` schedules the next attempt;
    /// `None` marks the email as permanently failed.
    async fn mark_failure(
        &self,
        id: OutboxEmailId,
        error: &str,
        retry_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;
}
