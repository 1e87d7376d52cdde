use crate::database::model::outbox::OutboxEmailRow;
use crate::database::ConnectionPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::id::OutboxEmailId;
use kernel::model::outbox::{EnqueueEmail, OutboxEmail};
use kernel::repository::outbox::OutboxRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct OutboxRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl OutboxRepository for OutboxRepositoryImpl {
    async fn enqueue(&self, event: EnqueueEmail) -> AppResult<OutboxEmailId> {
        let outbox_id = OutboxEmailId::new();
        let now = Utc::now();
        let res = sqlx::query(
            r#"
                INSERT INTO email_outbox
                (outbox_id, recipient, subject, body, status, attempts,
                 next_attempt_at, created_at)
                VALUES ($1, $2, $3, $4, 'queued', 0, $5, $5)
            "#,
        )
        .bind(outbox_id)
        .bind(&event.recipient)
        .bind(&event.subject)
        .bind(&event.body)
        .bind(now)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No outbox record has been created".into(),
            ));
        }
        Ok(outbox_id)
    }

    async fn fetch_due(&self, limit: i64) -> AppResult<Vec<OutboxEmail>> {
        sqlx::query_as::<_, OutboxEmailRow>(
            r#"
                SELECT outbox_id, recipient, subject, body, status, attempts,
                       last_error, next_attempt_at, created_at, sent_at
                FROM email_outbox
                WHERE status = 'queued' AND next_attempt_at <= $1
                ORDER BY created_at ASC
                LIMIT $2
            "#,
        )
        .bind(Utc::now())
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(OutboxEmail::try_from)
        .collect()
    }

    async fn mark_sent(&self, id: OutboxEmailId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE email_outbox
                SET status = 'sent', sent_at = $1, last_error = NULL
                WHERE outbox_id = $2
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("outbox email not found".into()));
        }
        Ok(())
    }

    async fn mark_failure(
        &self,
        id: OutboxEmailId,
        error: &str,
        retry_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        // No retry date means the attempt budget is exhausted.
        let res = match retry_at {
            Some(retry_at) => sqlx::query(
                r#"
                    UPDATE email_outbox
                    SET attempts = attempts + 1, last_error = $1, next_attempt_at = $2
                    WHERE outbox_id = $3
                "#,
            )
            .bind(error)
            .bind(retry_at)
            .bind(id),
            None => sqlx::query(
                r#"
                    UPDATE email_outbox
                    SET attempts = attempts + 1, last_error = $1, status = 'failed'
                    WHERE outbox_id = $2
                "#,
            )
            .bind(error)
            .bind(id),
        }
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("outbox email not found".into()));
        }
        Ok(())
    }
}
