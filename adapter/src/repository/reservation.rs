use crate::database::model::reservation::{
    ReservationRow, ReservationStatsRow, StatusChangeRow,
};
use crate::database::ConnectionPool;
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::id::{ReservationId, StatusChangeId};
use kernel::model::reservation::{
    event::{CreateReservation, UpdateReservationStatus},
    Reservation, ReservationListOptions, ReservationStats, ReservationStatus,
    ReservationStatusChange,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

const RESERVATION_COLUMNS: &str = "reservation_id, name, email, phone, date, time, guests, \
     special_requests, status, admin_notes, responded_at, created_at, updated_at";

const SLOT_FULL_MESSAGE: &str =
    "This time slot is fully booked. Please select a different time.";

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
    slot_capacity: i64,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // The capacity check and the insert must not interleave with a
        // concurrent creation for the same slot, otherwise two requests can
        // both observe a free seat and both be admitted.
        self.set_transaction_serializable(&mut tx).await?;

        let booked = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM reservations
                WHERE date = $1 AND time = $2 AND status <> 'cancelled'
            "#,
        )
        .bind(event.date)
        .bind(&event.time)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_slot_conflict)?;

        if booked >= self.slot_capacity {
            return Err(AppError::SlotCapacityError(SLOT_FULL_MESSAGE.into()));
        }

        let reservation_id = ReservationId::new();
        let now = Utc::now();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, name, email, phone, date, time, guests,
                 special_requests, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9, $9)
            "#,
        )
        .bind(reservation_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(event.date)
        .bind(&event.time)
        .bind(event.guests)
        .bind(&event.special_requests)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_slot_conflict)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        // Creation is the first entry of the transition log.
        sqlx::query(
            r#"
                INSERT INTO reservation_status_history
                (change_id, reservation_id, from_status, to_status, changed_by, notes, changed_at)
                VALUES ($1, $2, NULL, 'pending', NULL, NULL, $3)
            "#,
        )
        .bind(StatusChangeId::new())
        .bind(reservation_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_slot_conflict)?;

        // The loser of a serializable conflict between two concurrent
        // creations for the same slot gets the same answer as a full slot.
        tx.commit().await.map_err(|e| {
            if is_serialization_conflict(&e) {
                AppError::SlotCapacityError(SLOT_FULL_MESSAGE.into())
            } else {
                AppError::TransactionError(e)
            }
        })?;

        let CreateReservation {
            name,
            email,
            phone,
            date,
            time,
            guests,
            special_requests,
        } = event;
        Ok(Reservation {
            id: reservation_id,
            name,
            email,
            phone,
            date,
            time,
            guests,
            special_requests,
            status: ReservationStatus::Pending,
            admin_notes: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_all(&self, options: ReservationListOptions) -> AppResult<Vec<Reservation>> {
        let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE TRUE"
        ));
        if let Some(date) = options.date {
            qb.push(" AND date = ").push_bind(date);
        }
        if let Some(email) = options.email {
            qb.push(" AND email = ").push_bind(email.to_lowercase());
        }
        qb.push(" ORDER BY created_at DESC");

        qb.build_query_as::<ReservationRow>()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Reservation::try_from)
            .collect()
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let current = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(current) = current else {
            return Err(AppError::EntityNotFound("Reservation not found".into()));
        };
        let mut reservation = Reservation::try_from(current)?;

        let now = Utc::now();
        let responded_at = responded_at_stamp(event.status, now);
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET status = $1,
                    admin_notes = COALESCE($2, admin_notes),
                    responded_at = COALESCE($3, responded_at),
                    updated_at = $4
                WHERE reservation_id = $5
            "#,
        )
        .bind(event.status.as_ref())
        .bind(&event.admin_notes)
        .bind(responded_at)
        .bind(now)
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        sqlx::query(
            r#"
                INSERT INTO reservation_status_history
                (change_id, reservation_id, from_status, to_status, changed_by, notes, changed_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(StatusChangeId::new())
        .bind(event.reservation_id)
        .bind(reservation.status.as_ref())
        .bind(event.status.as_ref())
        .bind(event.changed_by)
        .bind(&event.admin_notes)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        reservation.status = event.status;
        if let Some(notes) = event.admin_notes {
            reservation.admin_notes = Some(notes);
        }
        if let Some(at) = responded_at {
            reservation.responded_at = Some(at);
        }
        reservation.updated_at = now;
        Ok(reservation)
    }

    async fn find_history(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<ReservationStatusChange>> {
        sqlx::query_as::<_, StatusChangeRow>(
            r#"
                SELECT change_id, reservation_id, from_status, to_status,
                       changed_by, notes, changed_at
                FROM reservation_status_history
                WHERE reservation_id = $1
                ORDER BY changed_at ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(ReservationStatusChange::try_from)
        .collect()
    }

    async fn stats(&self) -> AppResult<ReservationStats> {
        let row = sqlx::query_as::<_, ReservationStatsRow>(
            r#"
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                    COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed,
                    COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                    COUNT(*) FILTER (WHERE status = 'modified') AS modified,
                    COUNT(*) FILTER (WHERE date = CURRENT_DATE) AS today
                FROM reservations
            "#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(ReservationStats {
            total: row.total,
            pending: row.pending,
            confirmed: row.confirmed,
            cancelled: row.cancelled,
            modified: row.modified,
            today: row.today,
        })
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

/// `responded_at` records when an admin acted on the request; putting a
/// reservation back to pending is not a response.
fn responded_at_stamp(
    status: ReservationStatus,
    now: chrono::DateTime<Utc>,
) -> Option<chrono::DateTime<Utc>> {
    (status != ReservationStatus::Pending).then_some(now)
}

fn is_serialization_conflict(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("40001"))
}

fn map_slot_conflict(e: sqlx::Error) -> AppError {
    if is_serialization_conflict(&e) {
        return AppError::SlotCapacityError(SLOT_FULL_MESSAGE.into());
    }
    AppError::SpecificOperationError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kernel::model::id::AdminId;

    #[test]
    fn pending_transition_does_not_stamp_responded_at() {
        let now = Utc::now();
        assert_eq!(responded_at_stamp(ReservationStatus::Pending, now), None);
        assert_eq!(
            responded_at_stamp(ReservationStatus::Confirmed, now),
            Some(now)
        );
        assert_eq!(
            responded_at_stamp(ReservationStatus::Cancelled, now),
            Some(now)
        );
    }

    #[test]
    fn non_serialization_errors_keep_their_classification() {
        assert!(!is_serialization_conflict(&sqlx::Error::RowNotFound));
        assert!(matches!(
            map_slot_conflict(sqlx::Error::RowNotFound),
            AppError::SpecificOperationError(_)
        ));
    }

    fn create_event(date: NaiveDate, time: &str, email: &str) -> CreateReservation {
        CreateReservation::new(
            "Test Guest".into(),
            email.into(),
            "555-000-1111".into(),
            date,
            time.into(),
            2,
            None,
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn fourth_booking_at_a_full_slot_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool), 3);
        let date = NaiveDate::from_ymd_opt(2031, 6, 6).unwrap();

        for i in 0..3 {
            repo.create(create_event(date, "19:00", &format!("guest{i}@example.com")))
                .await?;
        }

        let fourth = repo
            .create(create_event(date, "19:00", "late@example.com"))
            .await;
        assert!(matches!(fourth, Err(AppError::SlotCapacityError(_))));

        // Another time the same evening is unaffected.
        repo.create(create_event(date, "20:00", "other@example.com"))
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn cancelled_reservation_frees_the_slot(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool), 3);
        let date = NaiveDate::from_ymd_opt(2031, 6, 7).unwrap();

        let admin_id = AdminId::new();
        sqlx::query(
            r#"
                INSERT INTO admins (admin_id, username, email, password_hash)
                VALUES ($1, 'staff', 'staff@example.com', 'not-a-real-hash')
            "#,
        )
        .bind(admin_id)
        .execute(repo.db.inner_ref())
        .await?;

        let first = repo
            .create(create_event(date, "19:00", "first@example.com"))
            .await?;
        for i in 1..3 {
            repo.create(create_event(date, "19:00", &format!("guest{i}@example.com")))
                .await?;
        }

        repo.update_status(UpdateReservationStatus {
            reservation_id: first.id,
            status: ReservationStatus::Cancelled,
            changed_by: admin_id,
            admin_notes: None,
        })
        .await?;

        // The freed seat admits a new booking.
        repo.create(create_event(date, "19:00", "fourth@example.com"))
            .await?;

        let history = repo.find_history(first.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].from_status, None);
        assert_eq!(history[1].to_status, ReservationStatus::Cancelled);
        Ok(())
    }
}
