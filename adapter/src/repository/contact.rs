use crate::database::model::contact::{ContactRow, ContactStatsRow};
use crate::database::ConnectionPool;
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::contact::{
    event::{CreateContact, UpdateContactStatus},
    Contact, ContactListOptions, ContactStats, ContactStatus,
};
use kernel::model::id::ContactId;
use kernel::repository::contact::ContactRepository;
use shared::error::{AppError, AppResult};

const CONTACT_COLUMNS: &str = "contact_id, name, email, phone, subject, message, reason, \
     status, priority, admin_notes, responded_at, created_at, updated_at";

#[derive(new)]
pub struct ContactRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create(&self, event: CreateContact) -> AppResult<Contact> {
        let contact_id = ContactId::new();
        let priority = event.reason.priority();
        let now = Utc::now();
        let res = sqlx::query(
            r#"
                INSERT INTO contacts
                (contact_id, name, email, phone, subject, message, reason,
                 status, priority, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'new', $8, $9, $9)
            "#,
        )
        .bind(contact_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(&event.subject)
        .bind(&event.message)
        .bind(event.reason.as_ref())
        .bind(priority.as_ref())
        .bind(now)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No contact record has been created".into(),
            ));
        }

        let CreateContact {
            name,
            email,
            phone,
            subject,
            message,
            reason,
        } = event;
        Ok(Contact {
            id: contact_id,
            name,
            email,
            phone,
            subject,
            message,
            reason,
            status: ContactStatus::New,
            priority,
            admin_notes: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_all(&self, options: ContactListOptions) -> AppResult<Vec<Contact>> {
        let mut qb = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE TRUE"
        ));
        if let Some(status) = options.status {
            qb.push(" AND status = ").push_bind(status.to_string());
        }
        qb.push(" ORDER BY created_at DESC");

        qb.build_query_as::<ContactRow>()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Contact::try_from)
            .collect()
    }

    async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact> {
        let now = Utc::now();
        // responded_at records the first admin response only.
        let responded_at = (event.status == ContactStatus::Responded).then_some(now);
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
                UPDATE contacts
                SET status = $1,
                    admin_notes = COALESCE($2, admin_notes),
                    responded_at = COALESCE(responded_at, $3),
                    updated_at = $4
                WHERE contact_id = $5
                RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(event.status.as_ref())
        .bind(&event.admin_notes)
        .bind(responded_at)
        .bind(now)
        .bind(event.contact_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            Some(row) => Contact::try_from(row),
            None => Err(AppError::EntityNotFound("Contact message not found".into())),
        }
    }

    async fn stats(&self) -> AppResult<ContactStats> {
        let row = sqlx::query_as::<_, ContactStatsRow>(
            r#"
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'new') AS new,
                    COUNT(*) FILTER (WHERE status = 'read') AS read,
                    COUNT(*) FILTER (WHERE status = 'responded') AS responded,
                    COUNT(*) FILTER (WHERE status = 'resolved') AS resolved
                FROM contacts
            "#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(ContactStats {
            total: row.total,
            new: row.new,
            read: row.read,
            responded: row.responded,
            resolved: row.resolved,
        })
    }
}
