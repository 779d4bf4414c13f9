// src/db/notification_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notification::{Notification, NotificationChannel, NotificationStatus},
};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Grava a tentativa como PENDING antes de falar com o provedor.
    // Se o processo cair no meio do envio, fica o rastro.
    pub async fn create_pending(
        &self,
        customer_id: Option<Uuid>,
        sale_id: Option<Uuid>,
        channel: NotificationChannel,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<Notification, AppError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (customer_id, sale_id, channel, recipient, subject, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(sale_id)
        .bind(channel)
        .bind(recipient)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_sent(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notifications SET status = 'SENT', sent_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn mark_failed(&self, id: Uuid, error_message: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notifications SET status = 'FAILED', error_message = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(error_message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, AppError> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    pub async fn list(
        &self,
        status: Option<NotificationStatus>,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE ($1::notification_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT 200
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }
}
