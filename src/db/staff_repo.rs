// src/db/staff_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::staff::{PerformanceRow, Staff},
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: &str,
        phone: Option<&str>,
        specialty: Option<&str>,
        commission_rate: Decimal,
        hired_at: Option<NaiveDate>,
    ) -> Result<Staff, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (full_name, phone, specialty, commission_rate, hired_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(specialty)
        .bind(commission_rate)
        .bind(hired_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT * FROM staff
            WHERE ($1 OR is_active = TRUE)
            ORDER BY full_name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(staff)
    }

    pub async fn find_active_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE id = ANY($1) AND is_active = TRUE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: &str,
        phone: Option<&str>,
        specialty: Option<&str>,
        commission_rate: Decimal,
        hired_at: Option<NaiveDate>,
    ) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff
            SET full_name = $2, phone = $3, specialty = $4, commission_rate = $5,
                hired_at = $6, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone)
        .bind(specialty)
        .bind(commission_rate)
        .bind(hired_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE staff SET is_active = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(active)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    // Linhas cruas para o relatório de desempenho: uma por item de serviço
    // das vendas em que o profissional participou, dentro do período.
    // A redução (somas, médias, agrupamentos) acontece na camada de serviço.
    pub async fn performance_rows(
        &self,
        staff_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<PerformanceRow>, AppError> {
        let rows = sqlx::query_as::<_, PerformanceRow>(
            r#"
            SELECT
                s.id AS sale_id,
                s.sold_at,
                s.total_amount AS sale_total,
                st.commission_amount,
                ss.service_name,
                ss.quantity,
                ss.line_total
            FROM sale_staff st
            JOIN sales s ON s.id = st.sale_id
            JOIN sale_services ss ON ss.sale_id = s.id
            WHERE st.staff_id = $1
              AND ($2::timestamptz IS NULL OR s.sold_at >= $2)
              AND ($3::timestamptz IS NULL OR s.sold_at <= $3)
            ORDER BY s.sold_at ASC
            "#,
        )
        .bind(staff_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
