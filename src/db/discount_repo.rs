// src/db/discount_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::discount::{DiscountKind, DiscountRule},
};

#[derive(Clone)]
pub struct DiscountRepository {
    pool: PgPool,
}

impl DiscountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        kind: DiscountKind,
        value: Decimal,
        min_visit_count: Option<i32>,
        birthday_month_only: bool,
        required_service_ids: &[Uuid],
    ) -> Result<DiscountRule, AppError> {
        let rule = sqlx::query_as::<_, DiscountRule>(
            r#"
            INSERT INTO discount_rules (
                name, kind, value, min_visit_count, birthday_month_only, required_service_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(value)
        .bind(min_visit_count)
        .bind(birthday_month_only)
        .bind(required_service_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<DiscountRule>, AppError> {
        let rules = sqlx::query_as::<_, DiscountRule>(
            r#"
            SELECT * FROM discount_rules
            WHERE ($1 OR is_active = TRUE)
            ORDER BY name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    // O motor de desconto só enxerga regras ativas.
    pub async fn list_active(&self) -> Result<Vec<DiscountRule>, AppError> {
        let rules = sqlx::query_as::<_, DiscountRule>(
            "SELECT * FROM discount_rules WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DiscountRule>, AppError> {
        let rule = sqlx::query_as::<_, DiscountRule>("SELECT * FROM discount_rules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rule)
    }

    pub async fn find_active_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<DiscountRule>, AppError> {
        let rule = sqlx::query_as::<_, DiscountRule>(
            r#"
            SELECT * FROM discount_rules
            WHERE name = $1
              AND is_active = TRUE
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        kind: DiscountKind,
        value: Decimal,
        min_visit_count: Option<i32>,
        birthday_month_only: bool,
        required_service_ids: &[Uuid],
    ) -> Result<Option<DiscountRule>, AppError> {
        let rule = sqlx::query_as::<_, DiscountRule>(
            r#"
            UPDATE discount_rules
            SET name = $2, kind = $3, value = $4, min_visit_count = $5,
                birthday_month_only = $6, required_service_ids = $7, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(kind)
        .bind(value)
        .bind(min_visit_count)
        .bind(birthday_month_only)
        .bind(required_service_ids)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE discount_rules SET is_active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
