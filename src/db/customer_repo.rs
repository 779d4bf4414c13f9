// src/db/customer_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::customer::{Customer, VisitEntry},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: &str,
        phone: &str,
        email: Option<&str>,
        birth_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (full_name, phone, email, birth_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(birth_date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    // Listagem padrão só traz ativos; `include_inactive` abre tudo.
    // `search` faz ILIKE em nome, telefone e e-mail (a busca do balcão).
    pub async fn list(
        &self,
        include_inactive: bool,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, AppError> {
        let term = search.map(|q| format!("%{}%", q));

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT *
            FROM customers
            WHERE ($1 OR is_active = TRUE)
              AND ($2::text IS NULL OR full_name ILIKE $2 OR phone ILIKE $2 OR email ILIKE $2)
            ORDER BY full_name ASC
            LIMIT 200
            "#,
        )
        .bind(include_inactive)
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    // Checagem de unicidade de telefone entre ATIVOS.
    // `exclude_id` permite o update do próprio registro sem conflitar consigo.
    pub async fn find_active_by_phone(
        &self,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT *
            FROM customers
            WHERE phone = $1
              AND is_active = TRUE
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: &str,
        phone: &str,
        email: Option<&str>,
        birth_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET full_name = $2, phone = $3, email = $4, birth_date = $5,
                notes = $6, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(birth_date)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    // Soft delete / reativação
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE customers SET is_active = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(active)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    // Quantas visitas (vendas) o cliente já fez. Alimenta a fidelidade.
    pub async fn count_visits(&self, customer_id: Uuid) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sales WHERE customer_id = $1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn lifetime_spend(&self, customer_id: Uuid) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(total_amount) FROM sales WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    // Histórico de visitas com os nomes dos serviços agregados pelo banco.
    pub async fn visit_entries(&self, customer_id: Uuid) -> Result<Vec<VisitEntry>, AppError> {
        let visits = sqlx::query_as::<_, VisitEntry>(
            r#"
            SELECT
                s.id AS sale_id,
                s.sold_at,
                s.total_amount,
                string_agg(ss.service_name, ', ' ORDER BY ss.service_name) AS services
            FROM sales s
            LEFT JOIN sale_services ss ON ss.sale_id = s.id
            WHERE s.customer_id = $1
            GROUP BY s.id, s.sold_at, s.total_amount
            ORDER BY s.sold_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(visits)
    }
}
