// src/db/sale_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sale::{PaymentMethod, Sale, SaleService, SaleStaff},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ESCRITA (sempre dentro da transação da venda)
    // =========================================================================

    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        subtotal: Decimal,
        discount_amount: Decimal,
        applied_rule_id: Option<Uuid>,
        total_amount: Decimal,
        payment_method: PaymentMethod,
        notes: Option<&str>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                customer_id, subtotal, discount_amount, applied_rule_id,
                total_amount, payment_method, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(subtotal)
        .bind(discount_amount)
        .bind(applied_rule_id)
        .bind(total_amount)
        .bind(payment_method)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    // Item com snapshot de nome e preço do serviço.
    pub async fn insert_sale_service<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        service_id: Uuid,
        service_name: &str,
        unit_price: Decimal,
        quantity: i32,
        line_total: Decimal,
    ) -> Result<SaleService, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleService>(
            r#"
            INSERT INTO sale_services (
                sale_id, service_id, service_name, unit_price, quantity, line_total
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(service_id)
        .bind(service_name)
        .bind(unit_price)
        .bind(quantity)
        .bind(line_total)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn insert_sale_staff<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        staff_id: Uuid,
        commission_rate: Decimal,
        commission_amount: Decimal,
    ) -> Result<SaleStaff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, SaleStaff>(
            r#"
            INSERT INTO sale_staff (sale_id, staff_id, commission_rate, commission_amount)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(staff_id)
        .bind(commission_rate)
        .bind(commission_amount)
        .fetch_one(executor)
        .await?;

        Ok(link)
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn list(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        customer_id: Option<Uuid>,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT *
            FROM sales
            WHERE ($1::timestamptz IS NULL OR sold_at >= $1)
              AND ($2::timestamptz IS NULL OR sold_at <= $2)
              AND ($3::uuid IS NULL OR customer_id = $3)
            ORDER BY sold_at DESC
            LIMIT 200
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    pub async fn services_of(&self, sale_id: Uuid) -> Result<Vec<SaleService>, AppError> {
        let items = sqlx::query_as::<_, SaleService>(
            "SELECT * FROM sale_services WHERE sale_id = $1 ORDER BY service_name ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn staff_of(&self, sale_id: Uuid) -> Result<Vec<SaleStaff>, AppError> {
        let links = sqlx::query_as::<_, SaleStaff>(
            "SELECT * FROM sale_staff WHERE sale_id = $1",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}
