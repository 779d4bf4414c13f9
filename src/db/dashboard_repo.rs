// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        // Uma transação para um snapshot consistente dos quatro números.
        let mut tx = self.pool.begin().await?;

        // A. Faturamento de Hoje
        let revenue_today = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(total_amount)
            FROM sales
            WHERE sold_at::date = CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        // B. Vendas de Hoje
        let sales_today = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sales WHERE sold_at::date = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        // C. Clientes novos no mês
        let new_customers_this_month = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM customers
            WHERE date_trunc('month', created_at) = date_trunc('month', CURRENT_DATE)
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Clientes ativos
        let active_customers = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customers WHERE is_active = TRUE",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            revenue_today,
            sales_today,
            new_customers_this_month,
            active_customers,
        })
    }

    // 2. Gráfico de Linha (Últimos 30 dias)
    pub async fn get_sales_last_30_days(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        let data = sqlx::query_as::<_, SalesChartEntry>(
            r#"
            SELECT
                to_char(sold_at, 'YYYY-MM-DD') AS date,
                SUM(total_amount) AS total
            FROM sales
            WHERE sold_at >= (CURRENT_DATE - INTERVAL '30 days')
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 3. Top 5 serviços por receita
    pub async fn get_top_services(&self) -> Result<Vec<TopServiceEntry>, AppError> {
        let data = sqlx::query_as::<_, TopServiceEntry>(
            r#"
            SELECT
                ss.service_name,
                SUM(ss.quantity)::bigint AS total_quantity,
                SUM(ss.line_total) AS total_revenue
            FROM sale_services ss
            GROUP BY ss.service_name
            ORDER BY total_revenue DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
