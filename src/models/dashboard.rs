// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub revenue_today: Decimal,
    pub sales_today: i64,
    pub new_customers_this_month: i64,
    pub active_customers: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub date: Option<String>, // "YYYY-MM-DD"
    pub total: Option<Decimal>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopServiceEntry {
    pub service_name: String,
    pub total_quantity: Option<i64>,
    pub total_revenue: Option<Decimal>,
}
