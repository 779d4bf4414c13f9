// src/models/staff.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,

    pub full_name: String,
    pub phone: Option<String>,
    pub specialty: Option<String>, // Ex: "Colorista"

    // Fração em [0, 1]. Ex: 0.35 = 35% de comissão.
    pub commission_rate: Decimal,

    pub hired_at: Option<NaiveDate>,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
//  RELATÓRIO DE DESEMPENHO
// =============================================================================

// Uma linha crua do banco: venda x item de serviço em que o profissional
// participou. O total e a comissão da venda se repetem em cada linha dela,
// então a agregação precisa deduplicar por sale_id.
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceRow {
    pub sale_id: Uuid,
    pub sold_at: DateTime<Utc>,
    pub sale_total: Decimal,
    pub commission_amount: Decimal,
    pub service_name: String,
    pub quantity: i32,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBreakdown {
    pub service_name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    pub staff_id: Uuid,
    pub full_name: String,

    pub sales_count: i64,
    pub total_revenue: Decimal,
    pub total_commission: Decimal,
    pub average_ticket: Decimal,

    // Agrupamento por serviço, ordenado por receita decrescente.
    pub services: Vec<ServiceBreakdown>,
}
