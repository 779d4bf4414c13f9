// src/models/discount.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE discount_kind do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "discount_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

// Uma política de desconto. A regra só se aplica quando TODAS as condições
// preenchidas batem: contagem mínima de visitas, mês de aniversário e
// combinação de serviços exigida.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    pub id: Uuid,

    pub name: String, // Ex: "Aniversariante do mês"
    pub kind: DiscountKind,
    // PERCENTAGE: 0 < value <= 100. FIXED: valor em R$.
    pub value: Decimal,

    pub min_visit_count: Option<i32>,
    pub birthday_month_only: bool,
    pub required_service_ids: Vec<Uuid>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resultado do motor de desconto para uma venda em potencial.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub applied_rule_id: Option<Uuid>,
    pub applied_rule_name: Option<String>,
}
