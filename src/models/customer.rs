// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    pub full_name: String,
    // Telefone é a identidade prática do cliente no balcão:
    // único entre registros ativos.
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resumo do histórico de visitas de um cliente.
// visit_count alimenta as regras de fidelidade do motor de desconto.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVisits {
    pub customer: Customer,
    pub visit_count: i64,
    pub lifetime_spend: Decimal,
    pub visits: Vec<VisitEntry>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitEntry {
    pub sale_id: Uuid,
    pub sold_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub services: Option<String>, // nomes agregados pelo banco ("Corte, Escova")
}
