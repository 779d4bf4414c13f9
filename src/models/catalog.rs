// src/models/catalog.rs
//
// O catálogo do salão: serviços prestados e produtos de revenda.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,

    pub name: String, // Ex: "Corte Feminino"
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    pub name: String, // Ex: "Shampoo Reparador 300ml"
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub stock_quantity: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
