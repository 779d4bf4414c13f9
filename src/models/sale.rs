// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE payment_method do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
    Transfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub customer_id: Uuid,

    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    // Qual regra de desconto venceu (se alguma).
    pub applied_rule_id: Option<Uuid>,
    pub total_amount: Decimal,

    pub payment_method: PaymentMethod,
    pub notes: Option<String>,

    pub sold_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Item de serviço com snapshot de nome e preço no momento da venda.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleService {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub service_id: Uuid,

    pub service_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleStaff {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub staff_id: Uuid,

    // Snapshot da taxa: editar o cadastro depois não reescreve comissão paga.
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
}

// Venda completa, como o frontend consome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub services: Vec<SaleService>,
    pub staff: Vec<SaleStaff>,
}
