// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sale::{PaymentMethod, Sale, SaleDetail},
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub service_id: Uuid,

    #[serde(default = "default_quantity")]
    #[schema(example = 1)]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub items: Vec<SaleItemPayload>,

    #[validate(length(min = 1, message = "required"))]
    pub staff_ids: Vec<Uuid>,

    pub payment_method: PaymentMethod,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub customer_id: Option<Uuid>,
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda fechada", body = SaleDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let items: Vec<(Uuid, i32)> = payload
        .items
        .iter()
        .map(|item| (item.service_id, item.quantity))
        .collect();

    let detail = app_state
        .sale_service
        .create_sale(
            payload.customer_id,
            &items,
            &payload.staff_ids,
            payload.payment_method,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(
        ("from" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Data final (YYYY-MM-DD)"),
        ("customerId" = Option<Uuid>, Query, description = "Filtra por cliente")
    ),
    responses(
        (status = 200, description = "Lista de vendas", body = Vec<Sale>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = query.from.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let to = query
        .to
        .map(|d| (d.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::seconds(1)).and_utc());

    let sales = app_state
        .sale_service
        .list_sales(from, to, query.customer_id)
        .await?;

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com itens e profissionais", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.sale_service.get_sale(id).await?;

    Ok((StatusCode::OK, Json(detail)))
}
