// src/handlers/discounts.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::sales::SaleItemPayload,
    models::discount::{DiscountKind, DiscountQuote, DiscountRule},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRulePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Aniversariante do mês")]
    pub name: String,

    pub kind: DiscountKind,

    #[schema(value_type = f64, example = 15.0)]
    pub value: Decimal,

    #[schema(example = 5)]
    pub min_visit_count: Option<i32>,

    #[serde(default)]
    pub birthday_month_only: bool,

    #[serde(default)]
    pub required_service_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRulesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDiscountPayload {
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    pub items: Vec<SaleItemPayload>,
}

// POST /api/discounts/rules
#[utoipa::path(
    post,
    path = "/api/discounts/rules",
    tag = "Discounts",
    request_body = DiscountRulePayload,
    responses(
        (status = 201, description = "Regra criada", body = DiscountRule),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome já usado por regra ativa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_rule(
    State(app_state): State<AppState>,
    Json(payload): Json<DiscountRulePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let rule = app_state
        .discount_service
        .create_rule(
            &payload.name,
            payload.kind,
            payload.value,
            payload.min_visit_count,
            payload.birthday_month_only,
            &payload.required_service_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

// GET /api/discounts/rules
#[utoipa::path(
    get,
    path = "/api/discounts/rules",
    tag = "Discounts",
    params(("includeInactive" = Option<bool>, Query, description = "Inclui desativadas")),
    responses(
        (status = 200, description = "Lista de regras", body = Vec<DiscountRule>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rules(
    State(app_state): State<AppState>,
    Query(query): Query<ListRulesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rules = app_state
        .discount_service
        .list_rules(query.include_inactive)
        .await?;

    Ok((StatusCode::OK, Json(rules)))
}

// GET /api/discounts/rules/{id}
#[utoipa::path(
    get,
    path = "/api/discounts/rules/{id}",
    tag = "Discounts",
    params(("id" = Uuid, Path, description = "ID da regra")),
    responses(
        (status = 200, description = "Regra", body = DiscountRule),
        (status = 404, description = "Regra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_rule(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rule = app_state.discount_service.get_rule(id).await?;

    Ok((StatusCode::OK, Json(rule)))
}

// PUT /api/discounts/rules/{id}
#[utoipa::path(
    put,
    path = "/api/discounts/rules/{id}",
    tag = "Discounts",
    params(("id" = Uuid, Path, description = "ID da regra")),
    request_body = DiscountRulePayload,
    responses(
        (status = 200, description = "Regra atualizada", body = DiscountRule),
        (status = 404, description = "Regra não encontrada"),
        (status = 409, description = "Nome já usado por regra ativa")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_rule(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DiscountRulePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let rule = app_state
        .discount_service
        .update_rule(
            id,
            &payload.name,
            payload.kind,
            payload.value,
            payload.min_visit_count,
            payload.birthday_month_only,
            &payload.required_service_ids,
        )
        .await?;

    Ok((StatusCode::OK, Json(rule)))
}

// DELETE /api/discounts/rules/{id} (soft delete)
#[utoipa::path(
    delete,
    path = "/api/discounts/rules/{id}",
    tag = "Discounts",
    params(("id" = Uuid, Path, description = "ID da regra")),
    responses(
        (status = 204, description = "Regra desativada"),
        (status = 404, description = "Regra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_rule(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.discount_service.deactivate_rule(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/discounts/preview
#[utoipa::path(
    post,
    path = "/api/discounts/preview",
    tag = "Discounts",
    request_body = PreviewDiscountPayload,
    responses(
        (status = 200, description = "Simulação de desconto", body = DiscountQuote),
        (status = 400, description = "Serviços inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_discount(
    State(app_state): State<AppState>,
    Json(payload): Json<PreviewDiscountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let items: Vec<(Uuid, i32)> = payload
        .items
        .iter()
        .map(|item| (item.service_id, item.quantity))
        .collect();

    let quote = app_state
        .discount_service
        .quote(payload.customer_id, &items, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}
