// src/handlers/staff.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::staff::{Staff, StaffPerformance},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Carla Dias")]
    pub full_name: String,

    pub phone: Option<String>,

    #[schema(example = "Colorista")]
    pub specialty: Option<String>,

    // Fração em [0, 1]
    #[schema(value_type = f64, example = 0.4)]
    pub commission_rate: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2023-02-01")]
    pub hired_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStaffQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// POST /api/staff
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    request_body = StaffPayload,
    responses(
        (status = 201, description = "Profissional criado", body = Staff),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_staff(
    State(app_state): State<AppState>,
    Json(payload): Json<StaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let staff = app_state
        .staff_service
        .create_staff(
            &payload.full_name,
            payload.phone.as_deref(),
            payload.specialty.as_deref(),
            payload.commission_rate,
            payload.hired_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    params(("includeInactive" = Option<bool>, Query, description = "Inclui desativados")),
    responses(
        (status = 200, description = "Lista de profissionais", body = Vec<Staff>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    Query(query): Query<ListStaffQuery>,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state
        .staff_service
        .list_staff(query.include_inactive)
        .await?;

    Ok((StatusCode::OK, Json(staff)))
}

// GET /api/staff/{id}
#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID do profissional")),
    responses(
        (status = 200, description = "Profissional", body = Staff),
        (status = 404, description = "Profissional não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_staff(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state.staff_service.get_staff(id).await?;

    Ok((StatusCode::OK, Json(staff)))
}

// PUT /api/staff/{id}
#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID do profissional")),
    request_body = StaffPayload,
    responses(
        (status = 200, description = "Profissional atualizado", body = Staff),
        (status = 404, description = "Profissional não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let staff = app_state
        .staff_service
        .update_staff(
            id,
            &payload.full_name,
            payload.phone.as_deref(),
            payload.specialty.as_deref(),
            payload.commission_rate,
            payload.hired_at,
        )
        .await?;

    Ok((StatusCode::OK, Json(staff)))
}

// DELETE /api/staff/{id} (soft delete)
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Staff",
    params(("id" = Uuid, Path, description = "ID do profissional")),
    responses(
        (status = 204, description = "Profissional desativado"),
        (status = 404, description = "Profissional não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_staff(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.staff_service.deactivate_staff(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/staff/{id}/performance
#[utoipa::path(
    get,
    path = "/api/staff/{id}/performance",
    tag = "Staff",
    params(
        ("id" = Uuid, Path, description = "ID do profissional"),
        ("from" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Data final (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Relatório de desempenho", body = StaffPerformance),
        (status = 404, description = "Profissional não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_performance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PerformanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    // `from` no começo do dia, `to` no fim do dia.
    let from = query.from.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let to = query
        .to
        .map(|d| (d.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::seconds(1)).and_utc());

    let report = app_state.staff_service.get_performance(id, from, to).await?;

    Ok((StatusCode::OK, Json(report)))
}
