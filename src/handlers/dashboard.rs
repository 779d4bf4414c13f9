// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores do dia", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Faturamento por dia (últimos 30 dias)", body = Vec<SalesChartEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let chart = app_state.dashboard_service.get_sales_chart().await?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/top-services
#[utoipa::path(
    get,
    path = "/api/dashboard/top-services",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Top 5 serviços por receita", body = Vec<TopServiceEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_services(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let top = app_state.dashboard_service.get_top_services().await?;

    Ok((StatusCode::OK, Json(top)))
}
