// src/handlers/catalog.rs
//
// Rotas do catálogo: /api/services e /api/products.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Product, Service},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCatalogQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

// =============================================================================
//  SERVIÇOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Corte Feminino")]
    pub name: String,

    pub description: Option<String>,

    #[schema(value_type = f64, example = 120.00)]
    pub price: Decimal,

    #[schema(example = 45)]
    pub duration_minutes: i32,
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Catalog",
    request_body = ServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome já usado por serviço ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state
        .catalog_service
        .create_service(
            &payload.name,
            payload.description.as_deref(),
            payload.price,
            payload.duration_minutes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Catalog",
    params(("includeInactive" = Option<bool>, Query, description = "Inclui desativados")),
    responses(
        (status = 200, description = "Lista de serviços", body = Vec<Service>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    Query(query): Query<ListCatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state
        .catalog_service
        .list_services(query.include_inactive)
        .await?;

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.catalog_service.get_service(id).await?;

    Ok((StatusCode::OK, Json(service)))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body = ServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Nome já usado por serviço ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state
        .catalog_service
        .update_service(
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.price,
            payload.duration_minutes,
        )
        .await?;

    Ok((StatusCode::OK, Json(service)))
}

// DELETE /api/services/{id} (soft delete)
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço desativado"),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.deactivate_service(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PRODUTOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Shampoo Reparador 300ml")]
    pub name: String,

    #[schema(value_type = f64, example = 59.90)]
    pub price: Decimal,

    #[schema(value_type = Option<f64>, example = 32.00)]
    pub cost_price: Option<Decimal>,

    #[serde(default)]
    #[schema(example = 10)]
    pub stock_quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[schema(value_type = f64)]
    pub price: Decimal,

    #[schema(value_type = Option<f64>)]
    pub cost_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    // Positivo = entrada, negativo = baixa.
    #[schema(example = -2)]
    pub delta: i32,
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome já usado por produto ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .create_product(
            &payload.name,
            payload.price,
            payload.cost_price,
            payload.stock_quantity,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(("includeInactive" = Option<bool>, Query, description = "Inclui desativados")),
    responses(
        (status = 200, description = "Lista de produtos", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ListCatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_products(query.include_inactive)
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(id).await?;

    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Nome já usado por produto ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .update_product(id, &payload.name, payload.price, payload.cost_price)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products/{id}/stock
#[utoipa::path(
    post,
    path = "/api/products/{id}/stock",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = AdjustStockPayload,
    responses(
        (status = 200, description = "Estoque ajustado", body = Product),
        (status = 400, description = "Ajuste deixaria o estoque negativo"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_service
        .adjust_stock(id, payload.delta)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id} (soft delete)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto desativado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.deactivate_product(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
