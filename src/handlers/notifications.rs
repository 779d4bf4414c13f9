// src/handlers/notifications.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::notification::{Notification, NotificationChannel, NotificationStatus},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    pub status: Option<NotificationStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationPayload {
    pub customer_id: Uuid,
    pub channel: NotificationChannel,

    #[schema(example = "Promoção de agosto")]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Olá! Este mês a coloração está com 20% off.")]
    pub body: String,
}

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(("status" = Option<String>, Query, description = "PENDING, SENT ou FAILED")),
    responses(
        (status = 200, description = "Histórico de notificações", body = Vec<Notification>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state.notification_service.list(query.status).await?;

    Ok((StatusCode::OK, Json(notifications)))
}

// POST /api/notifications/send
#[utoipa::path(
    post,
    path = "/api/notifications/send",
    tag = "Notifications",
    request_body = SendNotificationPayload,
    responses(
        (status = 200, description = "Tentativa registrada (status SENT ou FAILED)", body = Notification),
        (status = 400, description = "Cliente sem contato para o canal"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_notification(
    State(app_state): State<AppState>,
    Json(payload): Json<SendNotificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .customer_service
        .get_customer(payload.customer_id)
        .await?;

    let notification = app_state
        .notification_service
        .send_to_customer(
            &customer,
            None,
            payload.channel,
            payload.subject.as_deref(),
            &payload.body,
        )
        .await?;

    Ok((StatusCode::OK, Json(notification)))
}
