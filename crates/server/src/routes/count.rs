use axum::{
    Extension, Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::counter::Counter;
use serde::Deserialize;
use wechat::AuditNotification;

use crate::{AppState, error::ApiError, http::auth::AuthContext, response::ApiResponse};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountRequest {
    pub action: Option<String>,
    pub status: Option<String>,
    pub booking_id: Option<String>,
    pub room_number: Option<String>,
    /// Sent by the mini-program, not used in the notification.
    pub user_name: Option<String>,
    pub reject_reason: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/count", get(get_count).post(update_count))
}

pub async fn update_count(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CountRequest>,
) -> Result<ResponseJson<ApiResponse<u64>>, ApiError> {
    match payload.action.as_deref() {
        Some("inc") => {
            Counter::create(&state.db().conn).await?;
        }
        Some("clear") => {
            Counter::clear(&state.db().conn).await?;
        }
        // Unknown or absent actions leave the counter untouched.
        _ => {}
    }

    if let Some(status) = payload.status.filter(|status| !status.is_empty()) {
        let notification = AuditNotification {
            openid: auth.openid,
            status,
            room_number: payload.room_number,
            booking_id: payload.booking_id,
            reject_reason: payload.reject_reason,
        };
        // Delivery is best effort: a failed notification never fails the
        // counter response.
        if let Err(err) = state.wechat().send_audit_result(&notification).await {
            tracing::error!(error = %err, "failed to send audit result notification");
        }
    }

    let count = Counter::count(&state.db().conn).await?;
    Ok(ResponseJson(ApiResponse::success(count)))
}

pub async fn get_count(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<u64>>, ApiError> {
    let count = Counter::count(&state.db().conn).await?;
    Ok(ResponseJson(ApiResponse::success(count)))
}
