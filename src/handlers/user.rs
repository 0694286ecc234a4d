//! 用户资料的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState,
    models::user::UpdateProfileRequest,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 获取当前用户资料
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.user_service.profile(auth_context.user_id).await?;

    Ok(Json(profile))
}

/// 更新当前用户资料
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .user_service
        .update_profile(auth_context.user_id, req)
        .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully"
    })))
}
