//! 密码条目的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState,
    models::password_entry::PasswordEntryRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// 列出当前用户的全部条目
pub async fn list_passwords(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.password_service.list(auth_context.user_id).await?;

    Ok(Json(entries))
}

/// 创建条目
pub async fn create_password(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<PasswordEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state
        .password_service
        .create(auth_context.user_id, req)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// 更新条目
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i32>,
    Json(req): Json<PasswordEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_entry_id(id)?;

    let entry = state
        .password_service
        .update(id, auth_context.user_id, req)
        .await?;

    Ok(Json(entry))
}

/// 删除条目
pub async fn delete_password(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    validate_entry_id(id)?;

    state
        .password_service
        .delete(id, auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Password deleted successfully"
    })))
}

/// 记录条目的最近使用时间
pub async fn touch_last_used(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    validate_entry_id(id)?;

    state
        .password_service
        .touch_last_used(id, auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Password usage recorded"
    })))
}

/// 路径中的条目 ID 必须是正整数
fn validate_entry_id(id: i32) -> Result<(), AppError> {
    if id < 1 {
        return Err(AppError::BadRequest("Invalid password ID".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_id() {
        assert!(validate_entry_id(1).is_ok());
        assert!(validate_entry_id(i32::MAX).is_ok());
        assert!(validate_entry_id(0).is_err());
        assert!(validate_entry_id(-5).is_err());
    }
}
