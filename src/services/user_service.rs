//! 用户资料服务：查询与更新当前用户资料

use crate::{
    auth::password::PasswordHasher,
    error::AppError,
    models::user::{UpdateProfileRequest, UserResponse},
    repository::UserRepository,
};
use sqlx::PgPool;
use validator::Validate;

pub struct UserService {
    db: PgPool,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(db: PgPool, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    /// 获取当前用户资料
    pub async fn profile(&self, user_id: i32) -> Result<UserResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(UserResponse::from(user))
    }

    /// 更新当前用户资料
    ///
    /// 同时提供 currentPassword 和 newPassword 时才会修改密码；
    /// 修改邮箱前检查是否被其他用户占用（资料更新时冲突按 400 处理）
    pub async fn update_profile(
        &self,
        user_id: i32,
        req: UpdateProfileRequest,
    ) -> Result<(), AppError> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        // 修改密码前验证当前密码
        let new_hash = match (&req.current_password, &req.new_password) {
            (Some(current), Some(new_password)) => {
                self.hasher
                    .verify(current, &user.password_hash)
                    .map_err(|_| AppError::BadRequest("Current password is incorrect".to_string()))?;

                if new_password.len() < 6 {
                    return Err(AppError::validation("Password must be at least 6 characters"));
                }

                Some(self.hasher.hash(new_password)?)
            }
            _ => None,
        };

        // 检查邮箱是否被其他用户占用
        if req.email != user.email && user_repo.email_taken_by_other(&req.email, user_id).await? {
            return Err(AppError::BadRequest("Email is already in use".to_string()));
        }

        user_repo
            .update_profile(user_id, &req.name, &req.email, new_hash.as_deref())
            .await?;

        tracing::info!(user_id, "Profile updated");

        Ok(())
    }
}
