//! 认证服务：注册、登录、令牌签发

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::AppError,
    models::auth::{LoginRequest, SignupRequest},
    models::user::{User, UserResponse},
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        Self {
            db,
            jwt_service,
            hasher,
        }
    }

    /// 用户注册
    ///
    /// 校验字段、检查邮箱占用、哈希密码后落库，返回新身份与会话令牌
    pub async fn signup(&self, req: SignupRequest) -> Result<(UserResponse, String), AppError> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user_repo = UserRepository::new(self.db.clone());

        // 预检查邮箱占用；并发竞争由唯一约束兜底
        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let user = user_repo
            .create(&req.name, &req.email, &password_hash)
            .await?;

        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(user_id = user.id, "User registered");

        Ok((UserResponse::from(user), token))
    }

    /// 用户登录
    ///
    /// 未知邮箱和密码错误返回同一个泛化错误，不泄露账户是否存在
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: User = user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

        self.hasher
            .verify(&req.password, &user.password_hash)
            .map_err(|_| AppError::authentication("Invalid credentials"))?;

        // 更新最近登录时间
        user_repo.touch_last_login(user.id).await?;

        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(token)
    }
}
