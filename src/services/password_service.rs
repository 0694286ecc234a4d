//! 密码条目服务：属主范围内的增删改查与使用时间跟踪

use crate::{
    error::AppError,
    models::password_entry::{PasswordEntry, PasswordEntryRequest},
    repository::PasswordRepository,
};
use sqlx::PgPool;
use validator::Validate;

pub struct PasswordService {
    db: PgPool,
}

impl PasswordService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出属主的全部条目（最新在前）
    pub async fn list(&self, owner_id: i32) -> Result<Vec<PasswordEntry>, AppError> {
        let repo = PasswordRepository::new(self.db.clone());
        repo.list_by_owner(owner_id).await
    }

    /// 创建条目
    pub async fn create(
        &self,
        owner_id: i32,
        req: PasswordEntryRequest,
    ) -> Result<PasswordEntry, AppError> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let url = req.url.as_deref().map(normalize_url);

        let repo = PasswordRepository::new(self.db.clone());
        repo.create(
            owner_id,
            &req.title,
            &req.username,
            &req.password,
            url.as_deref(),
            req.notes.as_deref(),
        )
        .await
    }

    /// 更新条目
    ///
    /// id 与属主的双重条件是唯一的授权机制：别人的条目表现为不存在
    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        req: PasswordEntryRequest,
    ) -> Result<PasswordEntry, AppError> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let url = req.url.as_deref().map(normalize_url);

        let repo = PasswordRepository::new(self.db.clone());
        repo.update(
            id,
            owner_id,
            &req.title,
            &req.username,
            &req.password,
            url.as_deref(),
            req.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Password not found"))
    }

    /// 删除条目
    pub async fn delete(&self, id: i32, owner_id: i32) -> Result<(), AppError> {
        let repo = PasswordRepository::new(self.db.clone());

        if !repo.delete(id, owner_id).await? {
            return Err(AppError::not_found("Password not found"));
        }

        Ok(())
    }

    /// 记录条目的最近使用时间（客户端消费密文时调用）
    pub async fn touch_last_used(&self, id: i32, owner_id: i32) -> Result<(), AppError> {
        let repo = PasswordRepository::new(self.db.clone());

        if !repo.touch_last_used(id, owner_id).await? {
            return Err(AppError::not_found("Password not found"));
        }

        Ok(())
    }
}

/// 为缺少协议前缀的 URL 补上 "http://"
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
