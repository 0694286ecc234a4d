//! Password entry repository (数据库访问层)
//!
//! 所有修改语句同时以 id 和 user_id 作为条件，单条语句内完成属主校验，
//! 这是跨用户访问的唯一防线。

use crate::{error::AppError, models::password_entry::PasswordEntry};
use sqlx::PgPool;

pub struct PasswordRepository {
    db: PgPool,
}

impl PasswordRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出某个用户的所有条目（按创建时间倒序）
    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<PasswordEntry>, AppError> {
        let entries = sqlx::query_as::<_, PasswordEntry>(
            "SELECT * FROM passwords WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// 创建条目
    pub async fn create(
        &self,
        owner_id: i32,
        title: &str,
        username: &str,
        password: &str,
        url: Option<&str>,
        notes: Option<&str>,
    ) -> Result<PasswordEntry, AppError> {
        let entry = sqlx::query_as::<_, PasswordEntry>(
            r#"
            INSERT INTO passwords (title, username, password, url, user_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(username)
        .bind(password)
        .bind(url)
        .bind(owner_id)
        .bind(notes)
        .fetch_one(&self.db)
        .await?;

        Ok(entry)
    }

    /// 更新条目（仅当 id 与属主同时匹配）
    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        title: &str,
        username: &str,
        password: &str,
        url: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<PasswordEntry>, AppError> {
        let entry = sqlx::query_as::<_, PasswordEntry>(
            r#"
            UPDATE passwords
            SET
                title = $3,
                username = $4,
                password = $5,
                url = $6,
                notes = $7,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(username)
        .bind(password)
        .bind(url)
        .bind(notes)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    /// 删除条目（仅当 id 与属主同时匹配）
    pub async fn delete(&self, id: i32, owner_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM passwords WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 更新条目的最近使用时间（仅当 id 与属主同时匹配）
    pub async fn touch_last_used(&self, id: i32, owner_id: i32) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE passwords SET last_used = NOW() WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner_id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
