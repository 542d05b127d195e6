//! PostgreSQL 会话（sqlx）

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};

use crate::connector::{ConnectionTarget, DbSession};
use crate::core::{AdminError, AdminResult, Rows};

pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    pub async fn connect(target: &ConnectionTarget) -> AdminResult<Self> {
        let mut options = PgConnectOptions::new()
            .host(&target.host)
            .port(target.port)
            .username(&target.user)
            .password(&target.password);
        if !target.database.is_empty() {
            options = options.database(&target.database);
        }

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }
}

/// 布尔值按 `True`/`False` 渲染，NULL 渲染为空串
fn render_row(row: &PgRow) -> AdminResult<Vec<String>> {
    (0..row.len())
        .map(|i| {
            if let Ok(value) = row.try_get::<Option<String>, _>(i) {
                return Ok(value.unwrap_or_default());
            }
            if let Ok(value) = row.try_get::<Option<bool>, _>(i) {
                return Ok(match value {
                    Some(true) => "True".to_string(),
                    Some(false) => "False".to_string(),
                    None => String::new(),
                });
            }
            if let Ok(value) = row.try_get::<Option<i64>, _>(i) {
                return Ok(value.map(|v| v.to_string()).unwrap_or_default());
            }
            if let Ok(value) = row.try_get::<Option<i32>, _>(i) {
                return Ok(value.map(|v| v.to_string()).unwrap_or_default());
            }
            Err(AdminError::Interpretation(format!("第 {} 列类型无法渲染为文本", i)))
        })
        .collect()
}

#[async_trait]
impl DbSession for PgSession {
    async fn fetch_rows(&mut self, sql: &str) -> AdminResult<Rows> {
        let rows = sqlx::query(sql)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| AdminError::Query(e.to_string()))?;
        rows.iter().map(render_row).collect()
    }

    async fn execute(&mut self, sql: &str) -> AdminResult<()> {
        sqlx::query(sql)
            .execute(&mut self.conn)
            .await
            .map_err(|e| AdminError::Query(e.to_string()))?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> AdminResult<()> {
        self.conn
            .close()
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))
    }
}
