//! MySQL 会话（sqlx）

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};

use crate::connector::{ConnectionTarget, DbSession};
use crate::core::{AdminError, AdminResult, Rows};

pub struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    pub async fn connect(target: &ConnectionTarget) -> AdminResult<Self> {
        let mut options = MySqlConnectOptions::new()
            .host(&target.host)
            .port(target.port)
            .username(&target.user)
            .password(&target.password);
        if !target.database.is_empty() {
            options = options.database(&target.database);
        }

        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }
}

// mysql.user 的 CHAR 列使用二进制排序规则，驱动会按字节串返回
fn render_row(row: &MySqlRow) -> AdminResult<Vec<String>> {
    (0..row.len())
        .map(|i| {
            if let Ok(value) = row.try_get::<Option<String>, _>(i) {
                return Ok(value.unwrap_or_default());
            }
            if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(i) {
                return Ok(value
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .unwrap_or_default());
            }
            if let Ok(value) = row.try_get::<Option<i64>, _>(i) {
                return Ok(value.map(|v| v.to_string()).unwrap_or_default());
            }
            if let Ok(value) = row.try_get::<Option<u64>, _>(i) {
                return Ok(value.map(|v| v.to_string()).unwrap_or_default());
            }
            Err(AdminError::Interpretation(format!("第 {} 列类型无法渲染为文本", i)))
        })
        .collect()
}

#[async_trait]
impl DbSession for MySqlSession {
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
