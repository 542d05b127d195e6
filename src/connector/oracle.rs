//! Oracle 会话（oracle crate / ODPI-C）
//!
//! 驱动是同步的，所有调用都放到阻塞线程池执行

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task;

use crate::connector::{ConnectionTarget, DbSession};
use crate::core::{AdminError, AdminResult, Rows};

pub struct OracleSession {
    conn: Arc<oracle::Connection>,
}

impl OracleSession {
    pub async fn connect(target: &ConnectionTarget) -> AdminResult<Self> {
        let user = target.user.clone();
        let password = target.password.clone();
        let connect_string = format!("//{}:{}/{}", target.host, target.port, target.database);

        let conn = task::spawn_blocking(move || {
            oracle::Connection::connect(user, password, connect_string)
        })
        .await
        .map_err(|e| AdminError::Connection(format!("任务执行失败: {}", e)))?
        .map_err(|e| AdminError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(conn),
        })
    }
}

fn query_rows(conn: &oracle::Connection, sql: &str) -> Result<Rows, oracle::Error> {
    let mut rows = Vec::new();
    for row in conn.query(sql, &[])? {
        let row = row?;
        let width = row.sql_values().len();
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            let value: Option<String> = row.get(i)?;
            cells.push(value.unwrap_or_default());
        }
        rows.push(cells);
    }
    Ok(rows)
}

#[async_trait]
impl DbSession for OracleSession {
    async fn fetch_rows(&mut self, sql: &str) -> AdminResult<Rows> {
        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();
        task::spawn_blocking(move || query_rows(&conn, &sql))
            .await
            .map_err(|e| AdminError::Query(format!("任务执行失败: {}", e)))?
            .map_err(|e| AdminError::Query(e.to_string()))
    }

    async fn execute(&mut self, sql: &str) -> AdminResult<()> {
        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();
        task::spawn_blocking(move || conn.execute(&sql, &[]).map(|_| ()))
            .await
            .map_err(|e| AdminError::Query(format!("任务执行失败: {}", e)))?
            .map_err(|e| AdminError::Query(e.to_string()))
    }

    async fn close(self: Box<Self>) -> AdminResult<()> {
        let conn = self.conn;
        task::spawn_blocking(move || conn.close())
            .await
            .map_err(|e| AdminError::Connection(format!("任务执行失败: {}", e)))?
            .map_err(|e| AdminError::Connection(e.to_string()))
    }
}
