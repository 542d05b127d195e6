//! 集成测试共享工具模块
//!
//! 提供脚本化的 `MockConnector`：按 SQL 文本返回预置结果，
//! 记录执行过的语句，可以模拟连接失败或第 N 条语句失败

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dbgrant::connector::{ConnectionTarget, Connector, DbSession};
use dbgrant::core::{AdminError, AdminResult, ConnectionRequest, EngineType, PrivilegeRequest, Rows};

/// 记录下来的调用
#[derive(Debug, Default)]
pub struct MockLog {
    pub connects: Vec<String>,
    pub fetched: Vec<String>,
    pub executed: Vec<String>,
    pub closed: usize,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    log: Arc<Mutex<MockLog>>,
    rows: Arc<HashMap<String, Rows>>,
    fail_connect: bool,
    fail_statement: Option<usize>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为指定 SQL 预置结果行
    pub fn with_rows(mut self, sql: &str, rows: &[&[&str]]) -> Self {
        let rows: Rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Arc::make_mut(&mut self.rows).insert(sql.to_string(), rows);
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// 第 n 条（从 1 开始）execute 调用失败
    pub fn failing_statement(mut self, n: usize) -> Self {
        self.fail_statement = Some(n);
        self
    }

    pub fn log(&self) -> std::sync::MutexGuard<'_, MockLog> {
        self.log.lock().expect("mock log lock poisoned")
    }
}

struct MockSession {
    log: Arc<Mutex<MockLog>>,
    rows: Arc<HashMap<String, Rows>>,
    fail_statement: Option<usize>,
}

#[async_trait]
impl DbSession for MockSession {
    async fn fetch_rows(&mut self, sql: &str) -> AdminResult<Rows> {
        self.log.lock().unwrap().fetched.push(sql.to_string());
        self.rows
            .get(sql)
            .cloned()
            .ok_or_else(|| AdminError::Query(format!("no scripted rows for {}", sql)))
    }

    async fn execute(&mut self, sql: &str) -> AdminResult<()> {
        let mut log = self.log.lock().unwrap();
        log.executed.push(sql.to_string());
        if Some(log.executed.len()) == self.fail_statement {
            return Err(AdminError::Query("permission denied".to_string()));
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> AdminResult<()> {
        self.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, target: &ConnectionTarget) -> AdminResult<Box<dyn DbSession>> {
        self.log().connects.push(target.uri());
        if self.fail_connect {
            return Err(AdminError::Connection("connection refused".to_string()));
        }
        Ok(Box::new(MockSession {
            log: Arc::clone(&self.log),
            rows: Arc::clone(&self.rows),
            fail_statement: self.fail_statement,
        }))
    }
}

/// 构造指定引擎的连接请求
pub fn connection(engine: EngineType) -> ConnectionRequest {
    ConnectionRequest {
        db_type: engine.name().to_string(),
        host: "127.0.0.1".to_string(),
        port: Some(5432),
        database: "shop".to_string(),
        user: "admin".to_string(),
        password: "secret".to_string(),
    }
}

/// 构造指定引擎的权限操作请求
pub fn privilege(engine: EngineType, table: &str, target_user: &str, authority: &str) -> PrivilegeRequest {
    PrivilegeRequest {
        connection: connection(engine),
        table: table.to_string(),
        target_user: target_user.to_string(),
        authority: authority.to_string(),
    }
}
