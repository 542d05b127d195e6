//! 数据库引擎类型
//!
//! 请求中的 `db_type` 字段决定连接驱动和 SQL 方言，解析失败即视为配置错误

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::dialect::{self, Dialect};
use crate::core::error::AdminError;

/// 支持的数据库引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "Oracle")]
    Oracle,
    #[serde(rename = "Microsoft SQL Server")]
    MsSql,
}

impl EngineType {
    pub const ALL: [EngineType; 4] = [
        EngineType::PostgreSql,
        EngineType::MySql,
        EngineType::Oracle,
        EngineType::MsSql,
    ];

    /// 请求中使用的引擎名称
    pub fn name(&self) -> &'static str {
        match self {
            EngineType::PostgreSql => "PostgreSQL",
            EngineType::MySql => "MySQL",
            EngineType::Oracle => "Oracle",
            EngineType::MsSql => "Microsoft SQL Server",
        }
    }

    /// 驱动标识对 (方言, 驱动)，用于拼接连接 URI
    pub fn driver_pair(&self) -> (&'static str, &'static str) {
        match self {
            EngineType::PostgreSql => ("postgresql", "sqlx-postgres"),
            EngineType::MySql => ("mysql", "sqlx-mysql"),
            EngineType::Oracle => ("oracle", "odpi"),
            EngineType::MsSql => ("mssql", "tiberius"),
        }
    }

    /// 选择该引擎的方言实现
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            EngineType::PostgreSql => &dialect::Postgres,
            EngineType::MySql => &dialect::MySql,
            EngineType::Oracle => &dialect::Oracle,
            EngineType::MsSql => &dialect::MsSql,
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineType::ALL
            .into_iter()
            .find(|engine| engine.name() == s)
            .ok_or_else(|| AdminError::UnknownEngine(s.to_string()))
    }
}
