//! 请求与响应类型
//!
//! 请求只在单次调用内存在，不做任何持久化

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::core::engine::EngineType;
use crate::core::error::{AdminError, AdminResult};

/// 连接请求
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionRequest {
    pub db_type: String,
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectionRequest {
    /// 解析引擎类型，未知类型立即失败
    pub fn engine(&self) -> AdminResult<EngineType> {
        self.db_type.parse()
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("db_type", &self.db_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// 权限操作请求：连接字段 + 目标对象、目标用户、逗号分隔的权限列表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrivilegeRequest {
    #[serde(flatten)]
    pub connection: ConnectionRequest,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub target_user: String,
    #[serde(default)]
    pub authority: String,
}

/// 端口既可以是数字也可以是数字字符串
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u64),
        Text(String),
    }

    match Option::<RawPort>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawPort::Number(n)) => u16::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("端口超出范围: {}", n))),
        Some(RawPort::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawPort::Text(s)) => s
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("无效的端口: {}", s))),
    }
}

/// 操作状态码：1 成功，2 失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success = 1,
    Failure = 2,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(Status::Success),
            2 => Ok(Status::Failure),
            other => Err(de::Error::custom(format!("未知的状态码: {}", other))),
        }
    }
}

/// 操作结果 `{ "code": 1|2, "result": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub code: Status,
    pub result: String,
}

impl OperationResult {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            code: Status::Success,
            result: result.into(),
        }
    }

    pub fn failure(result: impl Into<String>) -> Self {
        Self {
            code: Status::Failure,
            result: result.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Status::Success
    }
}

/// 查询结果行，每个单元格都已渲染为文本
pub type Rows = Vec<Vec<String>>;

/// 去重并保持首次出现的顺序
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// 取每行第一列，行为空时视为结果形状异常
pub fn first_column(rows: Rows) -> AdminResult<Vec<String>> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .next()
                .ok_or_else(|| AdminError::Interpretation("结果行没有任何列".to_string()))
        })
        .collect()
}
