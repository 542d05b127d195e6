//! 标识符处理
//!
//! DCL 语句中的对象名、用户名无法作为绑定参数传递，拼接进 SQL 文本之前
//! 必须经过这里。普通标识符原样输出，保留引擎对未加引号名称的大小写折叠；
//! 其余名称（如 `app-user`、`DOMAIN\user`）按引擎的规则加引号并转义。

use regex::Regex;
use std::sync::OnceLock;

use crate::core::error::{AdminError, AdminResult};

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn identifier_pattern() -> &'static Regex {
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_$#]*$").expect("identifier pattern is valid")
    })
}

/// 引号风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"name"`，PostgreSQL 与 Oracle
    Double,
    /// `[name]`，SQL Server
    Bracket,
    /// `` `name` ``，MySQL
    Backtick,
}

impl Quote {
    /// 结束符在名称内部出现时写两次
    fn wrap(self, name: &str) -> String {
        match self {
            Quote::Double => format!("\"{}\"", name.replace('"', "\"\"")),
            Quote::Bracket => format!("[{}]", name.replace(']', "]]")),
            Quote::Backtick => format!("`{}`", name.replace('`', "``")),
        }
    }
}

/// 目标字符串包含 `.` 时为对象级（schema.table），否则为 schema 级
pub fn is_dotted(target: &str) -> bool {
    target.contains('.')
}

fn is_plain(value: &str) -> bool {
    identifier_pattern().is_match(value)
}

/// 单个非限定名称
pub fn quoted(field: &'static str, value: &str, quote: Quote) -> AdminResult<String> {
    let value = value.trim();
    if is_plain(value) {
        return Ok(value.to_string());
    }
    if value.is_empty() || value.chars().any(char::is_control) {
        return Err(AdminError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(quote.wrap(value))
}

/// `name` 或 `schema.name`，每一段单独处理
pub fn quoted_qualified(field: &'static str, value: &str, quote: Quote) -> AdminResult<String> {
    let value = value.trim();
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() > 2 {
        return Err(AdminError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    let parts = parts
        .into_iter()
        .map(|part| quoted(field, part, quote))
        .collect::<AdminResult<Vec<_>>>()?;
    Ok(parts.join("."))
}

/// MySQL 账户名的用户/主机部分，输出时会放进单引号字面量
pub fn account_part<'a>(field: &'static str, value: &'a str) -> AdminResult<&'a str> {
    let value = value.trim();
    let forbidden = |c: char| c == '\'' || c == '"' || c == '\\' || c == '`' || c.is_control();
    if value.is_empty() || value.chars().any(forbidden) {
        return Err(AdminError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}
