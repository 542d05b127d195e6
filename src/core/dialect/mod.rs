//! SQL 方言分发
//!
//! 每个引擎一个实现，负责给出查询文本、静态权限目录以及 GRANT/REVOKE 语句，
//! 并解释管理员权限检查的结果形状。实现本身无状态，只依赖请求字段。

mod mssql;
mod mysql;
mod oracle;
mod postgres;

pub use mssql::MsSql;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;

use std::collections::HashMap;

use crate::core::engine::EngineType;
use crate::core::error::{AdminError, AdminResult};
use crate::core::types::{PrivilegeRequest, Rows};

/// 授权方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeAction {
    Grant,
    Revoke,
}

impl PrivilegeAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            PrivilegeAction::Grant => "GRANT",
            PrivilegeAction::Revoke => "REVOKE",
        }
    }

    /// GRANT ... TO / REVOKE ... FROM
    pub fn preposition(&self) -> &'static str {
        match self {
            PrivilegeAction::Grant => "TO",
            PrivilegeAction::Revoke => "FROM",
        }
    }
}

/// 管理员权限检查结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCheck {
    Authorized,
    NotSuperuser,
    NotAuthorized,
    UserNotFound,
}

pub trait Dialect: Send + Sync {
    fn engine(&self) -> EngineType;

    /// 权限持有者查询，结果用于管理员权限检查
    fn privilege_holders_query(&self) -> &'static str;

    fn target_users_query(&self) -> &'static str;

    /// 只有区分 schema 的引擎才有
    fn schemas_query(&self) -> Option<&'static str> {
        None
    }

    /// 一列（表名）或两列（schema, 表名）
    fn tables_query(&self) -> &'static str;

    fn databases_query(&self) -> &'static str;

    /// 针对目标对象可授予的权限名称，顺序固定
    fn authorities(&self, target: &str) -> &'static [&'static str];

    /// 构造 GRANT/REVOKE 语句，按执行顺序返回
    fn privilege_statements(
        &self,
        action: PrivilegeAction,
        request: &PrivilegeRequest,
    ) -> AdminResult<Vec<String>>;

    /// 默认按 (主体名, 标志) 建立映射后查找连接用户
    fn interpret_admin(&self, rows: &Rows, user: &str) -> AdminResult<AdminCheck> {
        superuser_flag_check(rows, user)
    }
}

/// 主体名 -> 标志 的映射检查，`True` 或 `Y` 表示超级用户
pub(crate) fn superuser_flag_check(rows: &Rows, user: &str) -> AdminResult<AdminCheck> {
    let mut flags: HashMap<&str, &str> = HashMap::with_capacity(rows.len());
    for row in rows {
        match row.as_slice() {
            [name, flag, ..] => {
                flags.insert(name.as_str(), flag.as_str());
            }
            _ => {
                return Err(AdminError::Interpretation(format!(
                    "权限持有者查询需要两列，实际 {} 列",
                    row.len()
                )))
            }
        }
    }

    Ok(match flags.get(user) {
        None => AdminCheck::UserNotFound,
        Some(&"True") | Some(&"Y") => AdminCheck::Authorized,
        Some(_) => AdminCheck::NotSuperuser,
    })
}

/// 将逗号分隔的权限列表规范化为目录中的写法，不在目录中的名称直接拒绝
pub(crate) fn canonical_privileges(
    engine: EngineType,
    catalog: &'static [&'static str],
    authority: &str,
) -> AdminResult<Vec<&'static str>> {
    authority
        .split(',')
        .map(|raw| {
            let wanted = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            catalog
                .iter()
                .copied()
                .find(|name| name.eq_ignore_ascii_case(&wanted))
                .ok_or_else(|| AdminError::UnknownPrivilege {
                    engine,
                    privilege: raw.to_string(),
                })
        })
        .collect()
}
