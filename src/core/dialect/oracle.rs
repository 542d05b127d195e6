use crate::core::dialect::{canonical_privileges, AdminCheck, Dialect, PrivilegeAction};
use crate::core::engine::EngineType;
use crate::core::error::{AdminError, AdminResult};
use crate::core::identifier::{quoted, Quote};
use crate::core::types::{PrivilegeRequest, Rows};

const PRIVILEGES: &[&str] = &[
    "ALL",
    "ALTER",
    "DEBUG",
    "DELETE",
    "INDEX",
    "INSERT",
    "REFERENCES",
    "SELECT",
    "UPDATE",
];

/// 授予该系统权限的会话用户可以管理任意对象权限
const ADMIN_PRIVILEGE: &str = "GRANT ANY OBJECT PRIVILEGE";

/// Oracle 方言
///
/// 授权对象为 `连接用户.table`，整个权限列表放在一条语句中执行
pub struct Oracle;

impl Dialect for Oracle {
    fn engine(&self) -> EngineType {
        EngineType::Oracle
    }

    fn privilege_holders_query(&self) -> &'static str {
        "SELECT PRIVILEGE FROM USER_SYS_PRIVS"
    }

    fn target_users_query(&self) -> &'static str {
        "SELECT USERNAME FROM ALL_USERS"
    }

    fn tables_query(&self) -> &'static str {
        "SELECT TABLE_NAME FROM DBA_TABLES"
    }

    fn databases_query(&self) -> &'static str {
        "SELECT SYS_CONTEXT('USERENV', 'DB_NAME') FROM DUAL"
    }

    fn authorities(&self, _target: &str) -> &'static [&'static str] {
        PRIVILEGES
    }

    fn privilege_statements(
        &self,
        action: PrivilegeAction,
        request: &PrivilegeRequest,
    ) -> AdminResult<Vec<String>> {
        let owner = quoted("user", &request.connection.user, Quote::Double)?;
        let table = quoted("table", &request.table, Quote::Double)?;
        let grantee = quoted("target_user", &request.target_user, Quote::Double)?;
        let privileges = canonical_privileges(self.engine(), PRIVILEGES, &request.authority)?;

        Ok(vec![format!(
            "{} {} ON {}.{} {} {}",
            action.keyword(),
            privileges.join(","),
            owner,
            table,
            action.preposition(),
            grantee
        )])
    }

    fn interpret_admin(&self, rows: &Rows, _user: &str) -> AdminResult<AdminCheck> {
        for row in rows {
            let privilege = row.first().ok_or_else(|| {
                AdminError::Interpretation("USER_SYS_PRIVS 结果行为空".to_string())
            })?;
            if privilege == ADMIN_PRIVILEGE {
                return Ok(AdminCheck::Authorized);
            }
        }
        Ok(AdminCheck::NotAuthorized)
    }
}
