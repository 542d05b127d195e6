use crate::core::dialect::{canonical_privileges, Dialect, PrivilegeAction};
use crate::core::engine::EngineType;
use crate::core::error::AdminResult;
use crate::core::identifier::{is_dotted, quoted, quoted_qualified, Quote};
use crate::core::types::PrivilegeRequest;

const OBJECT_PRIVILEGES: &[&str] = &[
    "ALTER",
    "CONTROL",
    "DELETE",
    "EXECUTE",
    "INSERT",
    "RECEIVE",
    "REFERENCES",
    "SELECT",
    "TAKE OWNERSHIP",
    "UPDATE",
    "VIEW CHANGE TRACKING",
    "VIEW DEFINITION",
];

const SCHEMA_PRIVILEGES: &[&str] = &[
    "ALTER",
    "CONTROL",
    "CREATE SEQUENCE",
    "DELETE",
    "EXECUTE",
    "INSERT",
    "REFERENCES",
    "SELECT",
    "TAKE OWNERSHIP",
    "UPDATE",
    "VIEW CHANGE TRACKING",
    "VIEW DEFINITION",
];

/// SQL Server 方言
pub struct MsSql;

impl Dialect for MsSql {
    fn engine(&self) -> EngineType {
        EngineType::MsSql
    }

    // 登录名 + 是否属于 sysadmin 服务器角色
    fn privilege_holders_query(&self) -> &'static str {
        "SELECT name, CASE WHEN IS_SRVROLEMEMBER('sysadmin', name) = 1 \
         THEN N'True' ELSE N'False' END FROM sys.server_principals \
         WHERE type IN ('S', 'U', 'G')"
    }

    fn target_users_query(&self) -> &'static str {
        "SELECT name FROM sys.database_principals"
    }

    fn schemas_query(&self) -> Option<&'static str> {
        Some("SELECT name FROM sys.schemas")
    }

    fn tables_query(&self) -> &'static str {
        "SELECT name FROM sys.all_objects"
    }

    fn databases_query(&self) -> &'static str {
        "SELECT name FROM sys.databases"
    }

    fn authorities(&self, target: &str) -> &'static [&'static str] {
        if is_dotted(target) {
            OBJECT_PRIVILEGES
        } else {
            SCHEMA_PRIVILEGES
        }
    }

    fn privilege_statements(
        &self,
        action: PrivilegeAction,
        request: &PrivilegeRequest,
    ) -> AdminResult<Vec<String>> {
        let grantee = quoted("target_user", &request.target_user, Quote::Bracket)?;
        let (class, object) = if is_dotted(&request.table) {
            (
                "OBJECT",
                quoted_qualified("table", &request.table, Quote::Bracket)?,
            )
        } else {
            ("SCHEMA", quoted("table", &request.table, Quote::Bracket)?)
        };

        let privileges = canonical_privileges(
            self.engine(),
            self.authorities(&request.table),
            &request.authority,
        )?;
        Ok(privileges
            .into_iter()
            .map(|privilege| {
                format!(
                    "{} {} ON {}::{} {} {}",
                    action.keyword(),
                    privilege,
                    class,
                    object,
                    action.preposition(),
                    grantee
                )
            })
            .collect())
    }
}
