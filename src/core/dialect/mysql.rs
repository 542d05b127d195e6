use crate::core::dialect::{canonical_privileges, Dialect, PrivilegeAction};
use crate::core::engine::EngineType;
use crate::core::error::{AdminError, AdminResult};
use crate::core::identifier::{account_part, quoted, Quote};
use crate::core::types::PrivilegeRequest;

const PRIVILEGES: &[&str] = &[
    "ALL PRIVILEGES",
    "ALTER",
    "CREATE",
    "CREATE VIEW",
    "DELETE",
    "DROP",
    "GRANT OPTION",
    "INDEX",
    "INSERT",
    "REFERENCES",
    "SELECT",
    "SHOW VIEW",
    "TRIGGER",
    "UPDATE",
    "USAGE",
];

/// MySQL 方言，授权对象总是 `database.table`，账户主机取连接主机
pub struct MySql;

impl Dialect for MySql {
    fn engine(&self) -> EngineType {
        EngineType::MySql
    }

    fn privilege_holders_query(&self) -> &'static str {
        "SELECT User, Super_priv FROM mysql.user"
    }

    fn target_users_query(&self) -> &'static str {
        "SELECT User FROM mysql.user WHERE User NOT LIKE 'mysql.%'"
    }

    fn tables_query(&self) -> &'static str {
        "SHOW TABLES"
    }

    fn databases_query(&self) -> &'static str {
        "SHOW DATABASES"
    }

    fn authorities(&self, _target: &str) -> &'static [&'static str] {
        PRIVILEGES
    }

    fn privilege_statements(
        &self,
        action: PrivilegeAction,
        request: &PrivilegeRequest,
    ) -> AdminResult<Vec<String>> {
        let database = quoted("database", &request.connection.database, Quote::Backtick)?;
        let table = match request.table.trim() {
            "*" => "*".to_string(),
            other if other.contains('.') => {
                return Err(AdminError::InvalidIdentifier {
                    field: "table",
                    value: other.to_string(),
                })
            }
            other => quoted("table", other, Quote::Backtick)?,
        };
        let user = account_part("target_user", &request.target_user)?;
        let host = account_part("host", &request.connection.host)?;

        let privileges = canonical_privileges(self.engine(), PRIVILEGES, &request.authority)?;
        Ok(privileges
            .into_iter()
            .map(|privilege| {
                format!(
                    "{} {} ON {}.{} {} '{}'@'{}'",
                    action.keyword(),
                    privilege,
                    database,
                    table,
                    action.preposition(),
                    user,
                    host
                )
            })
            .collect())
    }
}
