use crate::core::dialect::{canonical_privileges, Dialect, PrivilegeAction};
use crate::core::engine::EngineType;
use crate::core::error::AdminResult;
use crate::core::identifier::{is_dotted, quoted, quoted_qualified, Quote};
use crate::core::types::PrivilegeRequest;

const TABLE_PRIVILEGES: &[&str] = &[
    "ALL PRIVILEGES",
    "DELETE",
    "INSERT",
    "REFERENCES",
    "SELECT",
    "TRIGGER",
    "TRUNCATE",
    "UPDATE",
];

const SCHEMA_PRIVILEGES: &[&str] = &["ALL PRIVILEGES", "CREATE", "USAGE"];

/// PostgreSQL 方言
pub struct Postgres;

impl Dialect for Postgres {
    fn engine(&self) -> EngineType {
        EngineType::PostgreSql
    }

    fn privilege_holders_query(&self) -> &'static str {
        "SELECT rolname, rolsuper FROM pg_roles WHERE rolname NOT LIKE 'pg\\_%'"
    }

    fn target_users_query(&self) -> &'static str {
        "SELECT rolname FROM pg_roles WHERE rolname NOT LIKE 'pg\\_%'"
    }

    fn schemas_query(&self) -> Option<&'static str> {
        Some(
            "SELECT nspname FROM pg_namespace \
             WHERE nspname NOT LIKE 'pg\\_%' AND nspname NOT LIKE 'information\\_%'",
        )
    }

    fn tables_query(&self) -> &'static str {
        "SELECT schemaname, tablename FROM pg_tables \
         WHERE schemaname NOT LIKE 'pg\\_%' AND tablename NOT LIKE 'pg\\_%' \
         AND schemaname NOT LIKE 'information\\_%'"
    }

    fn databases_query(&self) -> &'static str {
        "SELECT datname FROM pg_database WHERE NOT datistemplate"
    }

    fn authorities(&self, target: &str) -> &'static [&'static str] {
        if is_dotted(target) {
            TABLE_PRIVILEGES
        } else {
            SCHEMA_PRIVILEGES
        }
    }

    fn privilege_statements(
        &self,
        action: PrivilegeAction,
        request: &PrivilegeRequest,
    ) -> AdminResult<Vec<String>> {
        let grantee = quoted("target_user", &request.target_user, Quote::Double)?;
        let (object, catalog) = if is_dotted(&request.table) {
            (
                quoted_qualified("table", &request.table, Quote::Double)?,
                TABLE_PRIVILEGES,
            )
        } else {
            (
                format!("SCHEMA {}", quoted("table", &request.table, Quote::Double)?),
                SCHEMA_PRIVILEGES,
            )
        };

        let privileges = canonical_privileges(self.engine(), catalog, &request.authority)?;
        Ok(privileges
            .into_iter()
            .map(|privilege| {
                format!(
                    "{} {} ON {} {} {}",
                    action.keyword(),
                    privilege,
                    object,
                    action.preposition(),
                    grantee
                )
            })
            .collect())
    }
}
