//! 权限管理 API 集成测试
//!
//! 测试范围:
//! - 连通性检查与连接失败
//! - 用户/数据库/表列表的去重与拼接
//! - 管理员权限检查在各引擎下的解释
//! - 静态权限目录
//! - 权限授予/撤销的逐条执行与失败中止

mod common;

use common::{connection, privilege, MockConnector};
use dbgrant::api::core::{messages, Endpoint, PrivilegeApi};
use dbgrant::core::{Dialect, EngineType, OperationResult, Status};

fn api(connector: &MockConnector) -> PrivilegeApi<MockConnector> {
    PrivilegeApi::new(connector.clone())
}

// ==================== 连通性检查 ====================

#[tokio::test]
async fn test_connection_check_success_closes_session() {
    let mock = MockConnector::new();
    let result = api(&mock)
        .connection_check(&connection(EngineType::PostgreSql))
        .await;

    assert_eq!(result, OperationResult::success(messages::CONNECTED));
    let log = mock.log();
    assert_eq!(log.connects.len(), 1);
    assert_eq!(log.closed, 1);
}

#[tokio::test]
async fn test_unknown_engine_never_connects() {
    let mock = MockConnector::new();
    let mut req = connection(EngineType::MySql);
    req.db_type = "SQLite".to_string();

    let result = api(&mock).connection_check(&req).await;
    assert_eq!(result, OperationResult::failure(messages::CONNECT_FAILED));
    assert!(mock.log().connects.is_empty());
}

#[tokio::test]
async fn test_connection_failure_maps_to_each_operation_message() {
    let mock = MockConnector::new().failing_connect();
    let api = api(&mock);
    let conn = connection(EngineType::PostgreSql);
    let req = privilege(EngineType::PostgreSql, "public.t", "bob", "SELECT");

    let cases = [
        (api.connection_check(&conn).await, messages::CONNECT_FAILED),
        (api.target_user_list(&conn).await, messages::TARGET_USER_LIST_FAILED),
        (api.database_list(&conn).await, messages::DATABASE_LIST_FAILED),
        (api.table_list(&conn).await, messages::TABLE_LIST_FAILED),
        (api.check_authority(&conn).await, messages::USER_INFO_FAILED),
        (api.add_authority(&req).await, messages::CONNECT_FAILED),
        (api.remove_authority(&req).await, messages::CONNECT_FAILED),
    ];

    for (result, expected) in cases {
        assert_eq!(result.code, Status::Failure);
        assert_eq!(result.result, expected);
    }
    assert_eq!(mock.log().closed, 0);
}

// ==================== 列表 ====================

#[tokio::test]
async fn test_target_user_list_dedups_in_order() {
    let sql = EngineType::PostgreSql.dialect().target_users_query();
    let mock = MockConnector::new().with_rows(sql, &[&["a"], &["b"], &["a"], &["c"]]);

    let result = api(&mock)
        .target_user_list(&connection(EngineType::PostgreSql))
        .await;
    assert_eq!(result, OperationResult::success("a,b,c"));
    assert_eq!(mock.log().closed, 1);
}

#[tokio::test]
async fn test_target_user_list_query_failure() {
    // 没有预置结果，查询会失败
    let mock = MockConnector::new();
    let result = api(&mock)
        .target_user_list(&connection(EngineType::Oracle))
        .await;
    assert_eq!(result, OperationResult::failure(messages::TARGET_USER_LIST_FAILED));
    // 查询失败时连接仍然会被关闭
    assert_eq!(mock.log().closed, 1);
}

#[tokio::test]
async fn test_database_list() {
    let sql = EngineType::MySql.dialect().databases_query();
    let mock = MockConnector::new().with_rows(sql, &[&["mysql"], &["shop"], &["shop"]]);
    let result = api(&mock).database_list(&connection(EngineType::MySql)).await;
    assert_eq!(result, OperationResult::success("mysql,shop"));
}

#[tokio::test]
async fn test_postgres_table_list_schemas_then_tables() {
    let dialect = EngineType::PostgreSql.dialect();
    let mock = MockConnector::new()
        .with_rows(dialect.schemas_query().unwrap(), &[&["public"], &["sales"]])
        .with_rows(
            dialect.tables_query(),
            &[&["public", "t1"], &["sales", "t2"], &["audit", "t3"]],
        );

    let result = api(&mock).table_list(&connection(EngineType::PostgreSql)).await;
    assert_eq!(
        result,
        OperationResult::success("public,sales,audit,public.t1,sales.t2,audit.t3")
    );
    // schema 与表查询共用一个连接
    assert_eq!(mock.log().connects.len(), 1);
    assert_eq!(mock.log().fetched.len(), 2);
}

#[tokio::test]
async fn test_mysql_table_list_single_column() {
    let mock = MockConnector::new().with_rows("SHOW TABLES", &[&["orders"], &["users"], &["orders"]]);
    let result = api(&mock).table_list(&connection(EngineType::MySql)).await;
    assert_eq!(result, OperationResult::success("orders,users"));
    assert_eq!(mock.log().fetched, vec!["SHOW TABLES".to_string()]);
}

#[tokio::test]
async fn test_mssql_table_list_uses_schema_catalog() {
    let dialect = EngineType::MsSql.dialect();
    let mock = MockConnector::new()
        .with_rows(dialect.schemas_query().unwrap(), &[&["dbo"], &["guest"]])
        .with_rows(dialect.tables_query(), &[&["orders"], &["dbo"]]);
    let result = api(&mock).table_list(&connection(EngineType::MsSql)).await;
    assert_eq!(result, OperationResult::success("dbo,guest,orders"));
}

#[tokio::test]
async fn test_empty_table_list() {
    let mock = MockConnector::new().with_rows("SELECT TABLE_NAME FROM DBA_TABLES", &[]);
    let result = api(&mock).table_list(&connection(EngineType::Oracle)).await;
    assert_eq!(result, OperationResult::failure(messages::NO_TABLE));
}

// ==================== 管理员权限检查 ====================

async fn check(engine: EngineType, rows: &[&[&str]]) -> OperationResult {
    let mock = MockConnector::new().with_rows(engine.dialect().privilege_holders_query(), rows);
    api(&mock).check_authority(&connection(engine)).await
}

#[tokio::test]
async fn test_check_authority_flag_engines() {
    assert_eq!(
        check(EngineType::PostgreSql, &[&["admin", "True"], &["app", "False"]]).await,
        OperationResult::success(messages::AUTHORIZED)
    );
    assert_eq!(
        check(EngineType::MySql, &[&["admin", "Y"]]).await,
        OperationResult::success(messages::AUTHORIZED)
    );
    assert_eq!(
        check(EngineType::MsSql, &[&["admin", "False"]]).await,
        OperationResult::failure(messages::NOT_SUPERUSER)
    );
    assert_eq!(
        check(EngineType::PostgreSql, &[&["someone", "True"]]).await,
        OperationResult::failure(messages::USER_NOT_FOUND)
    );
}

#[tokio::test]
async fn test_check_authority_oracle_scan() {
    assert_eq!(
        check(
            EngineType::Oracle,
            &[&["CREATE SESSION"], &["GRANT ANY OBJECT PRIVILEGE"]]
        )
        .await,
        OperationResult::success(messages::AUTHORIZED)
    );
    assert_eq!(
        check(EngineType::Oracle, &[&["CREATE SESSION"]]).await,
        OperationResult::failure(messages::NOT_AUTHORIZED)
    );
}

#[tokio::test]
async fn test_check_authority_unexpected_shape() {
    assert_eq!(
        check(EngineType::MySql, &[&["admin"]]).await,
        OperationResult::failure(messages::USER_INFO_FAILED)
    );
}

// ==================== 权限目录 ====================

#[test]
fn test_authority_list_scope_rule() {
    let api = PrivilegeApi::new(MockConnector::new());

    let result = api.authority_list(&privilege(EngineType::PostgreSql, "public.t", "", ""));
    assert_eq!(
        result.result,
        "ALL PRIVILEGES,DELETE,INSERT,REFERENCES,SELECT,TRIGGER,TRUNCATE,UPDATE"
    );
    let result = api.authority_list(&privilege(EngineType::PostgreSql, "public", "", ""));
    assert_eq!(result.result, "ALL PRIVILEGES,CREATE,USAGE");

    let object = api.authority_list(&privilege(EngineType::MsSql, "dbo.t", "", ""));
    let schema = api.authority_list(&privilege(EngineType::MsSql, "dbo", "", ""));
    assert!(object.result.contains("RECEIVE") && !object.result.contains("CREATE SEQUENCE"));
    assert!(schema.result.contains("CREATE SEQUENCE") && !schema.result.contains("RECEIVE"));

    let oracle = api.authority_list(&privilege(EngineType::Oracle, "EMP", "", ""));
    assert_eq!(
        oracle.result,
        "ALL,ALTER,DEBUG,DELETE,INDEX,INSERT,REFERENCES,SELECT,UPDATE"
    );
}

#[test]
fn test_authority_list_unknown_engine() {
    let api = PrivilegeApi::new(MockConnector::new());
    let mut req = privilege(EngineType::MySql, "t", "", "");
    req.connection.db_type = "Sybase".to_string();
    assert_eq!(
        api.authority_list(&req),
        OperationResult::failure(messages::AUTHORITY_LIST_FAILED)
    );
}

// ==================== 授予/撤销 ====================

#[tokio::test]
async fn test_add_authority_one_statement_per_privilege() {
    let mock = MockConnector::new();
    let result = api(&mock)
        .add_authority(&privilege(EngineType::PostgreSql, "public.orders", "bob", "SELECT,INSERT"))
        .await;

    assert_eq!(result, OperationResult::success(messages::COMMITTED));
    assert_eq!(
        mock.log().executed,
        vec![
            "GRANT SELECT ON public.orders TO bob".to_string(),
            "GRANT INSERT ON public.orders TO bob".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_add_authority_stops_at_first_failure_without_rollback() {
    let mock = MockConnector::new().failing_statement(2);
    let result = api(&mock)
        .add_authority(&privilege(EngineType::MySql, "orders", "bob", "SELECT,INSERT,UPDATE"))
        .await;

    assert_eq!(result, OperationResult::failure(messages::EXECUTE_FAILED));
    let log = mock.log();
    // 第一条已生效，第三条不再执行，也没有补偿性的 REVOKE
    assert_eq!(log.executed.len(), 2);
    assert!(log.executed[0].starts_with("GRANT SELECT ON shop.orders"));
    assert!(log.executed.iter().all(|s| !s.starts_with("REVOKE")));
    assert_eq!(log.closed, 1);
}

#[tokio::test]
async fn test_oracle_applies_full_list_in_one_statement() {
    let mock = MockConnector::new();
    let result = api(&mock)
        .add_authority(&privilege(EngineType::Oracle, "EMP", "SCOTT", "SELECT,INSERT"))
        .await;
    assert!(result.is_success());
    assert_eq!(
        mock.log().executed,
        vec!["GRANT SELECT,INSERT ON admin.EMP TO SCOTT".to_string()]
    );

    let mock = MockConnector::new();
    api(&mock)
        .remove_authority(&privilege(EngineType::Oracle, "EMP", "SCOTT", "SELECT,INSERT"))
        .await;
    assert_eq!(
        mock.log().executed,
        vec!["REVOKE SELECT,INSERT ON admin.EMP FROM SCOTT".to_string()]
    );
}

#[tokio::test]
async fn test_remove_authority_schema_target() {
    let mock = MockConnector::new();
    let result = api(&mock)
        .remove_authority(&privilege(EngineType::MsSql, "dbo", "reporter", "SELECT,ALTER"))
        .await;
    assert_eq!(result, OperationResult::success(messages::COMMITTED));
    assert_eq!(
        mock.log().executed,
        vec![
            "REVOKE SELECT ON SCHEMA::dbo FROM reporter".to_string(),
            "REVOKE ALTER ON SCHEMA::dbo FROM reporter".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_invalid_input_fails_before_connecting() {
    let mock = MockConnector::new();
    let api = api(&mock);

    let bad_privilege = privilege(EngineType::PostgreSql, "public.t", "bob", "SELECT,DROP TABLE");
    assert_eq!(
        api.add_authority(&bad_privilege).await,
        OperationResult::failure(messages::EXECUTE_FAILED)
    );

    let blank_user = privilege(EngineType::PostgreSql, "public.t", "  ", "SELECT");
    assert_eq!(
        api.remove_authority(&blank_user).await,
        OperationResult::failure(messages::EXECUTE_FAILED)
    );

    assert!(mock.log().connects.is_empty());
    assert!(mock.log().executed.is_empty());
}

#[tokio::test]
async fn test_listed_principals_can_be_granted() {
    // target_user_list 返回的名称不一定是普通标识符
    let mock = MockConnector::new()
        .with_rows(EngineType::MsSql.dialect().target_users_query(), &[&["CORP\\alice"]]);
    let api = api(&mock);

    let listed = api
        .target_user_list(&connection(EngineType::MsSql))
        .await;
    assert_eq!(listed, OperationResult::success("CORP\\alice"));

    let result = api
        .add_authority(&privilege(EngineType::MsSql, "dbo.orders", "CORP\\alice", "SELECT"))
        .await;
    assert_eq!(result, OperationResult::success(messages::COMMITTED));

    let pg = privilege(EngineType::PostgreSql, "public.t", "bob; DROP ROLE x", "SELECT");
    assert_eq!(
        api.add_authority(&pg).await,
        OperationResult::success(messages::COMMITTED)
    );
    assert_eq!(
        mock.log().executed,
        vec![
            "GRANT SELECT ON OBJECT::dbo.orders TO [CORP\\alice]".to_string(),
            "GRANT SELECT ON public.t TO \"bob; DROP ROLE x\"".to_string(),
        ]
    );
}

// ==================== 端点分发 ====================

#[tokio::test]
async fn test_endpoint_dispatch_parses_body() {
    let mock = MockConnector::new();
    let body = serde_json::json!({
        "db_type": "PostgreSQL",
        "host": "127.0.0.1",
        "port": "5432",
        "database": "shop",
        "user": "admin",
        "password": "secret",
        "table": "public.orders",
        "target_user": "bob",
        "authority": "UPDATE"
    });

    let result = Endpoint::AddAuthority.dispatch(&api(&mock), body).await;
    assert!(result.is_success());
    assert_eq!(
        mock.log().executed,
        vec!["GRANT UPDATE ON public.orders TO bob".to_string()]
    );
}

#[tokio::test]
async fn test_endpoint_dispatch_rejects_malformed_body() {
    let mock = MockConnector::new();
    let body = serde_json::json!({ "db_type": "MySQL", "port": "not-a-port" });
    let result = Endpoint::TableList.dispatch(&api(&mock), body).await;
    assert_eq!(result, OperationResult::failure(messages::TABLE_LIST_FAILED));
    assert!(mock.log().connects.is_empty());
}
