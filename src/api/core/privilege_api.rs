//! 权限管理 API - 核心层
//!
//! 与传输层无关。每个操作：构建连接参数 → 选择方言 → 执行查询 → 归一化为
//! `OperationResult`。底层错误只写日志，返回给调用方的始终是固定消息。

use log::{debug, info, warn};
use std::sync::Arc;

use crate::api::core::messages;
use crate::connector::{ConnectionTarget, Connector, DbSession};
use crate::core::types::first_column;
use crate::core::{
    dedup_preserving_order, AdminCheck, AdminError, AdminResult, ConnectionRequest, Dialect,
    OperationResult, PrivilegeAction, PrivilegeRequest,
};

/// 权限管理 API
pub struct PrivilegeApi<C: Connector> {
    connector: Arc<C>,
}

impl<C: Connector> Clone for PrivilegeApi<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C: Connector> PrivilegeApi<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
        }
    }

    /// 连通性检查：能建立会话即成功
    pub async fn connection_check(&self, request: &ConnectionRequest) -> OperationResult {
        match self.open(request).await {
            Ok((target, _, session)) => {
                close_session(&target, session).await;
                OperationResult::success(messages::CONNECTED)
            }
            Err(e) => {
                warn!("connection_check 失败: {}", e);
                OperationResult::failure(messages::CONNECT_FAILED)
            }
        }
    }

    /// 目标用户列表，去重并保持顺序
    pub async fn target_user_list(&self, request: &ConnectionRequest) -> OperationResult {
        match self.fetch_column(request, |d| d.target_users_query()).await {
            Ok(users) => OperationResult::success(users.join(",")),
            Err(e) => {
                warn!("target_user_list 失败: {}", e);
                OperationResult::failure(messages::TARGET_USER_LIST_FAILED)
            }
        }
    }

    /// 数据库列表
    pub async fn database_list(&self, request: &ConnectionRequest) -> OperationResult {
        match self.fetch_column(request, |d| d.databases_query()).await {
            Ok(databases) => OperationResult::success(databases.join(",")),
            Err(e) => {
                warn!("database_list 失败: {}", e);
                OperationResult::failure(messages::DATABASE_LIST_FAILED)
            }
        }
    }

    /// schema 名称在前，`schema.table` 条目在后
    pub async fn table_list(&self, request: &ConnectionRequest) -> OperationResult {
        match self.collect_tables(request).await {
            Ok(entries) if entries.is_empty() => OperationResult::failure(messages::NO_TABLE),
            Ok(entries) => OperationResult::success(entries.join(",")),
            Err(e) => {
                warn!("table_list 失败: {}", e);
                OperationResult::failure(messages::TABLE_LIST_FAILED)
            }
        }
    }

    /// 检查连接用户是否具备管理员权限
    pub async fn check_authority(&self, request: &ConnectionRequest) -> OperationResult {
        match self.admin_check(request).await {
            Ok(AdminCheck::Authorized) => OperationResult::success(messages::AUTHORIZED),
            Ok(AdminCheck::NotSuperuser) => OperationResult::failure(messages::NOT_SUPERUSER),
            Ok(AdminCheck::NotAuthorized) => OperationResult::failure(messages::NOT_AUTHORIZED),
            Ok(AdminCheck::UserNotFound) => OperationResult::failure(messages::USER_NOT_FOUND),
            Err(e) => {
                warn!("check_authority 失败: {}", e);
                OperationResult::failure(messages::USER_INFO_FAILED)
            }
        }
    }

    /// 静态权限目录，不访问数据库
    pub fn authority_list(&self, request: &PrivilegeRequest) -> OperationResult {
        match request.connection.engine() {
            Ok(engine) => {
                OperationResult::success(engine.dialect().authorities(&request.table).join(","))
            }
            Err(e) => {
                warn!("authority_list 失败: {}", e);
                OperationResult::failure(messages::AUTHORITY_LIST_FAILED)
            }
        }
    }

    pub async fn add_authority(&self, request: &PrivilegeRequest) -> OperationResult {
        self.apply(PrivilegeAction::Grant, request).await
    }

    pub async fn remove_authority(&self, request: &PrivilegeRequest) -> OperationResult {
        self.apply(PrivilegeAction::Revoke, request).await
    }

    /// 逐条执行授权语句，遇到第一个失败立即返回，已执行的语句不回滚
    async fn apply(&self, action: PrivilegeAction, request: &PrivilegeRequest) -> OperationResult {
        let target = match ConnectionTarget::from_request(&request.connection) {
            Ok(target) => target,
            Err(e) => {
                warn!("{} 配置错误: {}", action.keyword(), e);
                return OperationResult::failure(messages::CONNECT_FAILED);
            }
        };
        let dialect = target.engine.dialect();

        let statements = match dialect.privilege_statements(action, request) {
            Ok(statements) => statements,
            Err(e) => {
                warn!("{} 语句构建失败: {}", action.keyword(), e);
                return OperationResult::failure(messages::EXECUTE_FAILED);
            }
        };

        let mut session = match self.connector.connect(&target).await {
            Ok(session) => session,
            Err(e) => {
                warn!("{} 连接失败 {}: {}", action.keyword(), target.uri(), e);
                return OperationResult::failure(messages::CONNECT_FAILED);
            }
        };

        for (i, statement) in statements.iter().enumerate() {
            debug!("执行 [{}/{}]: {}", i + 1, statements.len(), statement);
            if let Err(e) = session.execute(statement).await {
                warn!(
                    "{} 在第 {}/{} 条语句失败，已执行的语句不会回滚: {}",
                    action.keyword(),
                    i + 1,
                    statements.len(),
                    e
                );
                close_session(&target, session).await;
                return OperationResult::failure(messages::EXECUTE_FAILED);
            }
        }

        close_session(&target, session).await;
        info!(
            "{} {} 条权限语句执行成功: {}",
            action.keyword(),
            statements.len(),
            target.uri()
        );
        OperationResult::success(messages::COMMITTED)
    }

    async fn open(
        &self,
        request: &ConnectionRequest,
    ) -> AdminResult<(ConnectionTarget, &'static dyn Dialect, Box<dyn DbSession>)> {
        let target = ConnectionTarget::from_request(request)?;
        let dialect = target.engine.dialect();
        let session = self.connector.connect(&target).await?;
        Ok((target, dialect, session))
    }

    /// 执行单列查询并按首次出现顺序去重
    async fn fetch_column<F>(&self, request: &ConnectionRequest, query: F) -> AdminResult<Vec<String>>
    where
        F: Fn(&dyn Dialect) -> &'static str,
    {
        let (target, dialect, mut session) = self.open(request).await?;
        let rows = session.fetch_rows(query(dialect)).await;
        close_session(&target, session).await;
        Ok(dedup_preserving_order(first_column(rows?)?))
    }

    async fn admin_check(&self, request: &ConnectionRequest) -> AdminResult<AdminCheck> {
        let (target, dialect, mut session) = self.open(request).await?;
        let rows = session.fetch_rows(dialect.privilege_holders_query()).await;
        close_session(&target, session).await;
        dialect.interpret_admin(&rows?, &target.user)
    }

    async fn collect_tables(&self, request: &ConnectionRequest) -> AdminResult<Vec<String>> {
        let (target, dialect, mut session) = self.open(request).await?;
        let result = gather_tables(dialect, session.as_mut()).await;
        close_session(&target, session).await;
        result
    }
}

/// 两列结果行（schema, table）同时贡献 schema 名与 `schema.table` 条目
async fn gather_tables(
    dialect: &dyn Dialect,
    session: &mut dyn DbSession,
) -> AdminResult<Vec<String>> {
    let mut names = Vec::new();
    if let Some(query) = dialect.schemas_query() {
        names.extend(first_column(session.fetch_rows(query).await?)?);
    }

    let mut tables = Vec::new();
    for row in session.fetch_rows(dialect.tables_query()).await? {
        match row.as_slice() {
            [] => {
                return Err(AdminError::Interpretation("表查询返回空行".to_string()));
            }
            [schema, table] => {
                names.push(schema.clone());
                tables.push(format!("{}.{}", schema, table));
            }
            [name, ..] => names.push(name.clone()),
        }
    }

    let mut entries = dedup_preserving_order(names);
    entries.extend(dedup_preserving_order(tables));
    Ok(entries)
}

async fn close_session(target: &ConnectionTarget, session: Box<dyn DbSession>) {
    if let Err(e) = session.close().await {
        debug!("关闭连接失败 {}: {}", target.uri(), e);
    }
}
