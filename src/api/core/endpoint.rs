//! 端点定义
//!
//! HTTP 路由和命令行 `call` 子命令共用同一套端点名称与分发逻辑

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::api::core::messages;
use crate::api::core::privilege_api::PrivilegeApi;
use crate::connector::Connector;
use crate::core::OperationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ConnectionCheck,
    TargetUserList,
    DatabaseList,
    TableList,
    CheckAuthority,
    AuthorityList,
    AddAuthority,
    RemoveAuthority,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::ConnectionCheck,
        Endpoint::TargetUserList,
        Endpoint::DatabaseList,
        Endpoint::TableList,
        Endpoint::CheckAuthority,
        Endpoint::AuthorityList,
        Endpoint::AddAuthority,
        Endpoint::RemoveAuthority,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ConnectionCheck => "connection_check",
            Endpoint::TargetUserList => "target_user_list",
            Endpoint::DatabaseList => "database_list",
            Endpoint::TableList => "table_list",
            Endpoint::CheckAuthority => "check_authority",
            Endpoint::AuthorityList => "authority_list",
            Endpoint::AddAuthority => "add_authority",
            Endpoint::RemoveAuthority => "remove_authority",
        }
    }

    /// 请求体无法解析时返回的失败消息
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::ConnectionCheck => messages::CONNECT_FAILED,
            Endpoint::TargetUserList => messages::TARGET_USER_LIST_FAILED,
            Endpoint::DatabaseList => messages::DATABASE_LIST_FAILED,
            Endpoint::TableList => messages::TABLE_LIST_FAILED,
            Endpoint::CheckAuthority => messages::USER_INFO_FAILED,
            Endpoint::AuthorityList => messages::AUTHORITY_LIST_FAILED,
            Endpoint::AddAuthority | Endpoint::RemoveAuthority => messages::CONNECT_FAILED,
        }
    }

    /// 解析请求体并调用对应操作
    pub async fn dispatch<C: Connector>(&self, api: &PrivilegeApi<C>, body: Value) -> OperationResult {
        match self {
            Endpoint::ConnectionCheck => match self.parse(body) {
                Ok(req) => api.connection_check(&req).await,
                Err(result) => result,
            },
            Endpoint::TargetUserList => match self.parse(body) {
                Ok(req) => api.target_user_list(&req).await,
                Err(result) => result,
            },
            Endpoint::DatabaseList => match self.parse(body) {
                Ok(req) => api.database_list(&req).await,
                Err(result) => result,
            },
            Endpoint::TableList => match self.parse(body) {
                Ok(req) => api.table_list(&req).await,
                Err(result) => result,
            },
            Endpoint::CheckAuthority => match self.parse(body) {
                Ok(req) => api.check_authority(&req).await,
                Err(result) => result,
            },
            Endpoint::AuthorityList => match self.parse(body) {
                Ok(req) => api.authority_list(&req),
                Err(result) => result,
            },
            Endpoint::AddAuthority => match self.parse(body) {
                Ok(req) => api.add_authority(&req).await,
                Err(result) => result,
            },
            Endpoint::RemoveAuthority => match self.parse(body) {
                Ok(req) => api.remove_authority(&req).await,
                Err(result) => result,
            },
        }
    }

    fn parse<T: DeserializeOwned>(&self, body: Value) -> Result<T, OperationResult> {
        serde_json::from_value(body).map_err(|e| {
            log::warn!("{} 请求体解析失败: {}", self.name(), e);
            OperationResult::failure(self.failure_message())
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches('/');
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == name)
            .ok_or_else(|| format!("未知的端点: {}", s))
    }
}
