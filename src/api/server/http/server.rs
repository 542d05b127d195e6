//! HTTP 服务器
//!
//! 持有与传输层无关的权限 API，路由处理器通过 `AppState` 访问

use crate::api::core::PrivilegeApi;
use crate::connector::Connector;

/// HTTP 服务器
pub struct HttpServer<C: Connector> {
    privilege_api: PrivilegeApi<C>,
}

impl<C: Connector> HttpServer<C> {
    /// 创建新的 HTTP 服务器
    pub fn new(connector: C) -> Self {
        Self {
            privilege_api: PrivilegeApi::new(connector),
        }
    }

    /// 获取权限 API
    pub fn get_privilege_api(&self) -> &PrivilegeApi<C> {
        &self.privilege_api
    }
}
