//! API 核心层 - 与传输层无关的业务逻辑
//!
//! 提供权限检查、权限授予/撤销等操作，被 HTTP 服务层和命令行复用。

pub mod endpoint;
pub mod messages;
pub mod privilege_api;

pub use endpoint::Endpoint;
pub use privilege_api::PrivilegeApi;
