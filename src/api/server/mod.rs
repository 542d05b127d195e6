//! 网络服务层
//!
//! 提供基于 HTTP 的权限管理服务接口

pub mod http;

pub use http::{create_router, AppState, HttpServer};
