//! HTTP 服务模块
//!
//! 提供基于 HTTP 协议的权限管理接口

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use router::create_router;
pub use server::HttpServer;
pub use state::AppState;
