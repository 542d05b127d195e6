//! 核心层：引擎类型、请求/响应类型、错误与 SQL 方言

pub mod dialect;
pub mod engine;
pub mod error;
pub mod identifier;
pub mod types;

pub use dialect::{AdminCheck, Dialect, PrivilegeAction};
pub use engine::EngineType;
pub use error::{AdminError, AdminResult};
pub use types::{
    dedup_preserving_order, ConnectionRequest, OperationResult, PrivilegeRequest, Rows, Status,
};
