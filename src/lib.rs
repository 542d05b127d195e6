//! dbgrant - 面向 PostgreSQL、MySQL、Oracle 与 SQL Server 的权限管理服务
//!
//! 提供连通性检查、用户/数据库/表列表、管理员权限检查、
//! 可授予权限目录以及权限授予与撤销。

pub mod api;
pub mod config;
pub mod connector;
pub mod core;
pub mod utils;
