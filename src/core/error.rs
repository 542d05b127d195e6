//! 权限管理核心错误类型
//!
//! 所有错误最终都会在 API 层被折叠为固定的失败消息，这里保留细节仅用于日志

use thiserror::Error;

use crate::core::engine::EngineType;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("未知的数据库类型: {0}")]
    UnknownEngine(String),

    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),

    #[error("无效的标识符 {field}: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("{engine} 不支持的权限: {privilege:?}")]
    UnknownPrivilege {
        engine: EngineType,
        privilege: String,
    },

    #[error("{0} 驱动未编译")]
    DriverUnavailable(EngineType),

    #[error("连接失败: {0}")]
    Connection(String),

    #[error("查询执行失败: {0}")]
    Query(String),

    #[error("结果解析失败: {0}")]
    Interpretation(String),
}

impl AdminError {
    /// 是否发生在会话建立之前（配置或连接阶段）
    pub fn is_connect_stage(&self) -> bool {
        matches!(
            self,
            AdminError::UnknownEngine(_)
                | AdminError::MissingField(_)
                | AdminError::DriverUnavailable(_)
                | AdminError::Connection(_)
        )
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
