//! 统一错误类型定义

use thiserror::Error;

/// 工具箱错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolboxError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 网络错误
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 响应解析错误
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 操作超时
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// 工具箱 Result 类型别名
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
