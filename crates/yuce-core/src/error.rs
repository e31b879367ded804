//! 统一错误类型定义.
//!
//! 所有 yuce crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// yuce 统一错误类型
#[derive(Debug, Error)]
pub enum YuceError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的操作
    #[error("不支持的操作: {0}")]
    Unsupported(String),

    /// 内存分配失败
    #[error("内存分配失败: {0}")]
    OutOfMemory(String),

    /// 无效数据 (输入图像与声明不符等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 内部错误 (不应发生)
    #[error("内部错误: {0}")]
    Internal(String),
}

/// yuce 统一 Result 类型
pub type YuceResult<T> = Result<T, YuceError>;
