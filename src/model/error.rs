//! 错误类型：属性缺失、值转换失败与表格文件错误

use thiserror::Error;

/// 值转换函数（apply/revert）失败时返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransformError(pub String);

impl TransformError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("属性缺失且未配置默认值: {0}")]
    AttributeMissing(String),
    #[error("值转换失败: {0}")]
    Transform(#[from] TransformError),
    #[error("未注册的属性: {0}")]
    UnknownAttribute(String),
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("表格格式错误: {0}")]
    Format(String),
}
