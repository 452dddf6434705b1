use thiserror::Error;

use crate::suite::Role;

#[derive(Error, Debug)]
pub enum RutestError {
    #[error("找不到测试套件: {0}")]
    SuiteNotFound(String),

    #[error("无法实例化测试套件 {suite}: {reason}")]
    Instantiation { suite: String, reason: String },

    #[error("{phase} 方法 {method} 调用失败: {reason}")]
    Invocation {
        phase: Role,
        method: String,
        reason: String,
    },

    #[error("方法 {method} 同时带有多个角色标记: {roles}")]
    MultiRole { method: String, roles: String },

    #[error("套件 {suite} 中存在重名方法: {method}")]
    DuplicateMethod { suite: String, method: String },

    #[error("配置错误: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RutestError {
    fn from(err: toml::de::Error) -> Self {
        RutestError::Config(err.to_string())
    }
}

/// Result type for rutest crate
pub type Result<T> = std::result::Result<T, RutestError>;
