use crate::error::{Result, RutestError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 报告相关配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 显示每个测试的耗时
    pub verbose: bool,
    /// 是否输出颜色
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
        }
    }
}

/// 方法发现相关配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// 拒绝同时带有多个角色标记的方法
    pub strict_roles: bool,
}

/// 完整的配置文件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RutestConfig {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rutest.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<RutestConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RutestError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/rutest/
    ///
    /// 找不到配置文件时返回默认配置
    pub fn find_and_load() -> Result<RutestConfig> {
        if let Some(path) = Self::find_in_current_dir().or_else(Self::find_in_user_dir) {
            tracing::debug!(path = %path.display(), "Loading config file");
            return Self::load_from_path(path);
        }

        Ok(RutestConfig::default())
    }

    fn find_in_current_dir() -> Option<std::path::PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<std::path::PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rutest").join(Self::CONFIG_FILE);

        config_path.exists().then_some(config_path)
    }
}
