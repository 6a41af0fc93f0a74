//! 应用配置 `config.toml`
//!
//! ```toml
//! [auth]
//! delay_ms = 1500
//!
//! [storage]
//! data_dir = ""
//!
//! [logging]
//! enabled = true
//! level = "info"
//! ```
//!
//! 所有段落都可省略，缺省文件等价于默认配置。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 模拟登录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 模拟网络延迟（毫秒）
    #[serde(default = "default_auth_delay_ms")]
    pub delay_ms: u64,
}

fn default_auth_delay_ms() -> u64 {
    1500
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_auth_delay_ms(),
        }
    }
}

impl AuthConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 空字符串表示使用系统数据目录
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// EnvFilter 语法，RUST_LOG 优先
    #[serde(default = "default_logging_level")]
    pub level: String,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            level: default_logging_level(),
        }
    }
}

impl AppConfig {
    pub fn filename() -> &'static str {
        "config.toml"
    }

    /// 读取配置文件，文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 配置中的数据目录覆盖
    pub fn data_dir_override(&self) -> Option<PathBuf> {
        let dir = self.storage.data_dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }
}
