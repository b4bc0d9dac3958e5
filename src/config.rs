//! 负责处理歌词服务的持久化配置。
//!
//! 配置文件位于 `<用户配置目录>/repertoire-lyrics/lyrics.json`，例如：
//!
//! ```json
//! {
//!   "providers": [
//!     { "kind": "azlyrics", "timeoutMs": 8000 },
//!     { "kind": "musixmatch", "apiKey": "..." }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LyricsError, Result};
use crate::providers::ProviderKind;

/// 单次请求的默认超时（毫秒）。
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// 可以从环境变量中读取的 Musixmatch API Key。
pub const MUSIXMATCH_API_KEY_ENV: &str = "MUSIXMATCH_API_KEY";

const CONFIG_DIR_NAME: &str = "repertoire-lyrics";
const CONFIG_FILE_NAME: &str = "lyrics.json";

/// 单个提供商的配置项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// API Key，只有基于 API 的提供商需要。
    pub api_key: Option<String>,
    /// 覆盖提供商的默认服务地址。
    pub base_url: Option<String>,
    /// 请求超时（毫秒）。
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    /// 请求超时。
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 配置中的服务地址，去掉末尾的 `/`；未配置时使用 `default`。
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

/// 提供商列表中的一项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// 提供商类型。
    pub kind: ProviderKind,
    /// 该提供商的配置。
    #[serde(flatten)]
    pub config: ProviderConfig,
}

impl ProviderEntry {
    /// 使用默认配置创建一项。
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            config: ProviderConfig::default(),
        }
    }
}

/// 歌词服务的配置：按尝试顺序排列的提供商列表。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// 按顺序尝试的提供商。
    pub providers: Vec<ProviderEntry>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            providers: vec![ProviderEntry::new(ProviderKind::AzLyrics)],
        }
    }
}

impl ServiceConfig {
    /// 检查配置是否可用。
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(LyricsError::Config("未配置任何提供商".to_string()));
        }
        if let Some(entry) = self.providers.iter().find(|p| p.config.timeout_ms == 0) {
            return Err(LyricsError::Config(format!(
                "提供商 '{}' 的超时时间不能为 0",
                entry.kind
            )));
        }
        Ok(())
    }

    /// 为缺少 API Key 的 Musixmatch 项填入给定的 Key。
    pub fn apply_musixmatch_key(&mut self, api_key: Option<String>) {
        let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
            return;
        };
        for entry in &mut self.providers {
            if entry.kind == ProviderKind::Musixmatch && entry.config.api_key.is_none() {
                entry.config.api_key = Some(api_key.clone());
            }
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
pub(crate) fn get_config_file_path(filename: &str) -> Result<PathBuf> {
    let mut config_dir = dirs::config_dir().ok_or_else(|| {
        LyricsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    })?;
    config_dir.push(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir)?;
    config_dir.push(filename);
    Ok(config_dir)
}

/// 从用户配置目录加载服务配置。
///
/// 配置文件不存在时返回默认配置；环境变量 `MUSIXMATCH_API_KEY` 会补全缺失的 Key。
pub fn load_service_config() -> Result<ServiceConfig> {
    let path = get_config_file_path(CONFIG_FILE_NAME)?;
    let mut config = load_service_config_from(&path)?;
    config.apply_musixmatch_key(std::env::var(MUSIXMATCH_API_KEY_ENV).ok());
    Ok(config)
}

/// 从指定路径加载服务配置，文件不存在时返回默认配置。
pub fn load_service_config_from(path: &Path) -> Result<ServiceConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config: ServiceConfig = serde_json::from_str(&content)?;
            config.validate()?;
            info!("已从 {} 加载歌词服务配置。", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("配置文件 {} 不存在，使用默认配置。", path.display());
            Ok(ServiceConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 将服务配置保存到用户配置目录。
pub fn save_service_config(config: &ServiceConfig) -> Result<()> {
    let path = get_config_file_path(CONFIG_FILE_NAME)?;
    save_service_config_to(config, &path)
}

/// 将服务配置序列化为 JSON 并保存到指定路径。
pub fn save_service_config_to(config: &ServiceConfig, path: &Path) -> Result<()> {
    config.validate()?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("歌词服务配置已保存。");
    Ok(())
}
