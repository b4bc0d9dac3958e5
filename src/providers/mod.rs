//! 提供商模块
//!
//! 该模块定义了歌词来源的核心抽象 [`Provider`]，以及按名称创建提供商的工厂函数。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    config::ProviderConfig,
    error::{LyricsError, Result},
    model::track::LyricsResult,
};

pub mod azlyrics;
pub mod musixmatch;

pub use azlyrics::AzLyricsProvider;
pub use musixmatch::MusixmatchProvider;

/// 定义了所有歌词提供商需要实现的通用接口。
#[async_trait]
pub trait Provider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"azlyrics"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 该提供商是否有能力提供逐行时间戳。
    ///
    /// 这是提供商的静态能力，不代表每次查询的结果都带时间戳。
    ///
    fn supports_timing(&self) -> bool;

    ///
    /// 根据艺术家和歌曲标题获取歌词。
    ///
    /// # 返回
    /// * `Ok(Some(_))` - 找到了歌词。
    /// * `Ok(None)` - 没有匹配的内容、网络请求失败或超时、内容无法解析出任何行。
    ///   这些都是预期内的失败，不应以错误的形式返回。
    /// * `Err(_)` - 仅用于意料之外的错误，例如配置错误。
    ///
    async fn get_lyrics(&self, artist: &str, title: &str) -> Result<Option<LyricsResult>>;
}

/// 所有内置的提供商类型。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// 抓取 azlyrics.com 页面，不支持时间戳。
    AzLyrics,
    /// Musixmatch API，支持逐行时间戳，需要 API Key。
    Musixmatch,
}

impl ProviderKind {
    /// 列出所有内置提供商的名称。
    pub fn all_names() -> Vec<&'static str> {
        Self::iter().map(|kind| kind.as_str()).collect()
    }

    /// 提供商名称。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AzLyrics => azlyrics::PROVIDER_NAME,
            Self::Musixmatch => musixmatch::PROVIDER_NAME,
        }
    }
}

/// 根据类型和配置创建一个提供商实例。
pub fn create_provider(kind: ProviderKind, config: ProviderConfig) -> Result<Box<dyn Provider>> {
    let provider: Box<dyn Provider> = match kind {
        ProviderKind::AzLyrics => Box::new(AzLyricsProvider::new(config)?),
        ProviderKind::Musixmatch => Box::new(MusixmatchProvider::new(config)?),
    };
    Ok(provider)
}

/// 根据名称创建一个提供商实例。未知的名称返回 `ProviderNotSupported`。
pub fn create_provider_by_name(name: &str, config: ProviderConfig) -> Result<Box<dyn Provider>> {
    let kind = name
        .parse::<ProviderKind>()
        .map_err(|_| LyricsError::ProviderNotSupported(name.to_string()))?;
    create_provider(kind, config)
}

/// 将字符串清理为 URL 片段：转为小写，只保留 ASCII 字母和数字。
pub fn clean_for_url(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 创建带有超时的 HTTP 客户端。
pub(crate) fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// 对请求失败的原因做简短描述，用于日志。
pub(crate) fn describe_request_error(err: &LyricsError) -> String {
    match err {
        LyricsError::Reqwest(e) if e.is_timeout() => format!("请求超时: {e}"),
        LyricsError::Reqwest(e) if e.is_connect() => format!("无法连接: {e}"),
        other => other.to_string(),
    }
}
