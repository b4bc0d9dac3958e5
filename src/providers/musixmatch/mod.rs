//! 此模块实现了与 Musixmatch 官方 API 交互的 `Provider`。
//!
//! 需要 API Key。优先通过 `matcher.subtitle.get` 获取 LRC 格式的逐行计时歌词，
//! 取不到时退回 `matcher.lyrics.get` 的纯文本歌词。

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::{
    config::ProviderConfig,
    converter::{TextSource, parse_lrc, text_to_lines},
    error::{LyricsError, Result},
    model::track::{LyricsMetadata, LyricsResult},
    providers::{Provider, build_http_client, describe_request_error},
};

pub mod models;

/// 提供商名称。
pub const PROVIDER_NAME: &str = "musixmatch";

const DEFAULT_BASE_URL: &str = "https://api.musixmatch.com/ws/1.1";
const USER_AGENT: &str = concat!("repertoire-lyrics/", env!("CARGO_PKG_VERSION"));

/// 免费版 API 在歌词末尾附加的版权声明以此开头。
const COPYRIGHT_MARKER: &str = "*******";

/// Musixmatch API 客户端。
#[derive(Debug, Clone)]
pub struct MusixmatchProvider {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MusixmatchProvider {
    /// 使用给定配置创建实例。没有 API Key 时实例仍可创建，但所有查询都返回 `None`。
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty());
        Ok(Self {
            http_client: build_http_client(USER_AGENT, config.timeout())?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            api_key,
        })
    }

    /// 是否配置了 API Key。
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// 调用一个 `matcher.*` 接口并返回其 `body`。
    ///
    /// 状态码不是 200 或 `body` 为空时返回 `LyricNotFound` / `ApiError`。
    async fn request_matcher<T: DeserializeOwned>(
        &self,
        method: &str,
        api_key: &str,
        artist: &str,
        title: &str,
        extra: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{method}", self.base_url);
        let mut query = vec![
            ("format", "json"),
            ("q_artist", artist),
            ("q_track", title),
            ("apikey", api_key),
        ];
        query.extend_from_slice(extra);

        let response = self.http_client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::Network(format!("HTTP 状态码 {status}")));
        }
        let resp_text = response.text().await?;
        trace!(response_text = %resp_text, "[Musixmatch] 原始 JSON 响应");

        let json_value: serde_json::Value = serde_json::from_str(&resp_text)?;
        let header = &json_value["message"]["header"];
        let status_code = header["status_code"].as_i64().unwrap_or(0);

        match status_code {
            200 => {
                let api_resp: models::ApiResponse<T> = serde_json::from_value(json_value)?;
                api_resp.message.body.ok_or(LyricsError::LyricNotFound)
            }
            404 => Err(LyricsError::LyricNotFound),
            _ => {
                let hint = header["hint"].as_str().unwrap_or("unknown");
                Err(LyricsError::ApiError(format!(
                    "{method} (状态码: {status_code}, 提示: {hint})"
                )))
            }
        }
    }

    async fn fetch_subtitle(
        &self,
        api_key: &str,
        artist: &str,
        title: &str,
    ) -> Result<Option<LyricsResult>> {
        let body: models::SubtitleBody = self
            .request_matcher(
                "matcher.subtitle.get",
                api_key,
                artist,
                title,
                &[("subtitle_format", "lrc")],
            )
            .await?;
        let Some(subtitle) = body.subtitle else {
            return Ok(None);
        };

        let lines = parse_lrc(&subtitle.subtitle_body);
        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(LyricsResult {
            lines,
            has_timing: true,
            source: PROVIDER_NAME.to_string(),
            metadata: Some(LyricsMetadata {
                duration: subtitle.subtitle_length.filter(|d| *d > 0.0),
                language: subtitle.subtitle_language.filter(|l| !l.is_empty()),
                ..Default::default()
            }),
        }))
    }

    async fn fetch_plain_lyrics(
        &self,
        api_key: &str,
        artist: &str,
        title: &str,
    ) -> Result<Option<LyricsResult>> {
        let body: models::LyricsBody = self
            .request_matcher("matcher.lyrics.get", api_key, artist, title, &[])
            .await?;
        let Some(lyrics) = body.lyrics else {
            return Ok(None);
        };

        let lines = text_to_lines(strip_copyright(&lyrics.lyrics_body), TextSource::Scraped);
        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(LyricsResult {
            lines,
            has_timing: false,
            source: PROVIDER_NAME.to_string(),
            metadata: Some(LyricsMetadata {
                language: lyrics.lyrics_language.filter(|l| !l.is_empty()),
                ..Default::default()
            }),
        }))
    }
}

/// 去掉歌词末尾的版权声明以及之后的所有内容。
fn strip_copyright(body: &str) -> &str {
    match body.find(COPYRIGHT_MARKER) {
        Some(pos) => &body[..pos],
        None => body,
    }
}

/// 把查询中的“预期内”失败降级为 `None`，只记录日志。
fn recover_expected(stage: &str, outcome: Result<Option<LyricsResult>>) -> Option<LyricsResult> {
    match outcome {
        Ok(result) => result,
        Err(LyricsError::LyricNotFound) => {
            debug!("[Musixmatch] {stage} 没有匹配的内容。");
            None
        }
        Err(e) => {
            warn!("[Musixmatch] {stage} 失败: {}", describe_request_error(&e));
            None
        }
    }
}

#[async_trait]
impl Provider for MusixmatchProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn supports_timing(&self) -> bool {
        true
    }

    #[instrument(skip(self))]
    async fn get_lyrics(&self, artist: &str, title: &str) -> Result<Option<LyricsResult>> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("[Musixmatch] 未配置 API Key，无法查询歌词。");
            return Ok(None);
        };

        let subtitle = self.fetch_subtitle(api_key, artist, title).await;
        if let Some(result) = recover_expected("获取逐行歌词", subtitle) {
            info!("[Musixmatch] 成功获取 {} 行逐行歌词。", result.lines.len());
            return Ok(Some(result));
        }

        debug!("[Musixmatch] 没有逐行歌词，尝试获取纯文本歌词。");
        let plain = self.fetch_plain_lyrics(api_key, artist, title).await;
        let result = recover_expected("获取纯文本歌词", plain);
        if let Some(result) = &result {
            info!("[Musixmatch] 成功获取 {} 行纯文本歌词。", result.lines.len());
        }
        Ok(result)
    }
}
