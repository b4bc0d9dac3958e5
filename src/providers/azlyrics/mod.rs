//! 此模块实现了从 azlyrics.com 抓取纯文本歌词的 `Provider`。
//!
//! 歌词页面的地址由清理后的艺术家名和标题直接拼出，不经过搜索。
//! 页面中的歌词位于 `div.main-page > div.row > div.text-center` 下
//! 第一个没有 `class` 属性的 `div` 内。

use async_trait::async_trait;
use reqwest::Client;
use select::{
    document::Document,
    predicate::{Attr, Class, Name, Predicate},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ProviderConfig,
    converter::{TextSource, text_to_lines},
    error::{LyricsError, Result},
    model::track::{LyricsMetadata, LyricsResult},
    providers::{Provider, build_http_client, clean_for_url, describe_request_error},
};

/// 提供商名称。
pub const PROVIDER_NAME: &str = "azlyrics";

const DEFAULT_BASE_URL: &str = "https://www.azlyrics.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// azlyrics.com 的歌词抓取客户端。
#[derive(Debug, Clone)]
pub struct AzLyricsProvider {
    http_client: Client,
    base_url: String,
}

impl AzLyricsProvider {
    /// 使用给定配置创建实例。`base_url` 未配置时使用 azlyrics.com。
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(USER_AGENT, config.timeout())?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
        })
    }

    /// 拼出歌词页面的地址。清理后艺术家名或标题为空时返回 `None`。
    pub fn lyrics_url(&self, artist: &str, title: &str) -> Option<String> {
        let artist = clean_for_url(artist);
        let title = clean_for_url(title);
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(format!("{}/lyrics/{artist}/{title}.html", self.base_url))
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::Network(format!("HTTP 状态码 {status}")));
        }
        Ok(response.text().await?)
    }
}

/// 从歌词页面的 HTML 中取出歌词区域的文本。
///
/// 找不到歌词区域，或区域内只有空白时返回 `None`。
pub fn extract_lyrics_text(html: &str) -> Option<String> {
    let document = Document::from(html);
    let lyrics_region = Name("div")
        .and(Class("main-page"))
        .child(Name("div").and(Class("row")))
        .child(Name("div").and(Class("text-center")))
        .child(Name("div").and(Attr("class", ()).not()));

    let text = document.find(lyrics_region).next()?.text();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 把歌词页面解析为查询结果。`url` 会记录在结果的元数据中。
pub fn parse_lyrics_page(html: &str, url: &str) -> Option<LyricsResult> {
    let text = extract_lyrics_text(html)?;
    let lines = text_to_lines(&text, TextSource::Scraped);
    if lines.is_empty() {
        return None;
    }

    Some(LyricsResult {
        lines,
        has_timing: false,
        source: PROVIDER_NAME.to_string(),
        metadata: Some(LyricsMetadata {
            confidence: Some(1.0),
            url: Some(url.to_string()),
            ..Default::default()
        }),
    })
}

#[async_trait]
impl Provider for AzLyricsProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn supports_timing(&self) -> bool {
        false
    }

    #[instrument(skip(self))]
    async fn get_lyrics(&self, artist: &str, title: &str) -> Result<Option<LyricsResult>> {
        let Some(url) = self.lyrics_url(artist, title) else {
            warn!("[AZLyrics] 艺术家名或标题清理后为空，跳过请求。");
            return Ok(None);
        };

        debug!("[AZLyrics] 请求歌词页面: {url}");
        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("[AZLyrics] 获取 {url} 失败: {}", describe_request_error(&e));
                return Ok(None);
            }
        };

        match parse_lyrics_page(&html, &url) {
            Some(result) => {
                info!("[AZLyrics] 成功获取 {} 行歌词。", result.lines.len());
                Ok(Some(result))
            }
            None => {
                warn!("[AZLyrics] 页面 {url} 中没有找到歌词区域。");
                Ok(None)
            }
        }
    }
}
