#![warn(missing_docs)]

//! # Repertoire Lyrics
//!
//! 曲库应用的歌词子系统：从在线来源获取歌词，规范化为按段落分组的行序列，
//! 并支持在纯文本与逐行计时两种编辑模式之间切换。
//!
//! ## 主要功能
//!
//! - **歌词获取**: 按顺序尝试多个提供商（azlyrics.com 抓取、Musixmatch API），
//!   返回第一个可用的结果。
//! - **歌词表示**: 统一的 [`LyricDocument`] / [`LyricLine`] 模型，
//!   段落之间的空行以 `break_after` 标记表示。
//! - **文本转换**: 纯文本、`[MM:SS.mm]` 标签文本与行模型之间的互转。
//!
//! ## 获取歌词
//!
//! ```rust,no_run
//! use repertoire_lyrics::LyricsService;
//!
//! async {
//!     let service = LyricsService::with_default_providers().unwrap();
//!
//!     match service.get_lyrics("Adele", "Hello").await {
//!         Some(lyrics) => println!("获取歌词成功！共 {} 行。", lyrics.lines.len()),
//!         None => println!("未找到任何可用的歌词。"),
//!     }
//! };
//! ```
//!
//! ## 编辑模式切换
//!
//! ```rust
//! use repertoire_lyrics::converter::{LyricDocument, TimingMode, switch_timing};
//!
//! let mut document = LyricDocument::manual();
//! document.set_plain_text("[00:01.50]Hello\nWorld");
//!
//! let timed = switch_timing(&document, TimingMode::Timed);
//! assert_eq!(timed.lines[0].time, Some(1.5));
//! assert_eq!(timed.lines[0].text, "Hello");
//! assert_eq!(timed.lines[1].time, Some(0.0));
//! ```
pub mod config;
pub mod converter;
pub mod error;
pub mod model;
pub mod providers;
pub mod store;

use tracing::{debug, error, info, warn};

pub use crate::{
    config::{ProviderConfig, ServiceConfig},
    converter::{LyricDocument, LyricLine, TimingMode},
    error::{LyricsError, Result},
    model::track::{LyricsMetadata, LyricsResult, SongRef},
    providers::{Provider, ProviderKind},
    store::{LyricsStore, MemoryStore},
};

use crate::providers::{AzLyricsProvider, create_provider};

// ==========================================================
//  顶层 API
// ==========================================================

/// 歌词获取服务，按顺序封装了一组提供商。
///
/// 这是与本库交互的主要入口点。服务本身不持有可变状态，可以在多个任务间共享。
pub struct LyricsService {
    providers: Vec<Box<dyn Provider>>,
}

/// 一次“获取并保存”操作的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 获取成功，包含已写入存储的文档。
    Stored(LyricDocument),
    /// 所有提供商都没有找到歌词。
    NotFound,
}

impl FetchOutcome {
    /// 面向用户的提示信息。
    pub fn message(&self) -> &'static str {
        match self {
            Self::Stored(_) => "lyrics fetched",
            Self::NotFound => "lyrics not found",
        }
    }

    /// `fetch_and_store` 返回值对应的提示信息，出错时为 [`FETCH_FAILED_MESSAGE`]。
    pub fn message_for(result: &Result<FetchOutcome>) -> &'static str {
        match result {
            Ok(outcome) => outcome.message(),
            Err(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

/// 获取失败（出现错误）时面向用户的提示信息。
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch lyrics";

impl LyricsService {
    /// 使用给定的、按尝试顺序排列的提供商列表创建服务。
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// 创建只包含 azlyrics.com 抓取提供商的服务。
    pub fn with_default_providers() -> Result<Self> {
        let provider = AzLyricsProvider::new(ProviderConfig::default())?;
        Ok(Self::new(vec![Box::new(provider)]))
    }

    /// 根据服务配置创建服务。
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let providers = config
            .providers
            .iter()
            .map(|entry| create_provider(entry.kind, entry.config.clone()))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "[LyricsService] 已加载 {} 个提供商: {:?}",
            providers.len(),
            providers.iter().map(|p| p.name()).collect::<Vec<_>>()
        );
        Ok(Self::new(providers))
    }

    /// 在列表末尾追加一个提供商。
    pub fn add_provider(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(provider);
    }

    /// 按尝试顺序列出提供商名称。
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// 按顺序尝试所有提供商，返回第一个包含歌词行的结果。
    ///
    /// 提供商返回的错误只记录日志，与“没有结果”同样处理。
    /// 所有提供商都失败时返回 `None`。
    pub async fn get_lyrics(&self, artist: &str, title: &str) -> Option<LyricsResult> {
        for provider in &self.providers {
            debug!(
                "[LyricsService] 尝试从 '{}' 获取 '{artist} - {title}' 的歌词...",
                provider.name()
            );
            match provider.get_lyrics(artist, title).await {
                Ok(Some(result)) if result.is_usable() => {
                    info!(
                        "[LyricsService] 从 '{}' 获取到 {} 行歌词。",
                        provider.name(),
                        result.lines.len()
                    );
                    return Some(result);
                }
                Ok(_) => {
                    debug!("[LyricsService] '{}' 没有可用的歌词。", provider.name());
                }
                Err(e) => {
                    error!("[LyricsService] '{}' 获取歌词时出错: {e}", provider.name());
                }
            }
        }

        warn!("[LyricsService] 所有提供商都没有找到 '{artist} - {title}' 的歌词。");
        None
    }

    /// 临时创建一个指定类型的提供商，只用它查询一次。
    pub async fn get_lyrics_from_provider(
        kind: ProviderKind,
        artist: &str,
        title: &str,
        config: ProviderConfig,
    ) -> Result<Option<LyricsResult>> {
        let provider = create_provider(kind, config)?;
        provider.get_lyrics(artist, title).await
    }

    /// 获取歌词并转换为歌词文档。
    pub async fn fetch_document(&self, artist: &str, title: &str) -> Option<LyricDocument> {
        self.get_lyrics(artist, title).await.map(LyricDocument::from)
    }

    /// 为一首歌获取歌词，并写入存储（已有的歌词会被整体替换）。
    ///
    /// # 返回
    /// * `Ok(FetchOutcome::Stored(_))` - 获取成功，包含存储层返回的文档。
    /// * `Ok(FetchOutcome::NotFound)` - 所有提供商都没有找到歌词，存储不变。
    /// * `Err(_)` - 写入存储失败。
    pub async fn fetch_and_store(
        &self,
        store: &dyn LyricsStore,
        song: &SongRef,
    ) -> Result<FetchOutcome> {
        let Some(document) = self.fetch_document(&song.artist, &song.title).await else {
            return Ok(FetchOutcome::NotFound);
        };

        let stored = store.create_or_replace(&song.id, document).await?;
        info!(
            "[LyricsService] 已为歌曲 {} 保存 {} 行歌词。",
            song.id,
            stored.lines.len()
        );
        Ok(FetchOutcome::Stored(stored))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use tracing_test::traced_test;

    use super::*;

    enum Behavior {
        Nothing,
        Fail,
        Lines(usize),
    }

    struct MockProvider {
        name: &'static str,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn boxed(name: &'static str, behavior: Behavior) -> (Box<dyn Provider>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                name,
                behavior,
                calls: Arc::clone(&calls),
            };
            (Box::new(provider), calls)
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supports_timing(&self) -> bool {
            false
        }

        async fn get_lyrics(&self, _artist: &str, _title: &str) -> Result<Option<LyricsResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Nothing => Ok(None),
                Behavior::Fail => Err(LyricsError::ApiError(self.name.to_string())),
                Behavior::Lines(count) => Ok(Some(LyricsResult {
                    lines: (1..=count)
                        .map(|i| LyricLine::new(format!("line {i}"), i as u32))
                        .collect(),
                    has_timing: false,
                    source: self.name.to_string(),
                    metadata: None,
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_first_usable_result_wins() {
        let (p1, c1) = MockProvider::boxed("p1", Behavior::Nothing);
        let (p2, c2) = MockProvider::boxed("p2", Behavior::Lines(3));
        let (p3, c3) = MockProvider::boxed("p3", Behavior::Lines(5));
        let service = LyricsService::new(vec![p1, p2, p3]);

        let result = service.get_lyrics("a", "t").await.unwrap();
        assert_eq!(result.source, "p2");
        assert_eq!(result.lines.len(), 3);
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 0, "找到结果后不应再调用后续提供商");
    }

    #[tokio::test]
    async fn test_empty_result_is_skipped() {
        let (p1, _) = MockProvider::boxed("p1", Behavior::Lines(0));
        let (p2, _) = MockProvider::boxed("p2", Behavior::Lines(1));
        let service = LyricsService::new(vec![p1, p2]);

        let result = service.get_lyrics("a", "t").await.unwrap();
        assert_eq!(result.source, "p2");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_provider_error_is_treated_as_miss() {
        let (p1, _) = MockProvider::boxed("broken", Behavior::Fail);
        let (p2, _) = MockProvider::boxed("p2", Behavior::Lines(2));
        let service = LyricsService::new(vec![p1, p2]);

        let result = service.get_lyrics("a", "t").await;
        assert_eq!(result.map(|r| r.source).as_deref(), Some("p2"));
        assert!(logs_contain("'broken' 获取歌词时出错"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_exhaustion_returns_none() {
        let (p1, _) = MockProvider::boxed("p1", Behavior::Nothing);
        let (p2, _) = MockProvider::boxed("p2", Behavior::Fail);
        let service = LyricsService::new(vec![p1, p2]);

        assert!(service.get_lyrics("a", "t").await.is_none());
        assert!(logs_contain("所有提供商都没有找到"));

        let empty = LyricsService::new(Vec::new());
        assert!(empty.get_lyrics("a", "t").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_and_store() {
        let (p1, _) = MockProvider::boxed("p1", Behavior::Lines(2));
        let service = LyricsService::new(vec![p1]);
        let store = MemoryStore::new();
        let song = SongRef::new("song-1", "a", "t");

        let outcome = service.fetch_and_store(&store, &song).await.unwrap();
        let FetchOutcome::Stored(document) = &outcome else {
            panic!("应当保存成功");
        };
        assert_eq!(document.source.as_deref(), Some("p1"));
        assert_eq!(outcome.message(), "lyrics fetched");
        assert_eq!(store.get("song-1").await.unwrap().as_ref(), Some(document));

        let (p_none, _) = MockProvider::boxed("p1", Behavior::Nothing);
        let service = LyricsService::new(vec![p_none]);
        let outcome = service.fetch_and_store(&store, &song).await.unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(outcome.message(), "lyrics not found");
        assert!(store.get("song-1").await.unwrap().is_some(), "未找到时不应改动已有歌词");
    }

    struct RejectingStore;

    #[async_trait]
    impl LyricsStore for RejectingStore {
        async fn get(&self, _song_id: &str) -> Result<Option<LyricDocument>> {
            Ok(None)
        }

        async fn create(&self, song_id: &str, _document: LyricDocument) -> Result<LyricDocument> {
            Err(LyricsError::DocumentExists(song_id.to_string()))
        }

        async fn replace(&self, song_id: &str, _document: LyricDocument) -> Result<LyricDocument> {
            Err(LyricsError::DocumentNotFound(song_id.to_string()))
        }

        async fn delete(&self, _song_id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_fetch_messages() {
        let song = SongRef::new("song-1", "a", "t");

        let (p1, _) = MockProvider::boxed("p1", Behavior::Lines(1));
        let service = LyricsService::new(vec![p1]);
        let failed = service.fetch_and_store(&RejectingStore, &song).await;
        assert!(failed.is_err());
        assert_eq!(FetchOutcome::message_for(&failed), "failed to fetch lyrics");

        let stored = service.fetch_and_store(&MemoryStore::new(), &song).await;
        assert_eq!(FetchOutcome::message_for(&stored), "lyrics fetched");

        let (p_none, _) = MockProvider::boxed("p1", Behavior::Nothing);
        let service = LyricsService::new(vec![p_none]);
        let missing = service.fetch_and_store(&RejectingStore, &song).await;
        assert_eq!(FetchOutcome::message_for(&missing), "lyrics not found");
    }

    #[test]
    fn test_construction() {
        let mut service = LyricsService::with_default_providers().unwrap();
        assert_eq!(service.provider_names(), vec!["azlyrics"]);

        let (mock, _) = MockProvider::boxed("mock", Behavior::Nothing);
        service.add_provider(mock);
        assert_eq!(service.provider_names(), vec!["azlyrics", "mock"]);

        let config = ServiceConfig {
            providers: vec![
                config::ProviderEntry::new(ProviderKind::Musixmatch),
                config::ProviderEntry::new(ProviderKind::AzLyrics),
            ],
        };
        let service = LyricsService::from_config(&config).unwrap();
        assert_eq!(service.provider_names(), vec!["musixmatch", "azlyrics"]);

        let invalid = ServiceConfig { providers: vec![] };
        assert!(matches!(
            LyricsService::from_config(&invalid),
            Err(LyricsError::Config(_))
        ));
    }
}
