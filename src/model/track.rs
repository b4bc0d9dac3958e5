//! 定义了歌词获取的输入与输出结构。

use serde::{Deserialize, Serialize};

use crate::converter::types::{LyricDocument, LyricLine};

/// 一首需要获取歌词的歌曲。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRef {
    /// 歌曲在曲库中的 ID，歌词文档与之一一对应。
    pub id: String,
    /// 艺术家名。
    pub artist: String,
    /// 歌曲标题。
    pub title: String,
}

impl SongRef {
    /// 创建一个新的 `SongRef`。
    pub fn new(id: impl Into<String>, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// 提供商返回结果的附加信息。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsMetadata {
    /// 匹配置信度，0 到 1。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// 歌曲时长（秒）。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// 歌词语言。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 实际请求的 URL，便于排查抓取问题。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// 单个提供商的一次成功查询结果。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsResult {
    /// 歌词行。
    pub lines: Vec<LyricLine>,
    /// 这份结果是否带有逐行时间戳。
    ///
    /// 与提供商的 `supports_timing` 能力不同：支持计时的提供商也可能对某首歌
    /// 只返回纯文本歌词。
    pub has_timing: bool,
    /// 提供商名称。
    pub source: String,
    /// 附加信息。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LyricsMetadata>,
}

impl LyricsResult {
    /// 结果中是否有可用的歌词行。
    pub fn is_usable(&self) -> bool {
        !self.lines.is_empty()
    }
}

impl From<LyricsResult> for LyricDocument {
    /// 转换为歌词文档，行号按结果中的顺序重新编排为 1..n。
    fn from(result: LyricsResult) -> Self {
        let mut document = LyricDocument {
            id: None,
            has_timing: result.has_timing,
            source: Some(result.source),
            lines: result.lines,
        };
        document.renumber();
        if let Some(last) = document.lines.last_mut() {
            last.break_after = false;
        }
        if !document.has_timing {
            for line in &mut document.lines {
                line.time = None;
            }
        }
        document
    }
}
