//! 此模块定义了用于反序列化 Musixmatch API 响应的数据结构。

use serde::Deserialize;

/// Musixmatch API 响应的顶层通用结构。
///
/// # 泛型参数
/// - `T`: 响应主体（body）部分的数据类型。
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// 响应消息，包含头部和主体数据。
    pub message: Message<T>,
}

/// 响应消息的容器，包含头部和主体。
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Message<T> {
    /// 响应头部。
    pub header: Header,
    /// 响应主体。
    #[serde(default)]
    pub body: Option<T>,
}

/// 通用的响应头部。
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Header {
    /// API 返回的状态码，`200` 表示成功。
    #[serde(default)]
    pub status_code: i32,
    /// API 返回的提示信息。
    pub hint: Option<String>,
}

/// `matcher.subtitle.get` 接口响应的 `body` 部分。
#[derive(Debug, Deserialize, Default)]
pub struct SubtitleBody {
    /// 匹配到的字幕，没有匹配时为空。
    pub subtitle: Option<Subtitle>,
}

/// 带时间戳的歌词（字幕）。
#[derive(Debug, Deserialize, Default)]
pub struct Subtitle {
    /// 字幕内容，请求时指定了 `subtitle_format=lrc`，因此是 LRC 文本。
    #[serde(default)]
    pub subtitle_body: String,
    /// 字幕语言。
    #[serde(default)]
    pub subtitle_language: Option<String>,
    /// 字幕覆盖的时长（秒）。
    #[serde(default)]
    pub subtitle_length: Option<f64>,
}

/// `matcher.lyrics.get` 接口响应的 `body` 部分。
#[derive(Debug, Deserialize, Default)]
pub struct LyricsBody {
    /// 匹配到的歌词，没有匹配时为空。
    pub lyrics: Option<Lyrics>,
}

/// 纯文本歌词。
#[derive(Debug, Deserialize, Default)]
pub struct Lyrics {
    /// 歌词正文，末尾可能带有版权声明。
    #[serde(default)]
    pub lyrics_body: String,
    /// 歌词语言。
    #[serde(default)]
    pub lyrics_language: Option<String>,
}
