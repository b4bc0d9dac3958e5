//! 定义了整个 `repertoire-lyrics` 库的错误类型 `LyricsError`。

use std::io;
use thiserror::Error;

/// `repertoire-lyrics` 库的通用错误枚举。
///
/// 注意：网络失败、页面结构变化、时间戳格式错误等“预期内”的失败
/// 不会以错误的形式穿过提供商边界，它们在各自的组件内部被转换为 `None`。
#[derive(Error, Debug)]
pub enum LyricsError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 更通用的网络层错误，例如非 2xx 的响应状态码
    #[error("网络错误: {0}")]
    Network(String),

    /// 在数据源中找不到歌词内容
    #[error("在源中未找到歌词内容")]
    LyricNotFound,

    /// 通用的歌词解析错误
    #[error("歌词解析失败: {0}")]
    Parser(String),

    /// 不支持的歌词源提供商
    #[error("不支持的提供商: '{0}'")]
    ProviderNotSupported(String),

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),

    /// 配置无效
    #[error("配置错误: {0}")]
    Config(String),

    /// 该歌曲已经存在歌词文档
    #[error("歌曲 '{0}' 已存在歌词")]
    DocumentExists(String),

    /// 该歌曲没有歌词文档
    #[error("歌曲 '{0}' 没有歌词")]
    DocumentNotFound(String),
}

/// `LyricsError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, LyricsError>;
