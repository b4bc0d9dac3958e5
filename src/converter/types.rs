//! 定义了歌词的规范化结构：行序列、行时间戳和段落分隔标记。

use serde::{Deserialize, Serialize};

use crate::converter::{
    generators::text_generator::lines_to_text, parsers::text_parser::text_to_lines,
    timestamp::parse_time,
};

/// 一行可显示的歌词。
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// 存储层分配的 ID，本库只做透传。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 行文本，可以为空。
    pub text: String,
    /// 距歌曲开头的秒数。只有文档处于逐行计时模式时才存在。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// 显示顺序，从 1 开始连续编号。
    pub order: u32,
    /// 该行之后是否有一个段落空行。
    #[serde(default)]
    pub break_after: bool,
}

impl LyricLine {
    /// 创建一个不带时间戳的行。
    pub fn new(text: impl Into<String>, order: u32) -> Self {
        Self {
            text: text.into(),
            order,
            ..Default::default()
        }
    }

    /// 用编辑框中的 `M:SS.s` 字符串设置时间戳。
    ///
    /// 无法解析的输入会让时间戳变为未指定，而不是报错。
    pub fn set_time_from_display(&mut self, display: &str) {
        self.time = parse_time(display);
    }
}

/// 一首歌的完整歌词记录。
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricDocument {
    /// 存储层分配的 ID，本库只做透传。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 文档级的计时模式开关。
    pub has_timing: bool,
    /// 来源标记：提供商名称，或 `"manual"` 表示手动录入。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// 按 `order` 排列的歌词行。
    pub lines: Vec<LyricLine>,
}

impl LyricDocument {
    /// 创建一个供手动录入的文档：只包含一个空行，没有来源。
    pub fn manual() -> Self {
        Self {
            lines: vec![LyricLine::new("", 1)],
            ..Default::default()
        }
    }

    /// 重新为所有行编号，使 `order` 从 1 开始连续。
    pub fn renumber(&mut self) {
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.order = index as u32 + 1;
        }
    }

    /// 在末尾追加一个空行。计时模式下新行的时间戳为 0。
    pub fn add_line(&mut self) -> &mut LyricLine {
        let order = self.lines.len() as u32 + 1;
        self.lines.push(LyricLine {
            time: self.has_timing.then_some(0.0),
            ..LyricLine::new("", order)
        });
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// 删除指定下标的行并重新编号。下标越界时返回 `None`。
    pub fn remove_line(&mut self, index: usize) -> Option<LyricLine> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        self.renumber();
        Some(removed)
    }

    /// 渲染为纯文本编辑视图所用的文本块。
    pub fn plain_text(&self) -> String {
        lines_to_text(&self.lines)
    }

    /// 用编辑后的纯文本整体替换所有行。
    ///
    /// 按用户输入处理：非段落分隔的空行会被保留。替换后的行不带时间戳，
    /// 因此该操作只应在纯文本模式下使用。
    pub fn set_plain_text(&mut self, text: &str) {
        self.lines = text_to_lines(text, TextSource::Manual);
    }

    /// 文档是否满足“非计时模式下没有任何时间戳”的约束。
    pub fn timing_is_consistent(&self) -> bool {
        if self.has_timing {
            self.lines.iter().all(|l| l.time.is_some())
        } else {
            self.lines.iter().all(|l| l.time.is_none())
        }
    }
}

/// 文本的来源，决定了文本到行的转换如何处理多余的空行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// 从网页抓取的文本，噪声多。所有非段落分隔的空行都会被丢弃。
    Scraped,
    /// 用户输入的文本，以用户为准。段落内部的多余空行会作为空行保留。
    Manual,
}

/// 文档的编辑模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    /// 纯文本，不带时间戳。
    Plain,
    /// 逐行计时。
    Timed,
}

impl TimingMode {
    /// 文档当前所处的模式。
    pub fn of(document: &LyricDocument) -> Self {
        if document.has_timing {
            Self::Timed
        } else {
            Self::Plain
        }
    }
}
