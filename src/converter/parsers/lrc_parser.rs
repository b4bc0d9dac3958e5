//! # LRC 格式解析器
//!
//! 只处理逐行计时的 `[MM:SS.mm]text` 行，元数据标签和不带时间戳的行会被跳过。

use crate::converter::{timestamp::parse_tagged_line, types::LyricLine};

/// 解析 LRC 内容为带时间戳的歌词行。
///
/// 文本为空的行（通常是间奏占位）会被丢弃。结果按时间戳稳定排序，
/// 以兼容乱序的 LRC 文件，然后从 1 开始编号。
pub fn parse_lrc(content: &str) -> Vec<LyricLine> {
    let mut lines: Vec<LyricLine> = content
        .lines()
        .filter_map(|raw| {
            let tagged = parse_tagged_line(raw.trim());
            let time = tagged.time?;
            let text = tagged.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(LyricLine {
                time: Some(time),
                ..LyricLine::new(text, 0)
            })
        })
        .collect();

    lines.sort_by(|a, b| a.time.unwrap_or(0.0).total_cmp(&b.time.unwrap_or(0.0)));
    for (idx, line) in lines.iter_mut().enumerate() {
        line.order = idx as u32 + 1;
    }
    lines
}
