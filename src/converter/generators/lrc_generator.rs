//! # LRC 格式生成器

use crate::converter::{timestamp::format_tag, types::LyricLine};

/// 将歌词行导出为 LRC 文本。
///
/// 带时间戳的行输出为 `[MM:SS.mm]text`，没有时间戳的行只输出文本。
/// 段落标记在 LRC 中没有对应表示，会被丢弃。
pub fn generate_lrc(lines: &[LyricLine]) -> String {
    let mut ordered: Vec<&LyricLine> = lines.iter().collect();
    ordered.sort_by_key(|line| line.order);

    ordered
        .iter()
        .map(|line| match line.time {
            Some(time) => format!("{}{}", format_tag(time), line.text),
            None => line.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
