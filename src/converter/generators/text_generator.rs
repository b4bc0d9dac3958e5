//! # 纯文本歌词生成器

use crate::converter::types::LyricLine;

/// 将歌词行渲染为可编辑的纯文本。
///
/// 按 `order` 输出每行文本，`break_after` 的行后面多输出一个空行。
/// 时间戳会被丢弃。
pub fn lines_to_text(lines: &[LyricLine]) -> String {
    let mut ordered: Vec<&LyricLine> = lines.iter().collect();
    ordered.sort_by_key(|line| line.order);

    ordered
        .iter()
        .map(|line| {
            if line.break_after {
                format!("{}\n", line.text)
            } else {
                line.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
