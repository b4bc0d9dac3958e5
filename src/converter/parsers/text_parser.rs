//! # 纯文本歌词解析器
//!
//! 把只包含换行的自由文本还原为带段落结构的行序列。段落之间的单个空行
//! 不会成为一行，而是变成前一行的 `break_after` 标记。

use crate::converter::types::{LyricLine, TextSource};

/// 将多行文本转换为歌词行。
///
/// 规则：
/// - 每个未被消耗的原始行产生一个 `LyricLine`，文本去除首尾空白，`order` 从 1 开始。
/// - 若下一行是空行，且其后还有非空行，则当前行 `break_after = true`，并消耗掉这一个空行。
/// - 之后只剩空行的空行属于尾部噪声，直接丢弃。
/// - [`TextSource::Scraped`]：其余空行一律丢弃。
/// - [`TextSource::Manual`]：其余空行作为空行保留；结果为空时返回一个空行。
pub fn text_to_lines(text: &str, source: TextSource) -> Vec<LyricLine> {
    let input = match source {
        TextSource::Scraped => text.trim(),
        TextSource::Manual => text,
    };
    let raw_lines: Vec<&str> = input.lines().collect();
    let is_blank = |idx: usize| raw_lines[idx].trim().is_empty();

    // content_from[i]：下标 i 及之后是否还有非空行
    let mut content_from = vec![false; raw_lines.len() + 1];
    for idx in (0..raw_lines.len()).rev() {
        content_from[idx] = content_from[idx + 1] || !is_blank(idx);
    }

    let mut lines = Vec::new();
    let mut order = 1;
    let mut idx = 0;
    while idx < raw_lines.len() {
        let line_text = raw_lines[idx].trim();

        if line_text.is_empty() {
            let keep = source == TextSource::Manual && content_from[idx + 1];
            if !keep {
                idx += 1;
                continue;
            }
        }

        let next_is_blank = idx + 1 < raw_lines.len() && is_blank(idx + 1);
        let break_after = next_is_blank && content_from[idx + 2];

        lines.push(LyricLine {
            break_after,
            ..LyricLine::new(line_text, order)
        });
        order += 1;

        // 跳过刚检测到的空行
        idx += if next_is_blank { 2 } else { 1 };
    }

    if lines.is_empty() && source == TextSource::Manual {
        lines.push(LyricLine::new("", 1));
    }

    lines
}
