//! # 编辑模式切换
//!
//! 用户在“纯文本”和“逐行计时”两种编辑视图之间切换时，对文档做的转换。
//! 该转换整体上不可逆：切到计时模式时无法识别标签的行时间为 0，
//! 切回纯文本模式时已有的时间戳会被直接丢弃。

use tracing::debug;

use crate::converter::{
    timestamp::parse_tagged_line,
    types::{LyricDocument, TimingMode},
};

/// 返回切换到 `target` 模式后的新文档。
///
/// - 纯文本 -> 计时：每行尝试解析行首的 `[MM:SS.mm]` 标签，成功则使用解析出的时间
///   和去掉标签的文本，否则时间为 0、文本不变。
/// - 计时 -> 纯文本：删除所有时间戳，不会把时间写回文本。
/// - 目标模式与当前模式相同时不做转换，只修复时间戳约束
///   （计时模式补齐缺失的时间，纯文本模式清除残留的时间）。
pub fn switch_timing(document: &LyricDocument, target: TimingMode) -> LyricDocument {
    let mut converted = document.clone();
    let current = TimingMode::of(document);

    match (current, target) {
        (TimingMode::Plain, TimingMode::Timed) => {
            let mut recovered = 0;
            for line in &mut converted.lines {
                let tagged = parse_tagged_line(&line.text);
                match tagged.time {
                    Some(time) => {
                        line.time = Some(time);
                        line.text = tagged.text;
                        recovered += 1;
                    }
                    None => line.time = Some(0.0),
                }
            }
            debug!(
                "切换到计时模式，从文本中恢复了 {recovered}/{} 行的时间戳",
                converted.lines.len()
            );
        }
        (TimingMode::Timed, TimingMode::Timed) => {
            for line in &mut converted.lines {
                line.time.get_or_insert(0.0);
            }
        }
        (_, TimingMode::Plain) => {
            for line in &mut converted.lines {
                line.time = None;
            }
        }
    }

    converted.has_timing = target == TimingMode::Timed;
    converted
}
