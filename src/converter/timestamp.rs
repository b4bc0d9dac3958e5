//! # 时间戳编解码
//!
//! 两种互相独立的格式：
//!
//! - 编辑框中显示的 `M:SS.s`，例如 `2:05.4`。
//! - 歌词交换文件常用的行首标签 `[MM:SS.mm]`，例如 `[01:02.50]Hello`。

use std::sync::LazyLock;

use regex::Regex;

/// 匹配行首的时间标签。分钟位数不限，秒为一到两位，小数部分可选。
static TAGGED_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d+):(\d{1,2})(?:[.:](\d{1,3}))?\]\s*(.*)$")
        .expect("未能编译 TAGGED_LINE_REGEX")
});

/// 对一行文本尝试解析行首时间标签后的结果。
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedLine {
    /// 解析出的秒数；没有标签时为 `None`。
    pub time: Option<f64>,
    /// 去掉标签后的文本；没有标签时为原文。
    pub text: String,
}

/// 将秒数格式化为 `M:SS.s`。
///
/// 先四舍五入到十分之一秒再拆分，避免出现 `0:60.0` 这样的结果。
/// 负数和非有限值按 0 处理。
pub fn format_time(seconds: f64) -> String {
    let tenths = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 10.0).round() as u64
    } else {
        0
    };
    let minutes = tenths / 600;
    let rest = tenths % 600;
    format!("{minutes}:{:02}.{}", rest / 10, rest % 10)
}

/// 将 `M:SS.s` 解析为秒数。
///
/// 输入为空、冒号数量不对、任一部分不是数字（包括带正负号）、
/// 或秒数不小于 60 时返回 `None`。与 [`parse_tagged_line`] 的规则一致。
pub fn parse_time(input: &str) -> Option<f64> {
    let (minutes_str, seconds_str) = input.trim().split_once(':')?;
    let minutes_str = minutes_str.trim();
    let seconds_str = seconds_str.trim();

    if minutes_str.is_empty()
        || seconds_str.is_empty()
        || !minutes_str.chars().all(|c| c.is_ascii_digit())
        || !seconds_str
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
    {
        return None;
    }

    let minutes = minutes_str.parse::<u32>().ok()?;
    let seconds = seconds_str.parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds >= 60.0 {
        return None;
    }

    Some(f64::from(minutes) * 60.0 + seconds)
}

/// 解析 `[MM:SS.mm]text` 形式的行。
///
/// 不带标签的行原样返回，`time` 为 `None`。标签中的秒数不小于 60，
/// 或分钟数大到无法表示时，同样视为不带标签。
pub fn parse_tagged_line(line: &str) -> TaggedLine {
    let untagged = || TaggedLine {
        time: None,
        text: line.to_string(),
    };

    let Some(caps) = TAGGED_LINE_REGEX.captures(line) else {
        return untagged();
    };

    let minutes = caps.get(1).map_or("0", |m| m.as_str()).parse::<u64>();
    let seconds = caps.get(2).map_or("0", |m| m.as_str()).parse::<u64>();
    let fraction = caps.get(3).map_or(Ok(0.0), |m| parse_fraction(m.as_str()));
    let text = caps.get(4).map_or("", |m| m.as_str());

    let time = match (minutes, seconds, fraction) {
        (Ok(min), Ok(sec), Ok(frac)) if sec < 60 => min
            .checked_mul(60)
            .and_then(|whole| whole.checked_add(sec))
            .map(|whole| whole as f64 + frac),
        _ => None,
    };

    match time {
        Some(time) => TaggedLine {
            time: Some(time),
            text: text.to_string(),
        },
        None => untagged(),
    }
}

/// 将秒数格式化为严格的交换格式标签 `[MM:SS.mm]`。
pub fn format_tag(seconds: f64) -> String {
    let centis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 100.0).round() as u64
    } else {
        0
    };
    let minutes = centis / 6000;
    let secs = (centis % 6000) / 100;
    format!("[{minutes:02}:{secs:02}.{:02}]", centis % 100)
}

/// `"5"` -> 0.5, `"50"` -> 0.5, `"505"` -> 0.505
fn parse_fraction(digits: &str) -> Result<f64, std::num::ParseIntError> {
    let value = digits.parse::<u32>()?;
    Ok(f64::from(value) / 10f64.powi(digits.len() as i32))
}
