//! 歌词表示与转换核心模块
//!
//! - [`types`]：规范化的行模型 `LyricLine` / `LyricDocument`。
//! - [`timestamp`]：`M:SS.s` 显示格式与 `[MM:SS.mm]` 交换标签的编解码。
//! - [`parsers`] / [`generators`]：纯文本与 LRC 两种文本形式和行模型之间的互转。
//! - [`mode`]：编辑时在纯文本与逐行计时模式间切换。

pub mod generators;
pub mod mode;
pub mod parsers;
pub mod timestamp;
pub mod types;

pub use generators::{lrc_generator::generate_lrc, text_generator::lines_to_text};
pub use mode::switch_timing;
pub use parsers::{lrc_parser::parse_lrc, text_parser::text_to_lines};
pub use timestamp::{TaggedLine, format_tag, format_time, parse_tagged_line, parse_time};
pub use types::{LyricDocument, LyricLine, TextSource, TimingMode};
