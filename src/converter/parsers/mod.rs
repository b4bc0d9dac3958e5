//! 各个歌词格式的解析器模块。

pub mod lrc_parser;
pub mod text_parser;
