//! 各个歌词格式的生成器模块。

pub mod lrc_generator;
pub mod text_generator;
