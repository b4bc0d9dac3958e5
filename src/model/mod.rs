//! 提供商与调用方之间交换的数据模型。

pub mod track;
