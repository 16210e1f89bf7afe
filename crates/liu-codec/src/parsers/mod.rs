//! 码流解析器集合.
//!
//! 按编解码器组织的二进制配置记录解析器.

pub mod h264;
pub mod h265;
