//! 编解码器标识符.
//!
//! 对标 FFmpeg 的 `AVCodecID`, 为本框架覆盖的每种编解码算法分配唯一标识.
//! 封装转换器根据它选择 avcC 或 hvcC 解析路径.

use std::fmt;

/// 编解码器标识符
///
/// 唯一标识一种编解码算法, 与容器格式无关.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// H.264 / AVC / MPEG-4 Part 10
    H264,
    /// H.265 / HEVC / MPEG-H Part 2
    H265,
}

impl CodecId {
    /// 编解码器短名称 (与 FFmpeg 命名一致)
    pub fn name(&self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::H265 => "hevc",
        }
    }

    /// 从短名称解析
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "h264" | "avc" => Some(Self::H264),
            "h265" | "hevc" => Some(Self::H265),
            _ => None,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        assert_eq!(CodecId::from_name("h264"), Some(CodecId::H264));
        assert_eq!(CodecId::from_name("avc"), Some(CodecId::H264));
        assert_eq!(CodecId::from_name("hevc"), Some(CodecId::H265));
        assert_eq!(CodecId::from_name("vp9"), None);
        assert_eq!(CodecId::H265.name(), "hevc");
    }
}
