//! H.264/AVC 配置解析.
//!
//! 提供对 MP4 avcC box (AVCDecoderConfigurationRecord) 的解析与构建,
//! 以及 NAL 单元类型识别:
//! - avcC 记录 → profile/level/NAL 长度前缀宽度/SPS/PPS 列表
//! - NAL 类型枚举与参数集判定

pub mod avcc;
pub mod nal;

pub use avcc::AvccConfig;
pub use nal::NalUnitType;
