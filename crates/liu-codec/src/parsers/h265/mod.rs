//! H.265/HEVC 配置解析.
//!
//! 提供对 MP4 hvcC box (HEVCDecoderConfigurationRecord) 的解析,
//! 以及 NAL 单元模型:
//! - hvcC 记录 → profile/tier/level/标志位/NALU 数组的结构化表示
//! - NAL 类型枚举、逐条元数据 (layer id/temporal id) 与参数集判定

pub mod hvcc;
pub mod nal;

pub use hvcc::HvccConfig;
pub use nal::{H265Nalu, HevcNalUnitType};
