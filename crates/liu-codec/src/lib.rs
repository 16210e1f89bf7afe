//! # liu-codec
//!
//! Liu 码流处理库, 提供 H.264/H.265 解码器配置记录解析与
//! AVCC ↔ Annex B 封装格式转换.
//!
//! 本 crate 对标 FFmpeg 的 h264_mp4toannexb / hevc_mp4toannexb
//! 比特流滤镜所在的层次: 不解码视频数据本身, 只处理封装结构.
//!
//! ## 能力
//!
//! - **配置解析**: MP4 avcC box (AVCDecoderConfigurationRecord) 与
//!   hvcC box (HEVCDecoderConfigurationRecord) 的结构化解析
//! - **封装转换**: 长度前缀封装 (AVCC) 与起始码封装 (Annex B) 的
//!   双向原地重写, 含关键帧参数集注入与加密子样本尺寸表修正
//!
//! ## 使用示例
//!
//! ```rust
//! use liu_codec::{CodecId, EncodedSample, annexb};
//!
//! // 一个 4 字节长度前缀 + 2 字节载荷的最小 AVCC 样本
//! let mut sample = EncodedSample::new(
//!     CodecId::H264,
//!     vec![0x00, 0x00, 0x00, 0x02, 0x65, 0x88],
//! );
//! sample.extra_data = Some(bytes::Bytes::from_static(&[
//!     1, 0x64, 0, 40, 0xFC | 3, 0xE0, 0,
//! ]));
//! annexb::convert_sample_to_annex_b(&mut sample, false).unwrap();
//! assert!(annexb::is_annex_b(&sample));
//! ```

pub mod annexb;
pub mod codec_id;
pub mod parsers;
pub mod sample;

// 重导出常用类型
pub use codec_id::CodecId;
pub use parsers::h264::AvccConfig;
pub use parsers::h265::HvccConfig;
pub use sample::{CryptoInfo, EncodedSample};
