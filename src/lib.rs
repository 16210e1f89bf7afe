//! # Liu (流)
//!
//! 纯 Rust 实现的 H.264/H.265 码流配置解析与封装格式转换库.
//!
//! Liu 处理的是编码数据的"外壳"而非内容:
//! - **配置解析**: MP4 avcC/hvcC box 中的解码器配置记录
//!   (profile/level/NAL 长度前缀宽度/参数集列表)
//! - **封装转换**: 访问单元在长度前缀封装 (AVCC) 与起始码封装
//!   (Annex B) 之间的双向原地重写, 含关键帧参数集注入与加密
//!   子样本尺寸表修正
//!
//! # 快速开始
//!
//! ```rust
//! use bytes::Bytes;
//! use liu::codec::{CodecId, EncodedSample, annexb};
//!
//! let mut sample = EncodedSample::new(
//!     CodecId::H264,
//!     vec![0x00, 0x00, 0x00, 0x02, 0x65, 0x88],
//! );
//! sample.extra_data = Some(Bytes::from_static(&[
//!     1, 0x64, 0, 40, 0xFC | 3, 0xE0, 0,
//! ]));
//!
//! annexb::convert_sample_to_annex_b(&mut sample, false).unwrap();
//! assert!(annexb::is_annex_b(&sample));
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `liu-core` | 统一错误类型与有界字节游标 |
//! | `liu-codec` | 配置记录解析与封装转换 |

pub mod logging;

/// 核心类型与工具 (错误、字节游标)
pub use liu_core as core;

/// 配置解析与封装转换
pub use liu_codec as codec;

/// 获取 Liu 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
