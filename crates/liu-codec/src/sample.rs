//! 编码样本 (EncodedSample).
//!
//! 对标 FFmpeg 的 `AVPacket`, 表示一个访问单元 (access unit) 的压缩数据
//! 及其关联的解码器配置记录与加密子样本尺寸表.
//!
//! 样本由解封装层创建, 封装转换器只原地改写它, 不负责其生命周期.
//! 数据封装形式 (AVCC 或 Annex B) 是内容自身的属性, 不由标志位跟踪,
//! 需要调用方通过 [`crate::annexb::is_annex_b`] 判断或自行保证.

use bytes::Bytes;

use crate::CodecId;

/// 加密子样本尺寸表
///
/// 以平行数组描述访问单元中交替出现的明文/密文字节段.
/// 不变量: 所有明文段与密文段长度之和等于样本缓冲区长度,
/// 封装转换前后都必须成立.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptoInfo {
    /// 明文段长度表 (容器层来源是 16 位字段, 转换增长后可超过 65535,
    /// 因此存储宽度取 32 位)
    pub plain_sizes: Vec<u32>,
    /// 密文段长度表
    pub encrypted_sizes: Vec<u32>,
}

impl CryptoInfo {
    /// 尺寸表中所有段长度之和
    pub fn total_size(&self) -> u64 {
        let plain: u64 = self.plain_sizes.iter().map(|&v| u64::from(v)).sum();
        let encrypted: u64 = self.encrypted_sizes.iter().map(|&v| u64::from(v)).sum();
        plain + encrypted
    }

    /// 尺寸表是否为空
    pub fn is_empty(&self) -> bool {
        self.plain_sizes.is_empty() && self.encrypted_sizes.is_empty()
    }
}

/// 编码样本
///
/// 一个访问单元的压缩数据. 克隆是廉价的: 数据缓冲区为引用计数的
/// [`Bytes`], 克隆只复制句柄.
#[derive(Debug, Clone)]
pub struct EncodedSample {
    /// 访问单元压缩数据 (AVCC 或 Annex B 封装)
    pub data: Bytes,
    /// 编解码器标识
    pub codec_id: CodecId,
    /// 是否为关键帧
    pub is_keyframe: bool,
    /// 关联的解码器配置记录 (avcC/hvcC box 内容, 语义上不透明)
    pub extra_data: Option<Bytes>,
    /// 加密子样本尺寸表 (仅加密流存在)
    pub crypto: Option<CryptoInfo>,
}

impl EncodedSample {
    /// 从数据创建样本
    pub fn new(codec_id: CodecId, data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            codec_id,
            is_keyframe: false,
            extra_data: None,
            crypto: None,
        }
    }

    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
