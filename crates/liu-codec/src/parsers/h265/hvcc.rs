//! HEVCDecoderConfigurationRecord (MP4 hvcC box 内容) 解析.
//!
//! 二进制布局 (ISO/IEC 14496-15, 位精确, 无灵活性):
//! ```text
//! version(1)
//! | profileSpace(2b) + tier(1b) + profileIdc(5b)
//! | profileCompat(4) | constraintFlags(6) | levelIdc(1)
//! | reserved(4b) + minSpatialSeg(12b)
//! | parallelismType 低2b(1) | chromaFormat 低2b(1)
//! | bitDepthLumaMinus8 低3b(1) | bitDepthChromaMinus8 低3b(1)
//! | avgFrameRate(2)
//! | constantFrameRate(2b) + numTemporalLayersMinus1(3b)
//!   + temporalIdNested(1b) + lengthSizeMinusOne(2b)
//! | numOfArrays(1)
//! | { completeness(1b)+nalType(6b) | numNalus(2)
//!     | { len(2) payload }×numNalus }×numOfArrays
//! ```
//!
//! 跨字节的位打包字段用显式移位/掩码逐字段解码, 这是重写过程中最容易
//! 出静默位序错误的地方, 由单元测试按字面字节布局逐一锁定.

use bytes::Bytes;

use liu_core::{ByteReader, LiuError, LiuResult};

use super::nal::H265Nalu;

/// hvcC 配置记录
///
/// profile/tier/level 等字段只做规范要求的字节提取, 语义上对本层不透明.
/// NALU 载荷是记录底层缓冲区的零拷贝视图, 其 [`Bytes`] 句柄保证
/// 底层缓冲区在视图存活期间有效.
#[derive(Debug, Clone)]
pub struct HvccConfig {
    /// configurationVersion, 恒为 1
    pub configuration_version: u8,
    /// general_profile_space (2 位)
    pub general_profile_space: u8,
    /// general_tier_flag
    pub general_tier_flag: bool,
    /// general_profile_idc (5 位)
    pub general_profile_idc: u8,
    /// general_profile_compatibility_flags, 首个传输字节在最高字节位置
    pub general_profile_compatibility_flags: u32,
    /// general_constraint_indicator_flags, 48 位, 首个传输字节在 48 位最高字节位置
    pub general_constraint_indicator_flags: u64,
    /// general_level_idc
    pub general_level_idc: u8,
    /// min_spatial_segmentation_idc (12 位有效, 保留高 4 位已掩掉)
    pub min_spatial_segmentation_idc: u16,
    /// parallelismType (低 2 位有效)
    pub parallelism_type: u8,
    /// chroma_format_idc (低 2 位有效)
    pub chroma_format_idc: u8,
    /// bit_depth_luma_minus8 (低 3 位有效)
    pub bit_depth_luma_minus8: u8,
    /// bit_depth_chroma_minus8 (低 3 位有效)
    pub bit_depth_chroma_minus8: u8,
    /// avgFrameRate
    pub avg_frame_rate: u16,
    /// constantFrameRate (2 位)
    pub constant_frame_rate: u8,
    /// 时间层数量 (存储值为 N-1, 这里已换算为 N)
    pub num_temporal_layers: u8,
    /// temporalIdNested
    pub temporal_id_nested: bool,
    /// 受本记录约束的样本中 NAL 长度前缀的字节宽度 (1-4), 记录生命期内固定
    pub nalu_length_size: u8,
    /// 全部 NALU 的平铺保序列表: 各数组按文件顺序拼接, 不分组不重排
    pub nalus: Vec<H265Nalu>,
}

impl HvccConfig {
    /// 解析 hvcC box 内容
    ///
    /// 任何一步的短读都返回 [`LiuError::InsufficientData`],
    /// 整条记录全有或全无.
    pub fn parse(data: &Bytes) -> LiuResult<Self> {
        let mut br = ByteReader::new(data);

        let configuration_version = br.read_u8().map_err(short_record)?;
        if configuration_version != 1 {
            return Err(LiuError::VersionMismatch(configuration_version));
        }

        // profileSpace(2b) + tier(1b) + profileIdc(5b)
        let b = br.read_u8().map_err(short_record)?;
        let general_profile_space = b >> 6;
        let general_tier_flag = (b >> 5) & 0x01 == 1;
        let general_profile_idc = b & 0x1F;

        let general_profile_compatibility_flags = br.read_u32().map_err(short_record)?;
        let general_constraint_indicator_flags = br.read_u48().map_err(short_record)?;
        let general_level_idc = br.read_u8().map_err(short_record)?;
        // 值域 12 位, 掩掉保留的高 4 位
        let min_spatial_segmentation_idc = br.read_u16().map_err(short_record)? & 0x0FFF;
        let parallelism_type = br.read_u8().map_err(short_record)? & 0x03;
        let chroma_format_idc = br.read_u8().map_err(short_record)? & 0x03;
        let bit_depth_luma_minus8 = br.read_u8().map_err(short_record)? & 0x07;
        let bit_depth_chroma_minus8 = br.read_u8().map_err(short_record)? & 0x07;
        let avg_frame_rate = br.read_u16().map_err(short_record)?;

        // constantFrameRate(2b) + numTemporalLayersMinus1(3b)
        //   + temporalIdNested(1b) + lengthSizeMinusOne(2b)
        let b = br.read_u8().map_err(short_record)?;
        let constant_frame_rate = b >> 6;
        let num_temporal_layers = ((b >> 3) & 0x07) + 1;
        let temporal_id_nested = (b >> 2) & 0x01 == 1;
        let nalu_length_size = (b & 0x03) + 1;

        let num_of_arrays = br.read_u8().map_err(short_record)?;
        let mut nalus = Vec::new();
        for array_index in 0..num_of_arrays {
            // 高 1 位 array_completeness (本层忽略), 低 6 位 NAL 类型
            let type_id = br.read_u8().map_err(|_| {
                LiuError::InsufficientData(format!("hvcC 数组头截断, array={}", array_index))
            })? & 0x3F;
            let num_nalus = br.read_u16().map_err(|_| {
                LiuError::InsufficientData(format!("hvcC numNalus 截断, array={}", array_index))
            })?;
            for nalu_index in 0..num_nalus {
                let len = br.read_u16().map_err(|_| {
                    LiuError::InsufficientData(format!(
                        "hvcC NALU 长度字段截断, array={}, nalu={}",
                        array_index, nalu_index
                    ))
                })? as usize;
                let start = br.position();
                br.skip(len).map_err(|_| {
                    LiuError::InsufficientData(format!(
                        "hvcC NALU 载荷截断, array={}, nalu={}, declared_len={}",
                        array_index, nalu_index, len
                    ))
                })?;
                nalus.push(H265Nalu::from_config_array(
                    type_id,
                    data.slice(start..start + len),
                ));
            }
        }

        Ok(Self {
            configuration_version,
            general_profile_space,
            general_tier_flag,
            general_profile_idc,
            general_profile_compatibility_flags,
            general_constraint_indicator_flags,
            general_level_idc,
            min_spatial_segmentation_idc,
            parallelism_type,
            chroma_format_idc,
            bit_depth_luma_minus8,
            bit_depth_chroma_minus8,
            avg_frame_rate,
            constant_frame_rate,
            num_temporal_layers,
            temporal_id_nested,
            nalu_length_size,
            nalus,
        })
    }

    /// NALU 条目数
    pub fn num_nalus(&self) -> usize {
        self.nalus.len()
    }
}

fn short_record(_: LiuError) -> LiuError {
    LiuError::InsufficientData("hvcC 记录头部截断".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::h265::HevcNalUnitType;

    /// 最小 23 字节记录 (numOfArrays=0)
    fn minimal_record() -> Vec<u8> {
        vec![
            1,    // version
            1,    // profileSpace(0) + tier(0) + profileIdc(1)
            0x60, 0, 0, 0, // general_profile_compatibility_flags
            0x90, 0, 0, 0, 0, 0, // general_constraint_indicator_flags
            0x5A, // general_level_idc
            0, 0, // min_spatial_segmentation_idc
            0,    // parallelismType
            1,    // chroma_format_idc
            0,    // bit_depth_luma_minus8
            0,    // bit_depth_chroma_minus8
            0, 0, // avgFrameRate
            0x0F, // constantFrameRate(0) + numTemporalLayersMinus1(1)
            //      + temporalIdNested(1) + lengthSizeMinusOne(3)
            0, // numOfArrays
        ]
    }

    #[test]
    fn test_parse_minimal_record() {
        let data = minimal_record();
        assert_eq!(data.len(), 23);

        let config = HvccConfig::parse(&Bytes::from(data)).unwrap();
        assert_eq!(config.configuration_version, 1);
        assert_eq!(config.general_profile_space, 0);
        assert!(!config.general_tier_flag);
        assert_eq!(config.general_profile_idc, 1);
        assert_eq!(config.general_profile_compatibility_flags, 0x6000_0000);
        assert_eq!(config.general_constraint_indicator_flags, 0x9000_0000_0000);
        assert_eq!(config.general_level_idc, 0x5A);
        assert_eq!(config.min_spatial_segmentation_idc, 0);
        assert_eq!(config.parallelism_type, 0);
        assert_eq!(config.chroma_format_idc, 1);
        assert_eq!(config.bit_depth_luma_minus8, 0);
        assert_eq!(config.bit_depth_chroma_minus8, 0);
        assert_eq!(config.avg_frame_rate, 0);
        assert_eq!(config.constant_frame_rate, 0);
        assert_eq!(config.num_temporal_layers, 2);
        assert!(config.temporal_id_nested);
        assert_eq!(config.nalu_length_size, 4);
        assert_eq!(config.num_nalus(), 0);
    }

    /// 带 2 个数组 (1 SPS, 2 PPS) 的记录
    fn record_with_arrays() -> Vec<u8> {
        let mut data = minimal_record();
        *data.last_mut().unwrap() = 2; // numOfArrays

        // SPS 数组: 类型 33, 1 条
        data.extend_from_slice(&[0x21, 0, 1]);
        data.extend_from_slice(&[0, 8]); // nalUnitLength
        data.extend_from_slice(&[0x42, 0, 0, 0, 0, 0, 0, 0]); // 头部 + rbsp

        // PPS 数组: 类型 34, 2 条
        data.extend_from_slice(&[0x22, 0, 2]);
        data.extend_from_slice(&[0, 3, 0x44, 0, 0]);
        data.extend_from_slice(&[0, 3, 0x44, 0, 0]);

        data
    }

    #[test]
    fn test_parse_arrays_flattened_in_order() {
        let config = HvccConfig::parse(&Bytes::from(record_with_arrays())).unwrap();

        // 数组按文件顺序拼接成平铺列表: [SPS, PPS, PPS]
        assert_eq!(config.num_nalus(), 3);
        assert_eq!(config.nalus[0].nal_type, HevcNalUnitType::Sps);
        assert_eq!(config.nalus[1].nal_type, HevcNalUnitType::Pps);
        assert_eq!(config.nalus[2].nal_type, HevcNalUnitType::Pps);

        for nalu in &config.nalus {
            assert_eq!(nalu.layer_id, 0);
            assert_eq!(nalu.temporal_id_plus1, 0);
        }
        assert!(config.nalus[0].is_sps());
        assert!(!config.nalus[1].is_sps());
        assert!(!config.nalus[2].is_sps());

        assert_eq!(config.nalus[0].payload.len(), 8);
        assert_eq!(config.nalus[0].payload[0], 0x42);
        assert_eq!(config.nalus[1].payload.len(), 3);
    }

    #[test]
    fn test_parse_reject_version_mismatch() {
        let mut data = minimal_record();
        data[0] = 2;
        let err = HvccConfig::parse(&Bytes::from(data)).expect_err("version=2 应解析失败");
        assert!(matches!(err, LiuError::VersionMismatch(2)));
    }

    #[test]
    fn test_parse_reject_truncated_header() {
        // 只给到 general_level_idc 为止
        let data = minimal_record()[..13].to_vec();
        let err = HvccConfig::parse(&Bytes::from(data)).expect_err("截断记录应解析失败");
        assert!(matches!(err, LiuError::InsufficientData(_)));
    }

    #[test]
    fn test_parse_reject_truncated_nalu_payload() {
        let mut data = record_with_arrays();
        // 去掉最后一个 PPS 的最后一个字节
        data.pop();
        let err = HvccConfig::parse(&Bytes::from(data)).expect_err("NALU 载荷截断应解析失败");
        assert!(matches!(err, LiuError::InsufficientData(_)));
    }

    #[test]
    fn test_parse_reject_empty_buffer() {
        let err = HvccConfig::parse(&Bytes::new()).expect_err("空缓冲区应解析失败");
        assert!(matches!(err, LiuError::InsufficientData(_)));
    }

    #[test]
    fn test_bit_packed_fields() {
        let mut data = minimal_record();
        // profileSpace=2, tier=1, profileIdc=0x11
        data[1] = 0b10_1_10001;
        // min_spatial_segmentation_idc: 保留高 4 位置 1, 低 12 位为 0xABC
        data[13] = 0xFA;
        data[14] = 0xBC;
        // constantFrameRate=1, numTemporalLayersMinus1=3, nested=0, lengthSizeMinusOne=1
        data[21] = 0b01_011_0_01;

        let config = HvccConfig::parse(&Bytes::from(data)).unwrap();
        assert_eq!(config.general_profile_space, 2);
        assert!(config.general_tier_flag);
        assert_eq!(config.general_profile_idc, 0x11);
        assert_eq!(config.min_spatial_segmentation_idc, 0x0ABC);
        assert_eq!(config.constant_frame_rate, 1);
        assert_eq!(config.num_temporal_layers, 4);
        assert!(!config.temporal_id_nested);
        assert_eq!(config.nalu_length_size, 2);
    }
}
