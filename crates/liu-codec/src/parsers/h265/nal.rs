//! H.265/HEVC NAL (Network Abstraction Layer) 单元模型.
//!
//! HEVC NAL 头部为 2 字节 (比 H.264 多一字节):
//! - forbidden_zero_bit (1 bit)
//! - nal_unit_type (6 bits)
//! - nuh_layer_id (6 bits)
//! - nuh_temporal_id_plus1 (3 bits)
//!
//! hvcC 记录中的 NALU 以数组形式分组存放, 数组头携带类型;
//! 本模块的 [`H265Nalu`] 是其轻量、保序的视图, 构造后不可变.

use bytes::Bytes;

/// HEVC NAL 单元类型 (ITU-T H.265 Table 7-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HevcNalUnitType {
    /// TRAIL_N (非参考尾随图像)
    TrailN,
    /// TRAIL_R (参考尾随图像)
    TrailR,
    /// TSA_N
    TsaN,
    /// TSA_R
    TsaR,
    /// STSA_N
    StsaN,
    /// STSA_R
    StsaR,
    /// RADL_N
    RadlN,
    /// RADL_R
    RadlR,
    /// RASL_N
    RaslN,
    /// RASL_R
    RaslR,
    /// BLA_W_LP (Broken Link Access)
    BlaWLp,
    /// BLA_W_RADL
    BlaWRadl,
    /// BLA_N_LP
    BlaNLp,
    /// IDR_W_RADL (Instantaneous Decoding Refresh)
    IdrWRadl,
    /// IDR_N_LP
    IdrNLp,
    /// CRA_NUT (Clean Random Access)
    Cra,
    /// VPS (Video Parameter Set)
    Vps,
    /// SPS (Sequence Parameter Set)
    Sps,
    /// PPS (Picture Parameter Set)
    Pps,
    /// AUD (Access Unit Delimiter)
    Aud,
    /// EOS (End of Sequence)
    Eos,
    /// EOB (End of Bitstream)
    Eob,
    /// FD (Filler Data)
    FillerData,
    /// PREFIX_SEI
    PrefixSei,
    /// SUFFIX_SEI
    SuffixSei,
    /// 未知类型
    Unknown(u8),
}

impl HevcNalUnitType {
    /// 从类型编号创建
    pub fn from_type_id(id: u8) -> Self {
        match id {
            0 => Self::TrailN,
            1 => Self::TrailR,
            2 => Self::TsaN,
            3 => Self::TsaR,
            4 => Self::StsaN,
            5 => Self::StsaR,
            6 => Self::RadlN,
            7 => Self::RadlR,
            8 => Self::RaslN,
            9 => Self::RaslR,
            16 => Self::BlaWLp,
            17 => Self::BlaWRadl,
            18 => Self::BlaNLp,
            19 => Self::IdrWRadl,
            20 => Self::IdrNLp,
            21 => Self::Cra,
            32 => Self::Vps,
            33 => Self::Sps,
            34 => Self::Pps,
            35 => Self::Aud,
            36 => Self::Eos,
            37 => Self::Eob,
            38 => Self::FillerData,
            39 => Self::PrefixSei,
            40 => Self::SuffixSei,
            _ => Self::Unknown(id),
        }
    }

    /// 获取类型编号
    pub fn type_id(&self) -> u8 {
        match self {
            Self::TrailN => 0,
            Self::TrailR => 1,
            Self::TsaN => 2,
            Self::TsaR => 3,
            Self::StsaN => 4,
            Self::StsaR => 5,
            Self::RadlN => 6,
            Self::RadlR => 7,
            Self::RaslN => 8,
            Self::RaslR => 9,
            Self::BlaWLp => 16,
            Self::BlaWRadl => 17,
            Self::BlaNLp => 18,
            Self::IdrWRadl => 19,
            Self::IdrNLp => 20,
            Self::Cra => 21,
            Self::Vps => 32,
            Self::Sps => 33,
            Self::Pps => 34,
            Self::Aud => 35,
            Self::Eos => 36,
            Self::Eob => 37,
            Self::FillerData => 38,
            Self::PrefixSei => 39,
            Self::SuffixSei => 40,
            Self::Unknown(id) => *id,
        }
    }

    /// 是否为 VCL (Video Coding Layer) NAL
    pub fn is_vcl(&self) -> bool {
        self.type_id() < 32
    }

    /// 是否为 IDR NAL
    pub fn is_idr(&self) -> bool {
        matches!(self, Self::IdrWRadl | Self::IdrNLp)
    }
}

impl std::fmt::Display for HevcNalUnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vps => write!(f, "VPS"),
            Self::Sps => write!(f, "SPS"),
            Self::Pps => write!(f, "PPS"),
            Self::Aud => write!(f, "AUD"),
            Self::Eos => write!(f, "EOS"),
            Self::Eob => write!(f, "EOB"),
            Self::FillerData => write!(f, "Filler"),
            Self::PrefixSei => write!(f, "PrefixSEI"),
            Self::SuffixSei => write!(f, "SuffixSEI"),
            Self::Unknown(id) => write!(f, "Unknown({id})"),
            other => write!(f, "{:?}", other),
        }
    }
}

/// HEVC NAL 单元 (配置记录视角)
///
/// 载荷是配置记录底层缓冲区的引用计数视图 ([`Bytes`]), 解析过程零拷贝;
/// 视图本身保证底层缓冲区存活, 但转换器在丢弃配置记录前仍需把需要
/// 保留的字节复制进输出缓冲区. 构造后不可变.
#[derive(Debug, Clone)]
pub struct H265Nalu {
    /// NAL 单元类型
    pub nal_type: HevcNalUnitType,
    /// nuh_layer_id (配置记录级条目恒为 0)
    pub layer_id: u8,
    /// nuh_temporal_id_plus1 (配置记录级条目恒为 0)
    pub temporal_id_plus1: u8,
    /// NALU 完整内容 (含 2 字节头部)
    pub payload: Bytes,
}

impl H265Nalu {
    /// 由 hvcC 数组头携带的类型编号创建配置记录级条目
    pub(crate) fn from_config_array(type_id: u8, payload: Bytes) -> Self {
        Self {
            nal_type: HevcNalUnitType::from_type_id(type_id),
            layer_id: 0,
            temporal_id_plus1: 0,
            payload,
        }
    }

    /// 是否为 VPS
    pub fn is_vps(&self) -> bool {
        matches!(self.nal_type, HevcNalUnitType::Vps)
    }

    /// 是否为 SPS
    pub fn is_sps(&self) -> bool {
        matches!(self.nal_type, HevcNalUnitType::Sps)
    }

    /// 是否为 PPS
    pub fn is_pps(&self) -> bool {
        matches!(self.nal_type, HevcNalUnitType::Pps)
    }

    /// 是否为参数集 (VPS/SPS/PPS)
    pub fn is_parameter_set(&self) -> bool {
        self.is_vps() || self.is_sps() || self.is_pps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nal_type_create() {
        assert_eq!(HevcNalUnitType::from_type_id(32), HevcNalUnitType::Vps);
        assert_eq!(HevcNalUnitType::from_type_id(33), HevcNalUnitType::Sps);
        assert_eq!(HevcNalUnitType::from_type_id(34), HevcNalUnitType::Pps);
        assert_eq!(HevcNalUnitType::from_type_id(19), HevcNalUnitType::IdrWRadl);
        assert_eq!(HevcNalUnitType::from_type_id(63), HevcNalUnitType::Unknown(63));
    }

    #[test]
    fn test_nal_type_property() {
        assert!(HevcNalUnitType::IdrWRadl.is_vcl());
        assert!(HevcNalUnitType::IdrNLp.is_idr());
        assert!(!HevcNalUnitType::Cra.is_idr());
        assert!(!HevcNalUnitType::Sps.is_vcl());
    }

    #[test]
    fn test_config_nalu_predicates() {
        let sps = H265Nalu::from_config_array(33, Bytes::from_static(&[0x42, 0x00]));
        assert!(sps.is_sps());
        assert!(!sps.is_vps());
        assert!(sps.is_parameter_set());
        assert_eq!(sps.layer_id, 0);
        assert_eq!(sps.temporal_id_plus1, 0);

        let sei = H265Nalu::from_config_array(39, Bytes::new());
        assert!(!sei.is_parameter_set());
    }
}
