//! AVCDecoderConfigurationRecord (MP4 avcC box 内容) 解析与构建.
//!
//! 二进制布局 (ISO/IEC 14496-15, 位精确, 无灵活性):
//! ```text
//! version(1) | profile(1) | compat(1) | level(1)
//! | reserved(6b) + lengthSizeMinusOne(2b)
//! | reserved(3b) + numSPS(5b) | { len(2) payload }×numSPS
//! | numPPS(1)                 | { len(2) payload }×numPPS
//! ```
//!
//! 结构定序固定且通过内嵌计数自描述, 单次前向扫描即可完成解析,
//! 无需回溯. 解码器配置是全有或全无的: 任何位置的截断都使整条
//! 记录不可用.

use bytes::Bytes;

use liu_core::{ByteReader, ByteWriter, LiuError, LiuResult};

/// avcC 配置记录
///
/// profile/level 等字段只做规范要求的字节提取, 语义上对本层不透明.
/// SPS/PPS 载荷是记录底层缓冲区的零拷贝视图.
#[derive(Debug, Clone)]
pub struct AvccConfig {
    /// configurationVersion, 恒为 1
    pub configuration_version: u8,
    /// AVCProfileIndication
    pub profile_indication: u8,
    /// profile_compatibility
    pub profile_compatibility: u8,
    /// AVCLevelIndication
    pub level_indication: u8,
    /// 受本记录约束的样本中 NAL 长度前缀的字节宽度 (1-4), 记录生命期内固定
    pub nalu_length_size: u8,
    /// SPS 列表, 按记录中出现顺序
    pub sps_list: Vec<Bytes>,
    /// PPS 列表, 按记录中出现顺序
    pub pps_list: Vec<Bytes>,
}

impl AvccConfig {
    /// 解析 avcC box 内容
    pub fn parse(data: &Bytes) -> LiuResult<Self> {
        let mut br = ByteReader::new(data);

        let configuration_version = br.read_u8().map_err(short_record)?;
        if configuration_version != 1 {
            return Err(LiuError::VersionMismatch(configuration_version));
        }
        let profile_indication = br.read_u8().map_err(short_record)?;
        let profile_compatibility = br.read_u8().map_err(short_record)?;
        let level_indication = br.read_u8().map_err(short_record)?;
        // 低 2 位为 lengthSizeMinusOne, 高 6 位保留
        let nalu_length_size = (br.read_u8().map_err(short_record)? & 0x03) + 1;

        // 低 5 位为 numOfSequenceParameterSets, 高 3 位保留
        let num_sps = br.read_u8().map_err(short_record)? & 0x1F;
        let mut sps_list = Vec::with_capacity(usize::from(num_sps));
        for i in 0..num_sps {
            sps_list.push(read_parameter_set(&mut br, data, "SPS", i)?);
        }

        let num_pps = br.read_u8().map_err(|_| {
            LiuError::InsufficientData("avcC 缺少 numOfPictureParameterSets 字段".into())
        })?;
        let mut pps_list = Vec::with_capacity(usize::from(num_pps));
        for i in 0..num_pps {
            pps_list.push(read_parameter_set(&mut br, data, "PPS", i)?);
        }

        Ok(Self {
            configuration_version,
            profile_indication,
            profile_compatibility,
            level_indication,
            nalu_length_size,
            sps_list,
            pps_list,
        })
    }

    /// SPS 条目数
    pub fn num_sps(&self) -> u8 {
        self.sps_list.len() as u8
    }

    /// PPS 条目数
    pub fn num_pps(&self) -> u8 {
        self.pps_list.len() as u8
    }

    /// 由参数集构建 avcC box 内容
    ///
    /// profile/compat/level 三个字段按规范取自首个 SPS 的头部后三字节.
    pub fn build(sps_list: &[Bytes], pps_list: &[Bytes], nalu_length_size: u8) -> LiuResult<Bytes> {
        if !(1..=4).contains(&nalu_length_size) {
            return Err(LiuError::InvalidArgument(format!(
                "NAL 长度前缀宽度 {} 不在 1-4 范围内",
                nalu_length_size
            )));
        }
        if sps_list.is_empty() {
            return Err(LiuError::InvalidArgument(
                "构建 avcC 需要至少一个 SPS".into(),
            ));
        }
        if sps_list.len() > 0x1F {
            return Err(LiuError::InvalidArgument(format!(
                "SPS 数量 {} 超过 5 位字段上限",
                sps_list.len()
            )));
        }
        if pps_list.len() > 0xFF {
            return Err(LiuError::InvalidArgument(format!(
                "PPS 数量 {} 超过 1 字节字段上限",
                pps_list.len()
            )));
        }
        let sps0 = &sps_list[0];
        if sps0.len() < 4 {
            return Err(LiuError::InvalidArgument(
                "首个 SPS 过短, 无法提取 profile/level".into(),
            ));
        }

        let mut bw = ByteWriter::with_capacity(7 + sps0.len());
        bw.write_u8(1); // configurationVersion
        bw.write_u8(sps0[1]); // AVCProfileIndication
        bw.write_u8(sps0[2]); // profile_compatibility
        bw.write_u8(sps0[3]); // AVCLevelIndication
        bw.write_u8(0xFC | (nalu_length_size - 1));
        bw.write_u8(0xE0 | sps_list.len() as u8);
        for sps in sps_list {
            bw.write_u16(sps.len() as u16);
            bw.write_bytes(sps);
        }
        bw.write_u8(pps_list.len() as u8);
        for pps in pps_list {
            bw.write_u16(pps.len() as u16);
            bw.write_bytes(pps);
        }
        Ok(Bytes::from(bw.finish()))
    }
}

/// 读取一个 { len(2) payload } 参数集条目, 返回底层缓冲区的零拷贝视图
fn read_parameter_set(
    br: &mut ByteReader<'_>,
    data: &Bytes,
    kind: &str,
    index: u8,
) -> LiuResult<Bytes> {
    let len = br.read_u16().map_err(|_| {
        LiuError::InsufficientData(format!("avcC {} 长度字段截断, index={}", kind, index))
    })? as usize;
    let start = br.position();
    br.skip(len).map_err(|_| {
        LiuError::InsufficientData(format!(
            "avcC {} 载荷截断, index={}, declared_len={}",
            kind, index, len
        ))
    })?;
    Ok(data.slice(start..start + len))
}

fn short_record(_: LiuError) -> LiuError {
    LiuError::InsufficientData("avcC 记录头部截断".into())
}
