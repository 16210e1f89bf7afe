//! AVCC ↔ Annex B 封装格式转换.
//!
//! 对标 FFmpeg 的 h264_mp4toannexb / hevc_mp4toannexb 比特流滤镜:
//! 在不触碰编码数据本身的前提下, 把一个访问单元在长度前缀封装
//! (AVCC/HVCC, ISO-BMFF 容器使用) 与起始码封装 (Annex B, 多数软硬件
//! 解码器要求) 之间重写, 并同步修正关联的加密子样本尺寸表.
//!
//! 转换是单趟的、终结性的状态机: 每次调用处理一个样本, 调用间不保留
//! 任何状态. 所有失败路径都在写入样本前返回, 失败的样本保持原样
//! (中途产生的临时输出缓冲区直接丢弃).

use bytes::Bytes;
use log::debug;

use liu_core::{ByteReader, ByteWriter, LiuError, LiuResult};

use crate::CodecId;
use crate::parsers::h264::AvccConfig;
use crate::parsers::h265::HvccConfig;
use crate::sample::{CryptoInfo, EncodedSample};

/// Annex B 4 字节起始码
const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// 判断样本是否已是 Annex B 封装 (以 4 字节起始码 0x00000001 开头)
///
/// 已是 Annex B 的样本再次转换是未定义行为, 由调用方用本函数把关,
/// 转换器不做静默处理.
pub fn is_annex_b(sample: &EncodedSample) -> bool {
    sample.data.starts_with(&START_CODE)
}

/// 把一个长度前缀封装的样本原地转换为 Annex B 封装
///
/// `add_parameter_sets` 为 true 且样本为关键帧时, 把配置记录中的参数集
/// NALU 按记录中的解析顺序 (H.264: SPS 后 PPS; H.265: 惯例上 VPS, SPS,
/// PPS) 逐个以 `[起始码][载荷]` 形式前置到输出. 非关键帧或未开启注入
/// 时不前置任何内容, 转换仍然成功.
///
/// 样本携带加密子样本尺寸表时, 首个明文段长度按总字节增量修正
/// (起始码替换与参数集注入都发生在首个密文边界之前的明文区);
/// 密文段长度永不改动. 明文段长度允许增长越过 16 位来源字段的上限,
/// 修正结果超出 32 位存储宽度时返回 [`LiuError::Overflow`],
/// 不做静默截断.
pub fn convert_sample_to_annex_b(
    sample: &mut EncodedSample,
    add_parameter_sets: bool,
) -> LiuResult<()> {
    let extra_data = sample
        .extra_data
        .clone()
        .ok_or(LiuError::MissingConfiguration)?;

    // 从配置记录解析长度前缀宽度与参数集列表 (保持记录中的出现顺序)
    let (nalu_length_size, parameter_sets) = match sample.codec_id {
        CodecId::H264 => {
            let config = AvccConfig::parse(&extra_data)?;
            let mut sets = config.sps_list.clone();
            sets.extend(config.pps_list.iter().cloned());
            (config.nalu_length_size, sets)
        }
        CodecId::H265 => {
            let config = HvccConfig::parse(&extra_data)?;
            let sets = config
                .nalus
                .iter()
                .filter(|nalu| nalu.is_parameter_set())
                .map(|nalu| nalu.payload.clone())
                .collect();
            (config.nalu_length_size, sets)
        }
    };

    if sample.data.len() < usize::from(nalu_length_size) {
        return Err(LiuError::MalformedSample(format!(
            "样本长度 {} 小于 NAL 长度前缀宽度 {}",
            sample.data.len(),
            nalu_length_size
        )));
    }

    let mut out = ByteWriter::with_capacity(sample.data.len() + 128);

    if add_parameter_sets && sample.is_keyframe {
        for payload in &parameter_sets {
            out.write_bytes(&START_CODE);
            out.write_bytes(payload);
        }
        debug!(
            "关键帧前置 {} 个参数集 NALU, 共 {} 字节",
            parameter_sets.len(),
            out.len()
        );
    }

    // 逐个把 [长度前缀|载荷] 重写为 [起始码|载荷]
    let mut br = ByteReader::new(&sample.data);
    while !br.is_empty() {
        let nal_len = br
            .read_uint(usize::from(nalu_length_size))
            .map_err(|_| LiuError::MalformedSample("NAL 长度前缀截断".into()))?
            as usize;
        let payload = br.read_slice(nal_len).map_err(|_| {
            LiuError::MalformedSample(format!(
                "NAL 长度前缀声明 {} 字节, 超出剩余缓冲区",
                nal_len
            ))
        })?;
        out.write_bytes(&START_CODE);
        out.write_bytes(payload);
    }

    commit(sample, out.finish())
}

/// 把一个 Annex B 封装的样本原地转换为 4 字节长度前缀的 AVCC 封装
///
/// 输入必须以 4 字节起始码开头; 码流内部接受 3 字节或 4 字节起始码
/// (实际码流中两种写法常混用), 输出统一为 4 字节大端长度前缀.
/// 不合成配置记录, `extra_data` 保持原样. 加密子样本尺寸表遵循与
/// 正向转换相同的修正与溢出规则 (3 字节起始码加宽为 4 字节长度前缀
/// 时总长增加).
pub fn convert_sample_to_avcc(sample: &mut EncodedSample) -> LiuResult<()> {
    if !is_annex_b(sample) {
        return Err(LiuError::MalformedSample(
            "样本不以 4 字节起始码开头, 不是 Annex B 封装".into(),
        ));
    }

    let mut out = ByteWriter::with_capacity(sample.data.len() + 16);
    for (start, end) in split_start_code_units(&sample.data) {
        let payload = &sample.data[start..end];
        out.write_u32(payload.len() as u32);
        out.write_bytes(payload);
    }

    commit(sample, out.finish())
}

/// 校验并提交转换结果: 先算好修正后的明文段长度, 全部通过才写回样本
fn commit(sample: &mut EncodedSample, converted: Vec<u8>) -> LiuResult<()> {
    let adjusted = adjusted_first_plain_size(
        sample.crypto.as_ref(),
        sample.data.len(),
        converted.len(),
    )?;
    if let Some(plain0) = adjusted {
        if let Some(crypto) = sample.crypto.as_mut() {
            crypto.plain_sizes[0] = plain0;
        }
    }
    sample.data = Bytes::from(converted);
    Ok(())
}

/// 计算转换后的首个明文段长度
///
/// 起始码替换与参数集注入引入的字节都落在首个密文边界之前的明文区,
/// 因此只有首个明文段需要修正, 修正量即缓冲区总长度的变化量.
/// 字段在容器层来源于 16 位字段, 但转换增长后合法地超过 65535,
/// 存储宽度为 32 位; 运算在 64 位带符号宽度上进行以避免回绕,
/// 结果超出 32 位表示范围时报 [`LiuError::Overflow`].
fn adjusted_first_plain_size(
    crypto: Option<&CryptoInfo>,
    old_len: usize,
    new_len: usize,
) -> LiuResult<Option<u32>> {
    let Some(crypto) = crypto else {
        return Ok(None);
    };
    if crypto.plain_sizes.is_empty() {
        return Ok(None);
    }

    let delta = new_len as i64 - old_len as i64;
    let adjusted = i64::from(crypto.plain_sizes[0]) + delta;
    u32::try_from(adjusted).map(Some).map_err(|_| {
        LiuError::Overflow(format!(
            "明文段长度 {} 超出 32 位存储范围 (增量 {})",
            adjusted, delta
        ))
    })
}

/// 把 Annex B 数据切分为 NALU 载荷区间 (不含起始码), 保持出现顺序
///
/// 同时识别 3 字节 (00 00 01) 与 4 字节 (00 00 00 01) 起始码;
/// 相邻起始码之间的空载荷跳过.
fn split_start_code_units(data: &[u8]) -> Vec<(usize, usize)> {
    let mut units = Vec::new();
    let mut starts = Vec::new();

    let mut i = 0;
    while i + 2 < data.len() {
        if data[i] == 0x00 && data[i + 1] == 0x00 {
            if data[i + 2] == 0x01 {
                starts.push((i, i + 3));
                i += 3;
                continue;
            }
            if i + 3 < data.len() && data[i + 2] == 0x00 && data[i + 3] == 0x01 {
                starts.push((i, i + 4));
                i += 4;
                continue;
            }
        }
        i += 1;
    }

    for (index, &(_, payload_start)) in starts.iter().enumerate() {
        let payload_end = if index + 1 < starts.len() {
            starts[index + 1].0
        } else {
            data.len()
        };
        if payload_end > payload_start {
            units.push((payload_start, payload_end));
        }
    }

    units
}
