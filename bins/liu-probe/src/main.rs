//! liu-probe - 解码器配置记录探测工具
//!
//! 读取包含原始 avcC/hvcC box 内容的文件, 解析并打印配置记录的
//! 结构化信息, 用于排查容器元数据问题.

use bytes::Bytes;
use clap::Parser;
use serde::Serialize;
use std::process;

use liu_codec::parsers::h264::{AvccConfig, NalUnitType};
use liu_codec::parsers::h265::HvccConfig;
use liu_codec::CodecId;

/// Liu 解码器配置记录探测工具
#[derive(Parser, Debug)]
#[command(name = "liu-probe", version, about = "纯 Rust 解码器配置记录探测工具")]
struct Cli {
    /// 输入文件路径 (原始 avcC 或 hvcC box 内容)
    input: String,

    /// 编解码器 (h264/avc 或 h265/hevc)
    #[arg(short, long)]
    codec: String,

    /// 输出 JSON 格式
    #[arg(long)]
    json: bool,

    /// 静默模式 (只输出探测结果)
    #[arg(short, long)]
    quiet: bool,
}

// ============================================================
// JSON 输出结构体
// ============================================================

/// avcC 探测结果
#[derive(Serialize)]
struct AvccInfo {
    configuration_version: u8,
    profile_indication: u8,
    profile_compatibility: u8,
    level_indication: u8,
    nalu_length_size: u8,
    num_sps: u8,
    num_pps: u8,
    parameter_sets: Vec<AvccNaluInfo>,
}

/// avcC 中单个参数集 NALU 的信息
#[derive(Serialize)]
struct AvccNaluInfo {
    nal_type: String,
    length: usize,
}

impl AvccNaluInfo {
    /// 类型取自载荷首字节的低 5 位, 空载荷归为 Unknown(0)
    fn from_payload(payload: &Bytes) -> Self {
        let type_id = payload.first().map_or(0, |b| b & 0x1F);
        Self {
            nal_type: NalUnitType::from_type_id(type_id).to_string(),
            length: payload.len(),
        }
    }
}

/// hvcC 探测结果
#[derive(Serialize)]
struct HvccInfo {
    configuration_version: u8,
    general_profile_space: u8,
    general_tier_flag: bool,
    general_profile_idc: u8,
    general_profile_compatibility_flags: u32,
    general_constraint_indicator_flags: u64,
    general_level_idc: u8,
    min_spatial_segmentation_idc: u16,
    parallelism_type: u8,
    chroma_format_idc: u8,
    bit_depth_luma_minus8: u8,
    bit_depth_chroma_minus8: u8,
    avg_frame_rate: u16,
    constant_frame_rate: u8,
    num_temporal_layers: u8,
    temporal_id_nested: bool,
    nalu_length_size: u8,
    nalus: Vec<HvccNaluInfo>,
}

/// hvcC 中单个 NALU 的信息
#[derive(Serialize)]
struct HvccNaluInfo {
    nal_type: String,
    layer_id: u8,
    temporal_id_plus1: u8,
    length: usize,
}

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let Some(codec_id) = CodecId::from_name(&cli.codec) else {
        eprintln!("不支持的编解码器: {}", cli.codec);
        process::exit(1);
    };

    let data = match std::fs::read(&cli.input) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            eprintln!("读取文件失败: {}: {}", cli.input, e);
            process::exit(1);
        }
    };
    tracing::debug!("读入 {} 字节, codec={}", data.len(), codec_id);

    let result = match codec_id {
        CodecId::H264 => probe_avcc(&data, cli.json),
        CodecId::H265 => probe_hvcc(&data, cli.json),
        _ => unreachable!("from_name 只会返回 H264/H265"),
    };

    if let Err(e) = result {
        eprintln!("解析失败: {}", e);
        process::exit(1);
    }
}

fn probe_avcc(data: &Bytes, json: bool) -> liu_core::LiuResult<()> {
    let config = AvccConfig::parse(data)?;
    let info = AvccInfo {
        configuration_version: config.configuration_version,
        profile_indication: config.profile_indication,
        profile_compatibility: config.profile_compatibility,
        level_indication: config.level_indication,
        nalu_length_size: config.nalu_length_size,
        num_sps: config.num_sps(),
        num_pps: config.num_pps(),
        parameter_sets: config
            .sps_list
            .iter()
            .chain(config.pps_list.iter())
            .map(AvccNaluInfo::from_payload)
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info).unwrap_or_default());
    } else {
        println!("avcC 配置记录:");
        println!("  profile:          0x{:02X}", info.profile_indication);
        println!("  compat:           0x{:02X}", info.profile_compatibility);
        println!("  level:            {}", info.level_indication);
        println!("  NAL 长度前缀宽度: {}", info.nalu_length_size);
        println!("  SPS: {} 条, PPS: {} 条", info.num_sps, info.num_pps);
        for nalu in &info.parameter_sets {
            println!("    {} len={}", nalu.nal_type, nalu.length);
        }
    }
    Ok(())
}

fn probe_hvcc(data: &Bytes, json: bool) -> liu_core::LiuResult<()> {
    let config = HvccConfig::parse(data)?;
    let info = HvccInfo {
        configuration_version: config.configuration_version,
        general_profile_space: config.general_profile_space,
        general_tier_flag: config.general_tier_flag,
        general_profile_idc: config.general_profile_idc,
        general_profile_compatibility_flags: config.general_profile_compatibility_flags,
        general_constraint_indicator_flags: config.general_constraint_indicator_flags,
        general_level_idc: config.general_level_idc,
        min_spatial_segmentation_idc: config.min_spatial_segmentation_idc,
        parallelism_type: config.parallelism_type,
        chroma_format_idc: config.chroma_format_idc,
        bit_depth_luma_minus8: config.bit_depth_luma_minus8,
        bit_depth_chroma_minus8: config.bit_depth_chroma_minus8,
        avg_frame_rate: config.avg_frame_rate,
        constant_frame_rate: config.constant_frame_rate,
        num_temporal_layers: config.num_temporal_layers,
        temporal_id_nested: config.temporal_id_nested,
        nalu_length_size: config.nalu_length_size,
        nalus: config
            .nalus
            .iter()
            .map(|nalu| HvccNaluInfo {
                nal_type: nalu.nal_type.to_string(),
                layer_id: nalu.layer_id,
                temporal_id_plus1: nalu.temporal_id_plus1,
                length: nalu.payload.len(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info).unwrap_or_default());
    } else {
        println!("hvcC 配置记录:");
        println!(
            "  profile: space={} tier={} idc={}",
            info.general_profile_space, info.general_tier_flag, info.general_profile_idc
        );
        println!(
            "  compat:  0x{:08X}  constraint: 0x{:012X}",
            info.general_profile_compatibility_flags, info.general_constraint_indicator_flags
        );
        println!("  level:            {}", info.general_level_idc);
        println!("  NAL 长度前缀宽度: {}", info.nalu_length_size);
        println!("  NALU: {} 条", info.nalus.len());
        for nalu in &info.nalus {
            println!(
                "    {} layer={} tid+1={} len={}",
                nalu.nal_type, nalu.layer_id, nalu.temporal_id_plus1, nalu.length
            );
        }
    }
    Ok(())
}
