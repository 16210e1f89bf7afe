//! Liu 性能基准测试.
//!
//! 覆盖配置记录解析与封装格式转换两条核心路径.

use bytes::Bytes;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use liu::codec::annexb::{convert_sample_to_annex_b, convert_sample_to_avcc};
use liu::codec::{AvccConfig, CodecId, EncodedSample, HvccConfig};

/// 构造含 `nalu_count` 个 NALU 的 AVCC 样本, 每个载荷 `payload_len` 字节
fn make_avcc_sample(nalu_count: usize, payload_len: usize) -> EncodedSample {
    let mut data = Vec::with_capacity(nalu_count * (4 + payload_len));
    for i in 0..nalu_count {
        data.extend_from_slice(&(payload_len as u32).to_be_bytes());
        data.push(if i == 0 { 0x65 } else { 0x41 });
        data.extend(std::iter::repeat((i % 256) as u8).take(payload_len - 1));
    }

    let sps = Bytes::from_static(&[0x67, 0x42, 0xC0, 0x28, 0xAB, 0xCD]);
    let pps = Bytes::from_static(&[0x68, 0xCE, 0x38, 0x80]);
    let extra =
        AvccConfig::build(std::slice::from_ref(&sps), std::slice::from_ref(&pps), 4).unwrap();

    let mut sample = EncodedSample::new(CodecId::H264, data);
    sample.extra_data = Some(extra);
    sample.is_keyframe = true;
    sample
}

/// 构造带三个参数集数组的 hvcC 记录
fn make_hvcc_record() -> Bytes {
    let mut record = vec![
        1, 1, 0x60, 0, 0, 0, 0x90, 0, 0, 0, 0, 0, 0x5A, 0, 0, 0, 1, 0, 0, 0, 0, 0x0F, 3,
    ];
    record.extend_from_slice(&[0x20, 0, 1, 0, 3, 0x40, 0x01, 0x0C]);
    record.extend_from_slice(&[0x21, 0, 1, 0, 3, 0x42, 0x01, 0x01]);
    record.extend_from_slice(&[0x22, 0, 1, 0, 2, 0x44, 0x01]);
    Bytes::from(record)
}

fn bench_avcc_parse(c: &mut Criterion) {
    let sample = make_avcc_sample(1, 64);
    let record = sample.extra_data.unwrap();
    c.bench_function("avcc_parse", |b| {
        b.iter(|| AvccConfig::parse(black_box(&record)).unwrap());
    });
}

fn bench_hvcc_parse(c: &mut Criterion) {
    let record = make_hvcc_record();
    c.bench_function("hvcc_parse_3_nalus", |b| {
        b.iter(|| HvccConfig::parse(black_box(&record)).unwrap());
    });
}

fn bench_to_annexb(c: &mut Criterion) {
    c.bench_function("to_annexb_8x4096_with_injection", |b| {
        let template = make_avcc_sample(8, 4096);
        b.iter(|| {
            let mut sample = template.clone();
            convert_sample_to_annex_b(black_box(&mut sample), true).unwrap();
        });
    });
}

fn bench_to_avcc(c: &mut Criterion) {
    let mut template = make_avcc_sample(8, 4096);
    convert_sample_to_annex_b(&mut template, false).unwrap();
    c.bench_function("to_avcc_8x4096", |b| {
        b.iter(|| {
            let mut sample = template.clone();
            convert_sample_to_avcc(black_box(&mut sample)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_avcc_parse,
    bench_hvcc_parse,
    bench_to_annexb,
    bench_to_avcc
);
criterion_main!(benches);
