//! 有界字节读取器.
//!
//! 提供从字节缓冲区按大端字节序读取定宽整数的能力, 是 avcC/hvcC 等
//! 二进制配置记录解析器与封装转换器的基础设施.
//!
//! 任何会越过缓冲区末尾的读取都返回 [`LiuError::InsufficientData`]
//! 且不读取任何字节; 读取失败后游标状态不再可靠, 不应继续使用.

use crate::{LiuError, LiuResult};

/// 有界字节读取器
///
/// 在字节缓冲区上维护一个读取游标, 多字节整数一律按大端字节序读取.
///
/// # 示例
/// ```
/// use liu_core::ByteReader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut br = ByteReader::new(&data);
/// assert_eq!(br.read_u8().unwrap(), 0x01);
/// assert_eq!(br.read_u16().unwrap(), 0x0203);
/// assert!(br.read_u8().is_err());
/// ```
pub struct ByteReader<'a> {
    /// 源数据
    data: &'a [u8],
    /// 当前读取位置
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// 创建新的字节读取器
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// 当前游标位置 (已读取的字节数)
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 剩余可读字节数
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// 是否已读到末尾
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// 取出 n 字节并推进游标, 不足时整体失败
    fn take(&mut self, n: usize) -> LiuResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(LiuError::InsufficientData(format!(
                "需要 {} 字节, 剩余 {} 字节, offset={}",
                n,
                self.remaining(),
                self.pos
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// 跳过 n 字节
    pub fn skip(&mut self, n: usize) -> LiuResult<()> {
        self.take(n).map(|_| ())
    }

    /// 读取 n 字节切片 (零拷贝视图)
    pub fn read_slice(&mut self, n: usize) -> LiuResult<&'a [u8]> {
        self.take(n)
    }

    /// 读取 8 位整数
    pub fn read_u8(&mut self) -> LiuResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// 读取 16 位大端整数
    pub fn read_u16(&mut self) -> LiuResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from(b[0]) << 8 | u16::from(b[1]))
    }

    /// 读取 24 位大端整数
    pub fn read_u24(&mut self) -> LiuResult<u32> {
        let b = self.take(3)?;
        Ok(u32::from(b[0]) << 16 | u32::from(b[1]) << 8 | u32::from(b[2]))
    }

    /// 读取 32 位大端整数
    pub fn read_u32(&mut self) -> LiuResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from(b[0]) << 24 | u32::from(b[1]) << 16 | u32::from(b[2]) << 8 | u32::from(b[3]))
    }

    /// 读取 48 位大端整数
    ///
    /// 没有原生 48 位整数类型, 由 16 位高位部分与 32 位低位部分拼接.
    /// 首个传输字节落在结果 48 位中的最高字节位置.
    pub fn read_u48(&mut self) -> LiuResult<u64> {
        let high = self.read_u16()?;
        let low = self.read_u32()?;
        Ok(u64::from(high) << 32 | u64::from(low))
    }

    /// 读取 64 位大端整数
    pub fn read_u64(&mut self) -> LiuResult<u64> {
        let high = self.read_u32()?;
        let low = self.read_u32()?;
        Ok(u64::from(high) << 32 | u64::from(low))
    }

    /// 按指定字节宽度 (1-8) 读取大端整数
    ///
    /// 用于宽度由数据自身描述的字段, 如 NAL 长度前缀.
    pub fn read_uint(&mut self, n: usize) -> LiuResult<u64> {
        if !(1..=8).contains(&n) {
            return Err(LiuError::InvalidArgument(format!(
                "read_uint: 字节宽度 {} 不在 1-8 范围内",
                n
            )));
        }
        let b = self.take(n)?;
        let mut value: u64 = 0;
        for &byte in b {
            value = value << 8 | u64::from(byte);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width_be() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        let mut br = ByteReader::new(&data);
        assert_eq!(br.read_u8().unwrap(), 0x01);
        assert_eq!(br.read_u16().unwrap(), 0x0203);
        assert_eq!(br.read_u24().unwrap(), 0x040506);
        assert_eq!(br.read_u32().unwrap(), 0x0708090A);
        assert!(br.is_empty());
    }

    #[test]
    fn test_read_u48_msb_first() {
        // 首个传输字节应落在 48 位的最高字节
        let data = [0x90, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut br = ByteReader::new(&data);
        assert_eq!(br.read_u48().unwrap(), 0x9000_0000_0000);

        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut br = ByteReader::new(&data);
        assert_eq!(br.read_u48().unwrap(), 0x0102_0304_0506);
    }

    #[test]
    fn test_read_u64() {
        let data = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut br = ByteReader::new(&data);
        assert_eq!(br.read_u64().unwrap(), 0xFF00_0000_0000_0001);
    }

    #[test]
    fn test_read_uint_variable_width() {
        let data = [0x00, 0x00, 0x01, 0x00];
        let mut br = ByteReader::new(&data);
        assert_eq!(br.read_uint(3).unwrap(), 1);
        assert_eq!(br.read_uint(1).unwrap(), 0);

        let mut br = ByteReader::new(&data);
        assert!(br.read_uint(0).is_err(), "宽度 0 应返回无效参数错误");
        assert!(br.read_uint(9).is_err(), "宽度 9 应返回无效参数错误");
    }

    #[test]
    fn test_short_read_fails_without_advancing_past_end() {
        let data = [0x01, 0x02];
        let mut br = ByteReader::new(&data);
        let err = br.read_u32().expect_err("4 字节读取应失败");
        assert!(matches!(err, LiuError::InsufficientData(_)));

        // 空缓冲区上连第一个字节都读不到
        let mut br = ByteReader::new(&[]);
        assert!(matches!(
            br.read_u8(),
            Err(LiuError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_position_and_slice() {
        let data = [0xAA, 0xBB, 0xCC, 0xDD];
        let mut br = ByteReader::new(&data);
        br.skip(1).unwrap();
        assert_eq!(br.position(), 1);
        assert_eq!(br.read_slice(2).unwrap(), &[0xBB, 0xCC]);
        assert_eq!(br.remaining(), 1);
        assert!(br.read_slice(2).is_err());
    }
}
