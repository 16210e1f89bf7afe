//! 大端字节写入器.
//!
//! 向可增长的输出缓冲区按大端字节序追加定宽整数, 与 ByteReader 对应.
//! 写入本身不会失败 (内存耗尽视为致命错误, 不作为可恢复错误建模),
//! 因此接口不返回 Result.

/// 大端字节写入器
///
/// # 示例
/// ```
/// use liu_core::ByteWriter;
///
/// let mut bw = ByteWriter::new();
/// bw.write_u16(0x0102);
/// bw.write_u8(0x03);
/// assert_eq!(bw.finish(), vec![0x01, 0x02, 0x03]);
/// ```
#[derive(Default)]
pub struct ByteWriter {
    /// 输出缓冲区
    data: Vec<u8>,
}

impl ByteWriter {
    /// 创建新的字节写入器
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// 以指定容量创建字节写入器
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// 已写入的字节数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否尚未写入任何字节
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 写入 8 位整数
    pub fn write_u8(&mut self, v: u8) {
        self.data.push(v);
    }

    /// 写入 16 位大端整数
    pub fn write_u16(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    /// 写入 24 位大端整数 (值的低 24 位)
    pub fn write_u24(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_be_bytes()[1..]);
    }

    /// 写入 32 位大端整数
    pub fn write_u32(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    /// 写入 48 位大端整数 (值的低 48 位)
    pub fn write_u48(&mut self, v: u64) {
        self.data.extend_from_slice(&v.to_be_bytes()[2..]);
    }

    /// 写入 64 位大端整数
    pub fn write_u64(&mut self, v: u64) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    /// 写入字节切片
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// 结束写入, 取出缓冲区
    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fixed_width_be() {
        let mut bw = ByteWriter::new();
        bw.write_u8(0x01);
        bw.write_u16(0x0203);
        bw.write_u24(0x040506);
        bw.write_u32(0x0708090A);
        assert_eq!(
            bw.finish(),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]
        );
    }

    #[test]
    fn test_write_u48_u64() {
        let mut bw = ByteWriter::new();
        bw.write_u48(0x9000_0000_0000);
        bw.write_u64(0x0102_0304_0506_0708);
        let data = bw.finish();
        assert_eq!(&data[..6], &[0x90, 0, 0, 0, 0, 0]);
        assert_eq!(
            &data[6..],
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn test_roundtrip_with_reader() {
        let mut bw = ByteWriter::with_capacity(16);
        bw.write_u32(0xDEAD_BEEF);
        bw.write_u16(0xCAFE);
        bw.write_bytes(&[0x11, 0x22]);
        let data = bw.finish();

        let mut br = crate::ByteReader::new(&data);
        assert_eq!(br.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(br.read_u16().unwrap(), 0xCAFE);
        assert_eq!(br.read_slice(2).unwrap(), &[0x11, 0x22]);
    }
}
