//! # liu-core
//!
//! Liu 码流处理框架核心库, 提供统一错误类型与有界字节游标.
//!
//! 本 crate 为上层解析器提供底层基础设施: 所有二进制配置记录
//! (avcC/hvcC) 与封装格式转换器都建立在这里的读写原语之上.

pub mod bytereader;
pub mod bytewriter;
pub mod error;

// 重导出常用类型
pub use bytereader::ByteReader;
pub use bytewriter::ByteWriter;
pub use error::{LiuError, LiuResult};
