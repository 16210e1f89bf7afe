//! 统一错误类型定义.
//!
//! 所有 Liu crate 共用的错误类型, 支持跨模块传播.
//!
//! 这里的每个错误都是对畸形/截断输入的正常预期结果 (例如网络传输中断
//! 导致的半截配置记录), 不存在进程级致命错误. 同一输入重试必然得到
//! 同一结果, 调用方应丢弃出错样本并继续处理后续数据.

use thiserror::Error;

/// Liu 框架统一错误类型
#[derive(Debug, Error)]
pub enum LiuError {
    /// 无效参数 (调用方违反接口约定)
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 配置记录版本不支持 (格式带版本号, 仅定义了 version=1)
    #[error("配置记录版本不支持: version={0}")]
    VersionMismatch(u8),

    /// 数据不足 (任意嵌套层级上, 字段或声明的计数超出缓冲区)
    #[error("数据不足: {0}")]
    InsufficientData(String),

    /// 样本数据损坏 (NAL 长度前缀越界、封装格式不符等)
    #[error("样本数据损坏: {0}")]
    MalformedSample(String),

    /// 样本缺少解码器配置记录, 无法确定封装参数
    #[error("样本缺少解码器配置记录")]
    MissingConfiguration,

    /// 子样本尺寸运算超出存储宽度
    #[error("子样本尺寸溢出: {0}")]
    Overflow(String),
}

/// Liu 框架统一 Result 类型
pub type LiuResult<T> = Result<T, LiuError>;
