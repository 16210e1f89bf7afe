//! 日志初始化.
//!
//! 面向使用本库的可执行程序, 提供基于 tracing 的控制台日志输出.
//! 级别过滤支持 `RUST_LOG` 风格的指令串, 环境变量优先于传入参数.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

/// 初始化控制台日志
///
/// `default_level` 形如 `"info"` 或 `"liu_codec=debug"`, 仅在
/// `RUST_LOG` 未设置时生效. 重复初始化返回错误.
///
/// # 示例
/// ```rust,no_run
/// liu::logging::init("info").unwrap();
/// tracing::info!("Liu {}", liu::version());
/// ```
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("日志级别指令串无效: {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("日志系统初始化失败: {e}"))?;

    Ok(())
}
