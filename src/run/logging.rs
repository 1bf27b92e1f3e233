//! 日志初始化

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// 未设置 `RUST_LOG` 时的过滤规则：仿真器内部只输出 WARN 及以上
pub const DEFAULT_LOG_FILTER: &str = "info,sfcsim_rs::sim=warn";

/// 将 tracing 输出写入运行日志文件。每个进程只能调用一次。
pub fn init_logging(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    let file = File::create(log_file).map_err(Error::io(log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
