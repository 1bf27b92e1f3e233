//! 运行上下文
//!
//! 时间戳与种子在进程启动时确定一次，日志文件名与结果目录名都由它们派生。

use std::path::{Path, PathBuf};

use rand::Rng;

/// 运行时间戳格式（本地时间）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// 当前本地时间的运行时间戳
pub fn run_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 未指定种子时，从 [1, 9999] 中均匀抽取一个
pub fn resolve_seed<R: Rng>(seed: Option<u64>, rng: &mut R) -> u64 {
    match seed {
        Some(seed) => seed,
        None => rng.gen_range(1..=9999),
    }
}

#[derive(Debug, Clone)]
pub struct RunContext {
    pub network: PathBuf,
    pub service_functions: PathBuf,
    pub config: PathBuf,
    pub seed: u64,
    pub timestamp: String,
    /// `logs/` 与 `results/` 所在的根目录
    pub output_dir: PathBuf,
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl RunContext {
    /// `<output>/logs/<network 文件名>_<时间戳>_<种子>.log`
    pub fn log_file(&self) -> PathBuf {
        self.output_dir.join("logs").join(format!(
            "{}_{}_{}.log",
            basename(&self.network),
            self.timestamp,
            self.seed
        ))
    }

    /// `<output>/results/<network>/<sf>/<config>/<时间戳>_seed<种子>`
    pub fn results_dir(&self) -> PathBuf {
        self.output_dir
            .join("results")
            .join(stem(&self.network))
            .join(stem(&self.service_functions))
            .join(stem(&self.config))
            .join(format!("{}_seed{}", self.timestamp, self.seed))
    }
}
