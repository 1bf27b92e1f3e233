//! 错误类型
//!
//! 定义资源加载、调度构建与仿真器调用过程中的错误。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse JSON resource {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to parse YAML resource {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("cannot build a distribution over zero destinations")]
    EmptyDistribution,
    #[error("invalid scheduling weights: {0}")]
    InvalidWeights(String),
    #[error("invalid network: {0}")]
    InvalidNetwork(String),
    #[error("invalid service functions: {0}")]
    InvalidServices(String),
    #[error("invalid simulator config: {0}")]
    InvalidConfig(String),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("simulator used before init()")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 为 IO 错误附加路径
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
