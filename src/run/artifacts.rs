//! 结果目录产物
//!
//! 运行结束后把三个输入文件按原文件名复制到结果目录，并写出 `input.yaml`。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const INPUT_FILE_NAME: &str = "input.yaml";

/// `input.yaml` 内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub num_ingress: usize,
    pub algorithm: String,
}

/// 创建 `target_dir` 并复制输入文件，返回复制后的路径
pub fn copy_input_files(
    target_dir: &Path,
    network: &Path,
    service_functions: &Path,
    config: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target_dir).map_err(Error::io(target_dir))?;
    let mut copied = Vec::with_capacity(3);
    for src in [network, service_functions, config] {
        let Some(name) = src.file_name() else {
            return Err(Error::Io {
                path: src.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            });
        };
        let dst = target_dir.join(name);
        fs::copy(src, &dst).map_err(Error::io(src))?;
        debug!(src = %src.display(), dst = %dst.display(), "输入文件已复制");
        copied.push(dst);
    }
    Ok(copied)
}

/// 写出 `input.yaml`（ingress 节点数与策略名）
pub fn create_input_file(target_dir: &Path, num_ingress: usize, algorithm: &str) -> Result<PathBuf> {
    fs::create_dir_all(target_dir).map_err(Error::io(target_dir))?;
    let path = target_dir.join(INPUT_FILE_NAME);
    let descriptor = InputDescriptor {
        num_ingress,
        algorithm: algorithm.to_string(),
    };
    let raw = serde_yaml::to_string(&descriptor).map_err(|source| Error::Yaml {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, raw).map_err(Error::io(&path))?;
    Ok(path)
}
