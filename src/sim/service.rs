//! SF 目录
//!
//! YAML 形式的服务功能（SF）与服务功能链（SFC）定义。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceFunction {
    /// 处理时延均值（毫秒）
    #[serde(default)]
    pub processing_delay_mean: f64,
    #[serde(default)]
    pub processing_delay_stdev: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceCatalogue {
    /// SFC id -> 依次经过的 SF
    pub sfc_list: BTreeMap<String, Vec<String>>,
    pub sf_list: BTreeMap<String, ServiceFunction>,
}

impl ServiceCatalogue {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(Error::io(path))?;
        let catalogue: ServiceCatalogue =
            serde_yaml::from_str(&raw).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// SFC 中引用的每个 SF 都必须在 `sf_list` 中定义
    pub fn validate(&self) -> Result<()> {
        for (sfc, chain) in &self.sfc_list {
            if chain.is_empty() {
                return Err(Error::InvalidServices(format!("sfc {sfc} is empty")));
            }
            if let Some(missing) = chain.iter().find(|sf| !self.sf_list.contains_key(*sf)) {
                return Err(Error::InvalidServices(format!(
                    "sfc {sfc} references undefined sf {missing}"
                )));
            }
        }
        for (id, sf) in &self.sf_list {
            if !sf.processing_delay_mean.is_finite()
                || sf.processing_delay_mean < 0.0
                || !sf.processing_delay_stdev.is_finite()
                || sf.processing_delay_stdev < 0.0
            {
                return Err(Error::InvalidServices(format!(
                    "sf {id} has a negative or non-finite processing delay"
                )));
            }
        }
        Ok(())
    }
}
