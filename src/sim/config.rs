//! 仿真器配置
//!
//! YAML 形式的流量生成参数，所有字段均有缺省值。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 单个 ingress 节点每个 run 的期望流数上限（`run_duration / inter_arrival_mean`）
pub const MAX_ARRIVALS_PER_RUN: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    /// 每个 ingress 节点的流到达间隔均值（毫秒）
    #[serde(default = "default_inter_arrival_mean")]
    pub inter_arrival_mean: f64,
    /// 为 true 时到达间隔恒定，否则服从指数分布
    #[serde(default = "default_true")]
    pub deterministic_arrival: bool,
    /// 流数据速率均值，按此消耗节点容量
    #[serde(default = "default_flow_dr_mean")]
    pub flow_dr_mean: f64,
    #[serde(default)]
    pub flow_dr_stdev: f64,
    /// 每次 apply 仿真的时长（毫秒）
    #[serde(default = "default_run_duration")]
    pub run_duration: f64,
}

fn default_inter_arrival_mean() -> f64 {
    10.0
}

fn default_true() -> bool {
    true
}

fn default_flow_dr_mean() -> f64 {
    1.0
}

fn default_run_duration() -> f64 {
    100.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            inter_arrival_mean: default_inter_arrival_mean(),
            deterministic_arrival: true,
            flow_dr_mean: default_flow_dr_mean(),
            flow_dr_stdev: 0.0,
            run_duration: default_run_duration(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(Error::io(path))?;
        let config: SimConfig = serde_yaml::from_str(&raw).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.inter_arrival_mean.is_finite() && self.inter_arrival_mean > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "inter_arrival_mean must be positive, got {}",
                self.inter_arrival_mean
            )));
        }
        if !(self.run_duration.is_finite() && self.run_duration > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "run_duration must be positive, got {}",
                self.run_duration
            )));
        }
        let expected = self.run_duration / self.inter_arrival_mean;
        if !expected.is_finite() || expected > MAX_ARRIVALS_PER_RUN as f64 {
            return Err(Error::InvalidConfig(format!(
                "run_duration / inter_arrival_mean = {expected} exceeds {MAX_ARRIVALS_PER_RUN} flows per ingress"
            )));
        }
        if !(self.flow_dr_mean.is_finite() && self.flow_dr_mean >= 0.0)
            || !(self.flow_dr_stdev.is_finite() && self.flow_dr_stdev >= 0.0)
        {
            return Err(Error::InvalidConfig(
                "flow data rate mean/stdev must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
