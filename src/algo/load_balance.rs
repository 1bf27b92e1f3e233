//! LoadBalance 基线策略
//!
//! 每个 SF 放置在每个节点上；每个节点把每个 (SFC, SF) 的流量均匀分给所有节点。
//! 放置与调度只在初始化后计算一次，之后每次 `apply` 提交同一个动作。

use std::collections::BTreeMap;

use tracing::debug;

use super::normalize::normalize_scheduling_probabilities;
use crate::error::{Error, Result};
use crate::sim::{Placement, Schedule, SimulatorAction, SimulatorState};

/// 写入结果目录 `input.yaml` 的策略名
pub const ALGORITHM_NAME: &str = "LoadBalance";

/// 每个节点都放置完整的 SF 列表
pub fn get_placement(nodes: &[String], sfs: &[String]) -> Placement {
    nodes
        .iter()
        .map(|node| (node.clone(), sfs.to_vec()))
        .collect()
}

/// 为每个 (源节点, SFC, SF) 构建目的节点上的均匀分布。
///
/// 只要存在需要调度的 (SFC, SF)，`nodes` 为空就返回 [`Error::EmptyDistribution`]。
pub fn get_schedule(nodes: &[String], sfs: &[String], sfcs: &[String]) -> Result<Schedule> {
    if nodes.is_empty() && !sfs.is_empty() && !sfcs.is_empty() {
        return Err(Error::EmptyDistribution);
    }

    let mut schedule = Schedule::new();
    for outer in nodes {
        let mut per_sfc = BTreeMap::new();
        for sfc in sfcs {
            let mut per_sf = BTreeMap::new();
            for sf in sfs {
                let probs = normalize_scheduling_probabilities(&vec![0.0; nodes.len()])?;
                let dist: BTreeMap<String, f64> = nodes.iter().cloned().zip(probs).collect();
                per_sf.insert(sf.clone(), dist);
            }
            per_sfc.insert(sfc.clone(), per_sf);
        }
        schedule.insert(outer.clone(), per_sfc);
    }
    Ok(schedule)
}

/// 从仿真器初始状态推导出的 LoadBalance 策略
#[derive(Debug, Clone)]
pub struct LoadBalance {
    pub nodes: Vec<String>,
    pub sfs: Vec<String>,
    pub sfcs: Vec<String>,
}

impl LoadBalance {
    pub fn from_state(state: &SimulatorState) -> Self {
        Self {
            nodes: state.node_ids(),
            sfs: state.sf_ids(),
            sfcs: state.sfc_ids(),
        }
    }

    /// 构建固定动作
    pub fn action(&self) -> Result<SimulatorAction> {
        let placement = get_placement(&self.nodes, &self.sfs);
        let schedule = get_schedule(&self.nodes, &self.sfs, &self.sfcs)?;
        debug!(
            placement_entries = placement.len(),
            leaf_distributions = self.nodes.len() * self.sfcs.len() * self.sfs.len(),
            "LoadBalance 动作已构建"
        );
        Ok(SimulatorAction::new(placement, schedule))
    }
}
