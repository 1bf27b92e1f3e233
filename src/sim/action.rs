//! 仿真动作
//!
//! 一次 `apply` 提交的放置（placement）与调度（schedule）。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 节点 id -> 放置在该节点上的 SF 列表
pub type Placement = BTreeMap<String, Vec<String>>;

/// 源节点 -> SFC -> SF -> 目的节点 -> 概率
///
/// 对每个 (源节点, SFC, SF)，目的节点的概率之和为 1，且每个目的节点都有条目（可以为 0）。
pub type Schedule = BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorAction {
    pub placement: Placement,
    pub schedule: Schedule,
}

impl SimulatorAction {
    pub fn new(placement: Placement, schedule: Schedule) -> Self {
        Self {
            placement,
            schedule,
        }
    }

    /// 查询某个 (源节点, SFC, SF) 的目的节点分布
    pub fn distribution(&self, node: &str, sfc: &str, sf: &str) -> Option<&BTreeMap<String, f64>> {
        self.schedule.get(node)?.get(sfc)?.get(sf)
    }

    /// SF 是否放置在该节点上
    pub fn is_placed(&self, node: &str, sf: &str) -> bool {
        self.placement
            .get(node)
            .is_some_and(|sfs| sfs.iter().any(|s| s == sf))
    }
}
