//! 仿真器接口
//!
//! 调度策略只通过 `init`/`apply` 与仿真器交互，不依赖其内部实现。

use std::collections::BTreeMap;

use super::action::SimulatorAction;
use super::service::ServiceFunction;
use super::stats::NetworkStats;
use crate::error::Result;
use crate::topo::NetworkSpec;

/// `init`/`apply` 返回的状态快照
#[derive(Debug, Clone)]
pub struct SimulatorState {
    pub network: NetworkSpec,
    pub service_functions: BTreeMap<String, ServiceFunction>,
    /// SFC id -> 依次经过的 SF
    pub sfcs: BTreeMap<String, Vec<String>>,
    pub network_stats: NetworkStats,
}

impl SimulatorState {
    /// 节点 id，保持仿真器报告的顺序
    pub fn node_ids(&self) -> Vec<String> {
        self.network.node_ids()
    }

    pub fn sf_ids(&self) -> Vec<String> {
        self.service_functions.keys().cloned().collect()
    }

    pub fn sfc_ids(&self) -> Vec<String> {
        self.sfcs.keys().cloned().collect()
    }
}

/// SFC 协调仿真器
pub trait SimulatorInterface {
    /// 以给定种子初始化仿真器，返回初始状态
    fn init(&mut self, seed: u64) -> Result<SimulatorState>;

    /// 执行一次动作，返回更新后的状态
    fn apply(&mut self, action: &SimulatorAction) -> Result<SimulatorState>;

    /// 仿真器加载的网络拓扑
    fn network(&self) -> &NetworkSpec;
}
