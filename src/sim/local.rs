//! 本地流级仿真器
//!
//! 每次 `apply` 仿真一个 `run_duration` 时长的 run：各 ingress 节点按到达间隔产生流，
//! 流按 SFC 依次经过各 SF，每一跳按当前节点的调度分布选择处理节点。
//! 节点容量按流数据速率消耗，每个 run 开始时重置。

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::action::SimulatorAction;
use super::config::{MAX_ARRIVALS_PER_RUN, SimConfig};
use super::interface::{SimulatorInterface, SimulatorState};
use super::service::ServiceCatalogue;
use super::stats::NetworkStats;
use crate::error::{Error, Result};
use crate::topo::{DelayTable, NetworkSpec};

const PROB_TOLERANCE: f64 = 1e-6;

/// 指数到达间隔的随机波动可能超过期望流数，按期望上限的 4 倍截断
const MAX_ARRIVALS_PER_INGRESS: usize = 4 * MAX_ARRIVALS_PER_RUN;

/// 按到达时间排序的流到达事件
struct Arrival {
    at: f64,
    seq: u64,
    ingress: usize,
}

impl PartialEq for Arrival {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Arrival {}

impl PartialOrd for Arrival {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Arrival {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap 为最大堆，反转得到最早到达者优先；同一时刻按 seq 保证稳定
        other
            .at
            .total_cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct LocalSimulator {
    network: NetworkSpec,
    services: ServiceCatalogue,
    config: SimConfig,
    delays: DelayTable,
    rng: Option<StdRng>,
    stats: NetworkStats,
    runs: u64,
}

impl LocalSimulator {
    /// 加载拓扑（JSON）、SF 目录（YAML）与仿真配置（YAML）
    pub fn new(network_path: &Path, service_path: &Path, config_path: &Path) -> Result<Self> {
        let network = NetworkSpec::load(network_path)?;
        let services = ServiceCatalogue::load(service_path)?;
        let config = SimConfig::load(config_path)?;
        Self::from_parts(network, services, config)
    }

    /// 由已解析的三类资源构建仿真器，三者均先经过校验
    pub fn from_parts(
        network: NetworkSpec,
        services: ServiceCatalogue,
        config: SimConfig,
    ) -> Result<Self> {
        network.validate()?;
        services.validate()?;
        config.validate()?;
        let delays = DelayTable::build(&network);
        Ok(Self {
            network,
            services,
            config,
            delays,
            rng: None,
            stats: NetworkStats::default(),
            runs: 0,
        })
    }

    /// 已执行的 run 数
    pub fn runs(&self) -> u64 {
        self.runs
    }

    fn state(&self) -> SimulatorState {
        SimulatorState {
            network: self.network.clone(),
            service_functions: self.services.sf_list.clone(),
            sfcs: self.services.sfc_list.clone(),
            network_stats: self.stats.clone(),
        }
    }

    fn validate_action(&self, action: &SimulatorAction) -> Result<()> {
        let known_node = |id: &str| self.network.node_index(id).is_some();
        for (node, sfs) in &action.placement {
            if !known_node(node) {
                return Err(Error::InvalidAction(format!("placement on unknown node {node}")));
            }
            if let Some(sf) = sfs.iter().find(|sf| !self.services.sf_list.contains_key(*sf)) {
                return Err(Error::InvalidAction(format!(
                    "unknown sf {sf} placed on node {node}"
                )));
            }
        }
        for (node, per_sfc) in &action.schedule {
            if !known_node(node) {
                return Err(Error::InvalidAction(format!("schedule for unknown node {node}")));
            }
            for (sfc, per_sf) in per_sfc {
                if !self.services.sfc_list.contains_key(sfc) {
                    return Err(Error::InvalidAction(format!("schedule for unknown sfc {sfc}")));
                }
                for (sf, dist) in per_sf {
                    if !self.services.sf_list.contains_key(sf) {
                        return Err(Error::InvalidAction(format!(
                            "schedule for unknown sf {sf}"
                        )));
                    }
                    let mut sum = 0.0;
                    for (dst, p) in dist {
                        if !known_node(dst) {
                            return Err(Error::InvalidAction(format!(
                                "schedule {node}/{sfc}/{sf} targets unknown node {dst}"
                            )));
                        }
                        if !(0.0..=1.0).contains(p) {
                            return Err(Error::InvalidAction(format!(
                                "schedule {node}/{sfc}/{sf} has probability {p} for {dst}"
                            )));
                        }
                        sum += p;
                    }
                    if (sum - 1.0).abs() > PROB_TOLERANCE {
                        return Err(Error::InvalidAction(format!(
                            "schedule {node}/{sfc}/{sf} sums to {sum}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// 在 [mean - stdev, mean + stdev] 内均匀抖动，截断到非负
    fn jitter(rng: &mut StdRng, mean: f64, stdev: f64) -> f64 {
        if stdev == 0.0 {
            return mean;
        }
        rng.gen_range(mean - stdev..=mean + stdev).max(0.0)
    }

    fn inter_arrival(&self, rng: &mut StdRng) -> f64 {
        if self.config.deterministic_arrival {
            self.config.inter_arrival_mean
        } else {
            let u: f64 = rng.gen_range(0.0..1.0);
            -self.config.inter_arrival_mean * (1.0 - u).ln()
        }
    }

    fn sample_destination<'a>(rng: &mut StdRng, dist: &'a BTreeMap<String, f64>) -> Option<&'a str> {
        let u: f64 = rng.gen_range(0.0..1.0);
        let mut acc = 0.0;
        let mut last = None;
        for (dst, p) in dist {
            if *p <= 0.0 {
                continue;
            }
            acc += p;
            last = Some(dst.as_str());
            if u < acc {
                return last;
            }
        }
        // 舍入误差导致 u 落在累计和之外时取最后一个正概率目的节点
        last
    }

    /// 仿真一条流，返回成功时的端到端时延
    fn route_flow(
        &self,
        rng: &mut StdRng,
        action: &SimulatorAction,
        ingress: usize,
        load: &mut [f64],
    ) -> Option<f64> {
        let pick = rng.gen_range(0..self.services.sfc_list.len());
        let (sfc, chain) = self.services.sfc_list.iter().nth(pick)?;
        let dr = Self::jitter(rng, self.config.flow_dr_mean, self.config.flow_dr_stdev);

        let mut current = ingress;
        let mut delay = 0.0;
        for sf in chain {
            let from = &self.network.nodes[current].id;
            let Some(dist) = action.distribution(from, sfc, sf) else {
                trace!(node = %from, sfc = %sfc, sf = %sf, "无调度，丢弃");
                return None;
            };
            let next_id = Self::sample_destination(rng, dist)?;
            let next = self.network.node_index(next_id)?;
            let Some(hop) = self.delays.delay(current, next) else {
                trace!(from = %from, to = %next_id, "不可达，丢弃");
                return None;
            };
            if !action.is_placed(next_id, sf) {
                trace!(node = %next_id, sf = %sf, "SF 未放置，丢弃");
                return None;
            }
            if load[next] + dr > self.network.nodes[next].cap {
                trace!(node = %next_id, load = load[next], "容量不足，丢弃");
                return None;
            }
            load[next] += dr;

            let Some(spec) = self.services.sf_list.get(sf) else {
                trace!(sf = %sf, "SF 未定义，丢弃");
                return None;
            };
            delay += hop
                + Self::jitter(
                    rng,
                    spec.processing_delay_mean,
                    spec.processing_delay_stdev,
                );
            current = next;
        }
        Some(delay)
    }
}

impl SimulatorInterface for LocalSimulator {
    #[tracing::instrument(skip(self))]
    fn init(&mut self, seed: u64) -> Result<SimulatorState> {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self.stats = NetworkStats::default();
        self.runs = 0;
        debug!(
            nodes = self.network.nodes.len(),
            sfs = self.services.sf_list.len(),
            sfcs = self.services.sfc_list.len(),
            "仿真器已初始化"
        );
        Ok(self.state())
    }

    #[tracing::instrument(skip(self, action), fields(run = self.runs + 1))]
    fn apply(&mut self, action: &SimulatorAction) -> Result<SimulatorState> {
        // 先取出 rng，避免与 &self 的其余借用重叠
        let mut rng = self.rng.take().ok_or(Error::NotInitialized)?;
        if let Err(e) = self.validate_action(action) {
            self.rng = Some(rng);
            return Err(e);
        }

        self.stats.begin_run();
        let mut load = vec![0.0; self.network.nodes.len()];

        if !self.services.sfc_list.is_empty() {
            let mut queue = BinaryHeap::new();
            let mut seq = 0u64;
            for (idx, node) in self.network.nodes.iter().enumerate() {
                if !node.is_ingress() {
                    continue;
                }
                let mut at = self.inter_arrival(&mut rng);
                let mut emitted = 0usize;
                while at < self.config.run_duration && emitted < MAX_ARRIVALS_PER_INGRESS {
                    queue.push(Arrival {
                        at,
                        seq,
                        ingress: idx,
                    });
                    seq += 1;
                    emitted += 1;
                    at += self.inter_arrival(&mut rng);
                }
            }
            debug!(flows = queue.len(), "本轮流已生成");

            while let Some(arrival) = queue.pop() {
                trace!(at = arrival.at, seq = arrival.seq, "处理流");
                match self.route_flow(&mut rng, action, arrival.ingress, &mut load) {
                    Some(delay) => self.stats.record_success(delay),
                    None => self.stats.record_drop(),
                }
            }
        }

        self.rng = Some(rng);
        self.runs += 1;

        if self.stats.run_total_flows > 0 && self.stats.run_successful_flows == 0 {
            warn!(
                dropped = self.stats.run_dropped_flows,
                "本轮所有流均被丢弃"
            );
        }
        info!(
            run_total_flows = self.stats.run_total_flows,
            run_successful_flows = self.stats.run_successful_flows,
            run_avg_end2end_delay = self.stats.run_avg_end2end_delay,
            "✅ run 完成"
        );
        Ok(self.state())
    }

    fn network(&self) -> &NetworkSpec {
        &self.network
    }
}
