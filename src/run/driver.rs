//! 运行驱动
//!
//! INIT（初始化仿真器并构建固定动作）→ APPLY×N（重复提交同一动作）→
//! FINALIZE（复制输入文件并写出 `input.yaml`）。任一步失败立即返回，不重试。

use std::path::PathBuf;

use tracing::info;

use super::artifacts::{copy_input_files, create_input_file};
use super::context::RunContext;
use crate::algo::{ALGORITHM_NAME, LoadBalance};
use crate::error::Result;
use crate::sim::{NetworkStats, SimulatorAction, SimulatorInterface, SimulatorState};

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub ingress_nodes: Vec<String>,
    pub action: SimulatorAction,
    /// 实际执行的 apply 次数
    pub applied: usize,
    /// 最后一次 init/apply 返回的统计
    pub last_stats: NetworkStats,
    pub results_dir: PathBuf,
}

/// INIT：初始化仿真器，推导节点/SF/SFC 并构建 LoadBalance 动作
#[tracing::instrument(skip(sim))]
pub fn initialize<S: SimulatorInterface>(
    sim: &mut S,
    seed: u64,
) -> Result<(SimulatorState, Vec<String>, SimulatorAction)> {
    let init_state = sim.init(seed)?;
    info!(stats = ?init_state.network_stats, "Network Stats after init()");

    let ingress_nodes = sim.network().ingress_nodes();
    // 全放置、均匀调度：只需计算一次
    let action = LoadBalance::from_state(&init_state).action()?;
    info!(
        nodes = action.placement.len(),
        ingress_nodes = ingress_nodes.len(),
        "LoadBalance action ready"
    );
    Ok((init_state, ingress_nodes, action))
}

/// APPLY×N：提交同一动作 `iterations` 次，返回最后一次的统计
#[tracing::instrument(skip(sim, action, initial))]
pub fn apply_loop<S: SimulatorInterface>(
    sim: &mut S,
    action: &SimulatorAction,
    iterations: usize,
    initial: NetworkStats,
) -> Result<NetworkStats> {
    let mut last = initial;
    for i in 0..iterations {
        let state = sim.apply(action)?;
        info!(iteration = i + 1, stats = ?state.network_stats, "Network Stats after apply()");
        last = state.network_stats;
    }
    Ok(last)
}

/// FINALIZE：复制输入文件并写出 `input.yaml`，返回结果目录
#[tracing::instrument(skip(ctx))]
pub fn finalize(ctx: &RunContext, num_ingress: usize) -> Result<PathBuf> {
    let results_dir = ctx.results_dir();
    copy_input_files(&results_dir, &ctx.network, &ctx.service_functions, &ctx.config)?;
    create_input_file(&results_dir, num_ingress, ALGORITHM_NAME)?;
    info!(results_dir = %results_dir.display(), "结果目录已写出");
    Ok(results_dir)
}

/// 完整运行一次 LoadBalance 基线
pub fn run<S: SimulatorInterface>(
    sim: &mut S,
    ctx: &RunContext,
    iterations: usize,
) -> Result<RunReport> {
    info!(
        network = %ctx.network.display(),
        service_functions = %ctx.service_functions.display(),
        config = %ctx.config.display(),
        seed = ctx.seed,
        iterations,
        "▶️  开始运行 LoadBalance"
    );
    let (init_state, ingress_nodes, action) = initialize(sim, ctx.seed)?;
    let last_stats = apply_loop(sim, &action, iterations, init_state.network_stats)?;
    let results_dir = finalize(ctx, ingress_nodes.len())?;
    info!(applied = iterations, "✅ 运行完成");

    Ok(RunReport {
        ingress_nodes,
        action,
        applied: iterations,
        last_stats,
        results_dir,
    })
}
