//! LoadBalance 基线
//!
//! 每个 SF 放置在每个节点上，流量在所有节点间均匀分配；
//! 对仿真器重复提交同一动作，最后把输入文件复制到结果目录。

use clap::Parser;
use sfcsim_rs::run::{RunContext, init_logging, resolve_seed, run, run_timestamp};
use sfcsim_rs::sim::LocalSimulator;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "load_balance", about = "Load Balance Algorithm")]
struct Args {
    /// apply() 调用次数
    #[arg(short = 'i', long, default_value_t = 10)]
    iterations: usize,

    /// 仿真器随机种子；缺省时从 [1, 9999] 随机选取
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// 网络拓扑（node-link JSON）
    #[arg(short = 'n', long)]
    network: PathBuf,

    /// SF/SFC 目录（YAML），也接受 `-sf`
    #[arg(short = 'f', long = "service_functions", visible_alias = "service-functions")]
    service_functions: PathBuf,

    /// 仿真器配置（YAML）
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// logs/ 与 results/ 的根目录
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    // clap 的短参数只能是单个字符，先把 `-sf` 改写为长参数
    let args = Args::parse_from(std::env::args().map(|a| {
        if a == "-sf" {
            "--service_functions".to_string()
        } else {
            a
        }
    }));

    // 种子必须在日志文件名与结果目录名确定之前解析
    let seed = resolve_seed(args.seed, &mut rand::thread_rng());
    let ctx = RunContext {
        network: args.network,
        service_functions: args.service_functions,
        config: args.config,
        seed,
        timestamp: run_timestamp(),
        output_dir: args.output_dir,
    };

    let log_file = ctx.log_file();
    init_logging(&log_file).unwrap_or_else(|e| panic!("init logging: {e}"));

    let mut sim = LocalSimulator::new(&ctx.network, &ctx.service_functions, &ctx.config)
        .unwrap_or_else(|e| panic!("create simulator: {e}"));
    let report = run(&mut sim, &ctx, args.iterations).unwrap_or_else(|e| panic!("run: {e}"));

    println!(
        "done: seed={}, iterations={}, ingress_nodes={}, total_flows={}, successful_flows={}, results_dir={}, log={}",
        ctx.seed,
        report.applied,
        report.ingress_nodes.len(),
        report.last_stats.total_flows,
        report.last_stats.successful_flows,
        report.results_dir.display(),
        log_file.display()
    );
}
