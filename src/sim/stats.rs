//! 统计信息
//!
//! 定义仿真器每次 `init`/`apply` 返回的网络统计数据。

use serde::Serialize;

/// 网络统计信息（累计值与最近一次 run 的值）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_flows: u64,
    pub successful_flows: u64,
    pub dropped_flows: u64,
    /// 成功流的平均端到端时延（毫秒）
    pub avg_end2end_delay: f64,
    pub run_total_flows: u64,
    pub run_successful_flows: u64,
    pub run_dropped_flows: u64,
    pub run_avg_end2end_delay: f64,
    pub run_max_end2end_delay: f64,
}

impl NetworkStats {
    /// 开始新一轮 run：清空 run_* 字段，保留累计值
    pub(crate) fn begin_run(&mut self) {
        self.run_total_flows = 0;
        self.run_successful_flows = 0;
        self.run_dropped_flows = 0;
        self.run_avg_end2end_delay = 0.0;
        self.run_max_end2end_delay = 0.0;
    }

    pub(crate) fn record_success(&mut self, delay: f64) {
        self.total_flows += 1;
        self.run_total_flows += 1;
        self.successful_flows += 1;
        self.run_successful_flows += 1;
        // 增量均值
        self.avg_end2end_delay += (delay - self.avg_end2end_delay) / self.successful_flows as f64;
        self.run_avg_end2end_delay +=
            (delay - self.run_avg_end2end_delay) / self.run_successful_flows as f64;
        self.run_max_end2end_delay = self.run_max_end2end_delay.max(delay);
    }

    pub(crate) fn record_drop(&mut self) {
        self.total_flows += 1;
        self.run_total_flows += 1;
        self.dropped_flows += 1;
        self.run_dropped_flows += 1;
    }
}
