//! 调度策略模块
//!
//! 此模块包含调度概率归一化与 LoadBalance 基线策略（全放置 + 均匀调度）。

// 子模块声明
mod load_balance;
mod normalize;

// 重新导出公共接口
pub use load_balance::{ALGORITHM_NAME, LoadBalance, get_placement, get_schedule};
pub use normalize::normalize_scheduling_probabilities;
