//! 调度概率归一化

use crate::error::{Error, Result};

/// 将一组非负权重归一化为概率分布。
///
/// - 权重全为 0 时返回均匀分布 `1/n`；
/// - 否则先除以最大权重再按比例缩放（避免求和溢出），并把舍入误差补到最后一个正权重上，使总和恰为 1；
/// - 空输入返回 [`Error::EmptyDistribution`]：不能把流量调度到 0 个节点。
pub fn normalize_scheduling_probabilities(weights: &[f64]) -> Result<Vec<f64>> {
    if weights.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidWeights(format!(
            "weights must be finite and non-negative, got {w}"
        )));
    }

    let max = weights.iter().copied().fold(0.0, f64::max);
    if max == 0.0 {
        let p = 1.0 / weights.len() as f64;
        return Ok(vec![p; weights.len()]);
    }

    // 缩放后每项在 [0, 1]，总和不超过 n
    let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
    let sum: f64 = scaled.iter().sum();
    let mut probs: Vec<f64> = scaled.iter().map(|w| w / sum).collect();
    let residual = 1.0 - probs.iter().sum::<f64>();
    if let Some(last) = probs.iter_mut().rev().find(|p| **p > 0.0) {
        *last = (*last + residual).clamp(0.0, 1.0);
    }
    Ok(probs)
}
