//! 最短路径时延表
//!
//! 流在两个处理节点之间沿最短（按链路时延）路径转发。
//! 本模块为拓扑上所有节点对预计算最短时延，不可达的节点对记为 `None`。

use super::network::NetworkSpec;

#[derive(Debug, Clone)]
pub struct DelayTable {
    n: usize,
    /// dist[from * n + to]，不可达为 INFINITY
    dist: Vec<f64>,
}

impl DelayTable {
    /// 基于无向链路构建时延表（Floyd–Warshall）。
    ///
    /// 链路端点须已通过 [`NetworkSpec::validate`] 校验。
    pub fn build(net: &NetworkSpec) -> Self {
        let n = net.nodes.len();
        let mut dist = vec![f64::INFINITY; n * n];
        for i in 0..n {
            dist[i * n + i] = 0.0;
        }
        for link in &net.links {
            let (Some(a), Some(b)) = (net.node_index(&link.source), net.node_index(&link.target))
            else {
                continue;
            };
            // 平行链路取时延最小的一条
            if link.delay < dist[a * n + b] {
                dist[a * n + b] = link.delay;
                dist[b * n + a] = link.delay;
            }
        }
        for k in 0..n {
            for i in 0..n {
                let dik = dist[i * n + k];
                if dik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through = dik + dist[k * n + j];
                    if through < dist[i * n + j] {
                        dist[i * n + j] = through;
                    }
                }
            }
        }
        Self { n, dist }
    }

    /// 节点下标 `from` 到 `to` 的最短时延
    pub fn delay(&self, from: usize, to: usize) -> Option<f64> {
        let d = self.dist[from * self.n + to];
        d.is_finite().then_some(d)
    }
}
