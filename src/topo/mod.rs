//! 网络拓扑模块
//!
//! 此模块负责加载 node-link 形式的网络拓扑，并提供 ingress 节点枚举与链路时延表。

// 子模块声明
mod network;
mod routing;

// 重新导出公共接口
pub use network::{INGRESS, LinkSpec, NetworkSpec, NodeSpec};
pub use routing::DelayTable;
