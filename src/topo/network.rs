//! 网络拓扑描述
//!
//! 定义 node-link JSON 拓扑（节点带 `id`、`type`、`cap`，链路带 `cap`、`delay`），
//! 以及加载与校验逻辑。

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// ingress 节点的类型标记
pub const INGRESS: &str = "Ingress";

fn default_node_type() -> String {
    "Normal".to_string()
}

fn unlimited() -> f64 {
    f64::INFINITY
}

/// 拓扑节点
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub id: String,
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
    /// 计算容量，缺省为不限
    #[serde(default = "unlimited")]
    pub cap: f64,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            cap: f64::INFINITY,
        }
    }

    pub fn is_ingress(&self) -> bool {
        self.node_type == INGRESS
    }
}

/// 无向链路
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LinkSpec {
    pub source: String,
    pub target: String,
    #[serde(default = "unlimited")]
    pub cap: f64,
    /// 传播时延（毫秒）
    #[serde(default)]
    pub delay: f64,
}

/// 网络拓扑
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NetworkSpec {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

impl NetworkSpec {
    /// 从 JSON 文件加载并校验拓扑
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(Error::io(path))?;
        let net: NetworkSpec = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        net.validate()?;
        debug!(
            path = %path.display(),
            nodes = net.nodes.len(),
            links = net.links.len(),
            "拓扑已加载"
        );
        Ok(net)
    }

    /// 检查节点非空、id 唯一、链路端点存在且时延非负
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidNetwork("network has no nodes".into()));
        }
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::InvalidNetwork(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
            if node.cap.is_nan() || node.cap < 0.0 {
                return Err(Error::InvalidNetwork(format!(
                    "node {} has invalid cap {}",
                    node.id, node.cap
                )));
            }
        }
        for link in &self.links {
            for end in [&link.source, &link.target] {
                if !seen.contains(end.as_str()) {
                    return Err(Error::InvalidNetwork(format!(
                        "link {}-{} references unknown node {}",
                        link.source, link.target, end
                    )));
                }
            }
            if !link.delay.is_finite() || link.delay < 0.0 {
                return Err(Error::InvalidNetwork(format!(
                    "link {}-{} has invalid delay {}",
                    link.source, link.target, link.delay
                )));
            }
        }
        Ok(())
    }

    /// 节点 id 列表（保持文件中的顺序）
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// 所有类型为 `Ingress` 的节点 id
    pub fn ingress_nodes(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.is_ingress())
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}
