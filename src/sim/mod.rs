//! 仿真器接口模块
//!
//! 此模块定义与 SFC 协调仿真器交互的窄接口（init/apply）、动作与状态类型，
//! 以及一个本地的流级仿真器实现。

// 子模块声明
mod action;
mod config;
mod interface;
mod local;
mod service;
mod stats;

// 重新导出公共接口
pub use action::{Placement, Schedule, SimulatorAction};
pub use config::{MAX_ARRIVALS_PER_RUN, SimConfig};
pub use interface::{SimulatorInterface, SimulatorState};
pub use local::LocalSimulator;
pub use service::{ServiceCatalogue, ServiceFunction};
pub use stats::NetworkStats;
