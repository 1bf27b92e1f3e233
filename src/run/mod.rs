//! 运行编排模块
//!
//! 此模块包含一次 LoadBalance 运行的上下文（时间戳、种子、路径）、日志初始化、
//! INIT → APPLY×N → FINALIZE 驱动，以及结果目录产物的写出。

// 子模块声明
mod artifacts;
mod context;
mod driver;
mod logging;

// 重新导出公共接口
pub use artifacts::{INPUT_FILE_NAME, InputDescriptor, copy_input_files, create_input_file};
pub use context::{RunContext, TIMESTAMP_FORMAT, resolve_seed, run_timestamp};
pub use driver::{RunReport, apply_loop, finalize, initialize, run};
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
