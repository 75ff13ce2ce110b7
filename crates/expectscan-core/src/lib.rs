//! 断言日志扫描库
//!
//! 设计要点：
//! - 逐行读取测试源码/日志，识别 setup 行（默认 `engine.fromFen`）与 expectation 行（默认 `EXPECT_EQ`）。
//! - 仅保留数值严格小于阈值的 expectation；每个 setup 只输出其后最后一条合格的 expectation。
//! - 结果按出现顺序流式写出，非法数值默认终止扫描（可切换为跳过）。

mod options;
mod types;
mod error;
mod classify;
mod config;
mod output;
mod scan;

pub use options::{
    MalformedPolicy, OutputFormat, ScanOptions, ScanStats, DEFAULT_EXPECT_MARKER, DEFAULT_SETUP_MARKER,
    DEFAULT_THRESHOLD,
};
pub use types::ScanPair;
pub use error::ScanError;
pub use classify::{classify_line, expect_value, parse_expect_field, ExpectValue, LineKind};
pub use config::{load_config, ConfigFile};
pub use scan::{scan_and_write, Scanner};
