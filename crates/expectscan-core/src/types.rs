//! 公共类型（对外暴露）
use serde::Serialize;

/// 一组输出：setup 行及其后最后一条合格的 expectation 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanPair {
    pub setup: String,
    pub expectation: String,
}
