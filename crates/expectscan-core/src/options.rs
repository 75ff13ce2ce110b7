//! 扫描选项与统计信息（模块）
use serde::Deserialize;

/// 默认的局面设置标记
pub const DEFAULT_SETUP_MARKER: &str = "engine.fromFen";
/// 默认的断言标记
pub const DEFAULT_EXPECT_MARKER: &str = "EXPECT_EQ";
/// 默认阈值：数值严格小于该值才保留
pub const DEFAULT_THRESHOLD: i64 = 1_000_000;

/// EXPECT_EQ 第二字段无法解析为整数时的处理策略
/// - Abort：立即终止扫描并返回错误（与参考行为一致）
/// - Skip：记录告警后跳过该行，继续扫描
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    #[default]
    Abort,
    Skip,
}

/// 输出格式
/// - Text：每对输出两行（setup 行、expectation 行）
/// - Json：每对输出一行 JSON 对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// setup 行前缀
    pub setup_marker: String,
    /// expectation 行前缀
    pub expect_marker: String,
    /// 数值 >= threshold 的 expectation 不保留
    pub threshold: i64,
    pub on_malformed: MalformedPolicy,
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            setup_marker: DEFAULT_SETUP_MARKER.to_string(),
            expect_marker: DEFAULT_EXPECT_MARKER.to_string(),
            threshold: DEFAULT_THRESHOLD,
            on_malformed: MalformedPolicy::Abort,
            format: OutputFormat::Text,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_read: usize,
    pub setups_seen: usize,
    pub expectations_seen: usize,
    /// 数值达到阈值而被丢弃的 expectation 行数
    pub expectations_disqualified: usize,
    /// Skip 策略下跳过的非法数值行数
    pub malformed_skipped: usize,
    pub lines_ignored: usize,
    pub pairs_written: usize,
}
