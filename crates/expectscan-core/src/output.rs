//! 输出写入（Text / JSON Lines）
use std::io::{self, Write};

use crate::options::OutputFormat;
use crate::types::ScanPair;

/// 将一组结果写入 `out`
/// - Text：setup 行与 expectation 行各占一行
/// - Json：每组一行 JSON 对象，扫描中途失败时已写出的行仍然完整
pub(crate) fn write_pair(out: &mut dyn Write, pair: &ScanPair, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", pair.setup)?;
            writeln!(out, "{}", pair.expectation)
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, pair)?;
            writeln!(out)
        }
    }
}
