//! 扫描主流程：逐行读取，维护 (setup, expectation) 两个槽位
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::classify::{classify_line, ExpectValue, LineKind};
use crate::error::ScanError;
use crate::options::{MalformedPolicy, ScanOptions, ScanStats};
use crate::output::write_pair;
use crate::types::ScanPair;

/// 两槽位扫描器
/// - setup：最近一次出现的 setup 行
/// - expectation：该 setup 之后最后一条合格的 expectation 行
#[derive(Debug)]
pub struct Scanner<'o> {
    opts: &'o ScanOptions,
    setup: Option<String>,
    expectation: Option<String>,
    stats: ScanStats,
}

impl<'o> Scanner<'o> {
    pub fn new(opts: &'o ScanOptions) -> Self {
        Self { opts, setup: None, expectation: None, stats: ScanStats::default() }
    }

    /// 处理一行输入（行号从 1 开始，仅用于报错）
    /// 遇到新的 setup 行且两槽位均已填充时返回上一组结果
    pub fn feed(&mut self, line_no: usize, raw: &str) -> Result<Option<ScanPair>, ScanError> {
        self.stats.lines_read += 1;
        let line = raw.trim();
        match classify_line(line, self.opts) {
            LineKind::Setup => {
                self.stats.setups_seen += 1;
                let done = self.take_pair();
                self.setup = Some(line.to_string());
                self.expectation = None;
                Ok(done)
            }
            LineKind::Expectation(value) => {
                self.on_expectation(line_no, line, value)?;
                Ok(None)
            }
            LineKind::Ignored => {
                self.stats.lines_ignored += 1;
                Ok(None)
            }
        }
    }

    /// 输入结束：两槽位均已填充时返回最后一组
    pub fn finish(&mut self) -> Option<ScanPair> {
        self.take_pair()
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    fn on_expectation(&mut self, line_no: usize, line: &str, value: ExpectValue<'_>) -> Result<(), ScanError> {
        if let ExpectValue::Malformed(field) = value {
            return match self.opts.on_malformed {
                MalformedPolicy::Abort => Err(ScanError::MalformedExpectationValue {
                    line_no,
                    field: field.to_string(),
                    line: line.to_string(),
                }),
                MalformedPolicy::Skip => {
                    warn!(line_no, field, "skipping malformed expectation value");
                    self.stats.malformed_skipped += 1;
                    Ok(())
                }
            };
        }
        match value.below(self.opts.threshold) {
            Some(true) => {
                self.stats.expectations_seen += 1;
                self.expectation = Some(line.to_string());
            }
            Some(false) => {
                self.stats.expectations_seen += 1;
                self.stats.expectations_disqualified += 1;
            }
            None => {
                debug!(line_no, "expectation line has fewer than 2 fields");
                self.stats.lines_ignored += 1;
            }
        }
        Ok(())
    }

    fn take_pair(&mut self) -> Option<ScanPair> {
        match (&self.setup, self.expectation.take()) {
            (Some(setup), Some(expectation)) => Some(ScanPair { setup: setup.clone(), expectation }),
            _ => None,
        }
    }
}

/// 逐行扫描 `input` 并将结果流式写入 `out`
/// 每组结果在确定后立即写出：即使后续行导致失败，之前的结果也已输出
pub fn scan_and_write(input: impl BufRead, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let mut scanner = Scanner::new(opts);
    let mut pairs_written = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(ScanError::from).with_context(|| format!("read line {line_no}"))?;
        if let Some(pair) = scanner.feed(line_no, &line)? {
            write_pair(out, &pair, opts.format).context("write output")?;
            pairs_written += 1;
        }
    }
    if let Some(pair) = scanner.finish() {
        write_pair(out, &pair, opts.format).context("write output")?;
        pairs_written += 1;
    }

    let mut stats = scanner.stats().clone();
    stats.pairs_written = pairs_written;
    Ok(stats)
}
