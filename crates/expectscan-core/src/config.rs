//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::options::{MalformedPolicy, OutputFormat, ScanOptions};

/// 配置文件结构；所有字段可省略，省略时沿用默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub setup_marker: Option<String>,
    #[serde(default)]
    pub expect_marker: Option<String>,
    #[serde(default)]
    pub threshold: Option<i64>,
    #[serde(default)]
    pub on_malformed: Option<MalformedPolicy>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    pub fn parse(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    /// 将已设置的字段覆盖到 `opts`
    pub fn apply(self, opts: &mut ScanOptions) {
        if let Some(v) = self.setup_marker { opts.setup_marker = v; }
        if let Some(v) = self.expect_marker { opts.expect_marker = v; }
        if let Some(v) = self.threshold { opts.threshold = v; }
        if let Some(v) = self.on_malformed { opts.on_malformed = v; }
        if let Some(v) = self.format { opts.format = v; }
    }
}

/// 读取并解析配置文件
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    ConfigFile::parse(&txt).with_context(|| format!("parse config {}", path.display()))
}
