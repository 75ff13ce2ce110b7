use anyhow::{Context, Result};
use clap::Parser;
use expectscan_core::{load_config, scan_and_write, MalformedPolicy, OutputFormat, ScanOptions, ScanStats};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
/// 从标准输入读取，将 (setup, expectation) 结果写到标准输出
#[derive(Parser, Debug)]
#[command(name = "expectscan", version, about = "Pick perft setups and their last small EXPECT_EQ from test sources")]
struct Cli {
    /// 配置文件（TOML）；命令行参数优先于配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 数值阈值：严格小于该值的 expectation 才保留
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// setup 行前缀
    #[arg(long)]
    setup_marker: Option<String>,

    /// expectation 行前缀
    #[arg(long)]
    expect_marker: Option<String>,

    /// 非法数值的处理方式：abort（默认）或 skip
    #[arg(long, value_parser = ["abort", "skip"])]
    on_malformed: Option<String>,

    /// 输出格式：text（默认）或 json
    #[arg(long, value_parser = ["text", "json"])]
    format: Option<String>,
}

impl Cli {
    /// 组装扫描参数：默认值 → 配置文件 → 命令行
    fn scan_options(self) -> Result<ScanOptions> {
        let mut opts = ScanOptions::default();
        if let Some(path) = &self.config {
            load_config(path)?.apply(&mut opts);
        }
        if let Some(v) = self.threshold { opts.threshold = v; }
        if let Some(v) = self.setup_marker { opts.setup_marker = v; }
        if let Some(v) = self.expect_marker { opts.expect_marker = v; }
        if let Some(v) = self.on_malformed {
            opts.on_malformed = match v.as_str() {
                "skip" => MalformedPolicy::Skip,
                _ => MalformedPolicy::Abort,
            };
        }
        if let Some(v) = self.format {
            opts.format = match v.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Text,
            };
        }
        Ok(opts)
    }
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();
    let opts = cli.scan_options()?;
    info!(setup_marker = %opts.setup_marker, expect_marker = %opts.expect_marker, threshold = opts.threshold, "starting scan");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = scan_and_flush(stdin.lock(), BufWriter::new(stdout.lock()), &opts)?;

    info!(
        lines_read = stats.lines_read,
        setups_seen = stats.setups_seen,
        expectations_disqualified = stats.expectations_disqualified,
        malformed_skipped = stats.malformed_skipped,
        pairs_written = stats.pairs_written,
        "scan finished"
    );
    Ok(())
}

/// 扫描并冲刷输出。失败前已确定的结果也要写出；
/// 扫描错误优先于冲刷错误返回（如管道断开时两者都会失败）
fn scan_and_flush<W: Write>(input: impl BufRead, mut out: BufWriter<W>, opts: &ScanOptions) -> Result<ScanStats> {
    let res = scan_and_write(input, &mut out, opts);
    let flushed = out.flush();
    let stats = res.context("scan failed")?;
    flushed.context("flush stdout")?;
    Ok(stats)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只输出结果
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
