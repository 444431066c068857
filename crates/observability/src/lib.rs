//! # Observability
//!
//! 可观测性模块：Tracing 初始化。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - `RUST_LOG` 覆盖默认日志级别
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{init_with_config, LogFormat, ObservabilityConfig};
//!
//! init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     default_log_level: "debug".into(),
//!     ..Default::default()
//! })?;
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 使用默认配置初始化
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// 默认日志级别
    pub default_log_level: String,
    /// 为 true 时忽略 RUST_LOG (例如 --quiet)
    pub ignore_env: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            default_log_level: "info".to_string(),
            ignore_env: false,
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    #[default]
    Pretty,
    /// 紧凑单行格式
    Compact,
}

impl ObservabilityConfig {
    /// 构建日志过滤器
    pub fn env_filter(&self) -> EnvFilter {
        if self.ignore_env {
            return EnvFilter::new(&self.default_log_level);
        }
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_log_level))
    }
}

/// 使用自定义配置初始化
///
/// 日志写到 stderr，stdout 留给报告输出。
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = config.env_filter();

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}
