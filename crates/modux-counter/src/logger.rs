//! Terminal logging using simplelog
//!
//! Level comes from RUST_LOG when set, otherwise from the config.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Pick the effective level: RUST_LOG wins over the configured level
fn resolve_level(env_level: Option<&str>, configured: &str) -> LevelFilter {
    env_level
        .and_then(parse_level)
        .or_else(|| parse_level(configured))
        .unwrap_or(LevelFilter::Info)
}

/// Initialize terminal logging
pub fn init(configured_level: &str) -> anyhow::Result<()> {
    let env_level = std::env::var("RUST_LOG").ok();
    let level = resolve_level(env_level.as_deref(), configured_level);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}
