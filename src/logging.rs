use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_LEVEL_ENV: &str = "TASKPAD_LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Set up a per-run log file under the platform data directory. The writer
/// guard is leaked on purpose: logging lives as long as the process.
pub fn init_logging() -> Result<PathBuf> {
    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory '{}'", log_dir.display()))?;

    let log_file_path = log_dir.join(log_file_name());
    let file = fs::File::create(&log_file_path)
        .with_context(|| format!("failed to create log file '{}'", log_file_path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    std::mem::forget(guard);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level()))
        .with(file_layer)
        .init();

    tracing::info!("logging initialized, writing to {}", log_file_path.display());

    Ok(log_file_path)
}

fn log_level() -> &'static str {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| normalize_log_level(&raw))
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn log_directory() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("unable to determine local data directory"))?;
    Ok(data_dir.join("taskpad").join("logs"))
}

fn log_file_name() -> String {
    format!("taskpad-{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

pub fn print_log_location(log_path: &Path) {
    println!();
    println!("Log file: {}", log_path.display());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_under_app_dir() {
        let dir = log_directory().expect("log directory should resolve");
        assert!(dir.to_string_lossy().contains("taskpad"));
        assert!(dir.ends_with(Path::new("taskpad").join("logs")));
    }

    #[test]
    fn test_log_file_name_shape() {
        let name = log_file_name();
        assert!(name.starts_with("taskpad-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_normalize_log_level() {
        assert_eq!(normalize_log_level("TRACE"), Some("trace"));
        assert_eq!(normalize_log_level(" warning "), Some("warn"));
        assert_eq!(normalize_log_level("nope"), None);
        assert_eq!(normalize_log_level(""), None);
    }
}
