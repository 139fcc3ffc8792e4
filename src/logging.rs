//! Process logging bootstrap.
//!
//! Library code only emits through the `log` facade; the binary calls
//! [`init`] once before opening storage. `RUST_LOG` takes precedence over
//! the configured level.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

use crate::config::LogConfig;
use crate::error::{CrmError, CrmResult};

const LOG_FILE_BASENAME: &str = "mini-crm";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// Starts the logger. Keep the returned handle alive for the whole process,
/// dropping it flushes and stops file logging.
pub fn init(config: &LogConfig) -> CrmResult<LoggerHandle> {
    let level = normalize_level(&config.level)?;
    let logger = Logger::try_with_env_or_str(level)?;

    let handle = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                CrmError::Config(format!("create log directory {}: {}", dir.display(), e))
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
        None => logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()?,
    };

    info!(
        "event=app_start status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> CrmResult<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "" | "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(CrmError::Config(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_level;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("TRACE").unwrap(), "trace");
        assert_eq!(normalize_level(" info ").unwrap(), "info");
        assert_eq!(normalize_level("warning").unwrap(), "warn");
        assert_eq!(normalize_level("off").unwrap(), "off");
    }

    #[test]
    fn blank_level_falls_back_to_warn() {
        assert_eq!(normalize_level("").unwrap(), "warn");
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let err = normalize_level("verbose").unwrap_err();
        assert!(err.to_string().contains("unsupported log level `verbose`"));
    }
}
