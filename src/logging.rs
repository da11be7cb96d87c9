use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Where log lines go. The terminal UI owns stdout, so interactive runs log
/// to a file; headless runs log to stderr alongside the JSON on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("sysgauge").join("sysgauge.log"))
}

pub fn init_tracing(target: &LogTarget, level: Level) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = Arc::new(open_log_file(path)?);
            builder
                .with_ansi(false)
                .with_writer(file)
                .try_init()
        }
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))
}
