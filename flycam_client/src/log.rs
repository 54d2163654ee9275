//! Logging setup.
//!
//! Human-readable output goes to stderr. A second, ANSI-free copy is
//! appended to the session log file, which starts each run with a banner.
//! If the log file cannot be opened the viewer keeps running with stderr
//! only.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// First lines written to the log file on every run.
pub fn session_banner(now: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "----------\nInit log. Local time {}\n",
        now.format("%a %b %e %H:%M:%S %Y")
    )
}

/// Opens `path` for appending, creating parent directories, and writes the
/// session banner.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(session_banner(chrono::Local::now()).as_bytes())?;
    Ok(file)
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("could not open log file {}: {err}", path.display());
            None
        }
    });

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))
}
