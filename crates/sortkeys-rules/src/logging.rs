//! Logging module for sortkeys runs
//!
//! Provides detailed logging of configuration loading, file discovery, and
//! per-file check results for debugging and verification purposes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global logger instance
static LOGGER: Mutex<Option<RunLogger>> = Mutex::new(None);

/// Logger for check and fix runs
pub struct RunLogger {
    file: File,
    path: PathBuf,
}

impl RunLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self {
            file,
            path: log_path.to_path_buf(),
        })
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize the global logger
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("/tmp/sortkeys-{}.log", timestamp))
    });

    let logger = RunLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

/// Log a message to the global logger
pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

/// Log a section header
pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    if let Ok(guard) = LOGGER.lock() {
        guard.is_some()
    } else {
        false
    }
}

/// Log configuration loading
pub fn log_config_load(path: &Path) {
    section("CONFIGURATION LOADING");
    log(&format!("Loading config from: {}", path.display()));
}

/// Log summary of configuration
pub fn log_config_summary(rules_count: usize, include_count: usize, exclude_count: usize) {
    section("CONFIGURATION SUMMARY");
    log(&format!("Enabled rules: {}", rules_count));
    log(&format!("Include patterns: {}", include_count));
    log(&format!("Exclude patterns: {}", exclude_count));
}

/// Log check run start
pub fn log_run_start(files_count: usize) {
    section("CHECK START");
    log(&format!("Checking {} files", files_count));
}

/// Log per-file check result
pub fn log_file_result(path: &Path, diagnostics: usize) {
    if diagnostics > 0 {
        log(&format!(
            "{}: {} unsorted declarations",
            path.display(),
            diagnostics
        ));
    } else {
        log(&format!("{}: clean", path.display()));
    }
}

/// Log per-file failure
pub fn log_file_error(path: &Path, error: &str) {
    log(&format!("FAILED: {}", path.display()));
    log(&format!("  Error: {}", error));
}

/// Log per-file fix result
pub fn log_fix_result(path: &Path, changed: bool, remaining: usize) {
    if changed {
        log(&format!(
            "{}: rewritten, {} diagnostics remain",
            path.display(),
            remaining
        ));
    } else {
        log(&format!("{}: unchanged", path.display()));
    }
}

/// Log check run complete
pub fn log_run_complete(total_diagnostics: usize, failed_files: usize) {
    section("CHECK COMPLETE");
    log(&format!("Total diagnostics: {}", total_diagnostics));
    log(&format!("Files that failed to check: {}", failed_files));
}
