//! Optional log file sink
//!
//! Lines are appended through a buffered writer guarded by a mutex. When no
//! file is configured every write is a no-op.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open (or create) the log file in append mode
pub fn init_file_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            *LOG_FILE.lock() = Some(BufWriter::new(file));
        }
        Err(e) => {
            eprintln!("Failed to open log file '{}': {}", path.display(), e);
        }
    }
}

pub fn write_to_file(line: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        let _ = writeln!(writer, "{}", line);
    }
}

pub fn flush_file_logging() {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        let _ = writer.flush();
    }
}
