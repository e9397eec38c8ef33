/// Daily log file output
///
/// Files are named `tokendash_YYYY-MM-DD.log` inside the logs directory.
/// Writes are dropped silently until `init_file_logging` has succeeded.
use crate::paths;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging() {
    let logs_dir = paths::get_logs_directory();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!(
            "Failed to create logs directory {}: {}",
            logs_dir.display(),
            e
        );
        return;
    }

    let file_name = format!("tokendash_{}.log", Local::now().format("%Y-%m-%d"));
    let path = logs_dir.join(file_name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(BufWriter::new(file));
            }
        }
        Err(e) => eprintln!("Failed to open log file {}: {}", path.display(), e),
    }
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
