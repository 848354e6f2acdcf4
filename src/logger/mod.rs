//! Logger module
//!
//! Server lifecycle messages, access logging, and error logging, each routed
//! to stdout/stderr or a configured file.

mod format;
mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;

/// Initialize the logger. Call once at startup, before serving.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(port: u16) {
    write_info(&format!("Server running at http://localhost:{port}/"));
    write_info("Press Ctrl+C to stop the server");
}

pub fn log_server_stop() {
    write_info("Server stopped.");
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
