//! Access log formats
//!
//! Supported formats:
//! - `common` (Common Log Format)
//! - `json` (structured, one object per line)
//! - custom patterns with `$variable` substitution

use chrono::Local;

/// One access log record, built after the response is finalized.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub body_bytes: usize,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Format the entry according to the configured format name.
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Common Log Format:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with `$variable` substitution.
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$request_method`,
    /// `$request_uri`, `$status`, `$body_bytes_sent`, `$request_time`.
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace(
                "$time_local",
                &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            )
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.path)
            .replace("$request_time", &format!("{request_time:.3}"))
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
    }
}
