//! Log line formatting
//!
//! The timestamped per-request lines and the optional access log entry
//! in `combined`, `common`, `json` or a custom `$variable` pattern.

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// ISO 8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `[time] METHOD /uri`
pub fn request_line(time: &DateTime<Utc>, method: &str, uri: &str) -> String {
    format!("[{}] {method} {uri}", timestamp(time))
}

pub fn served_line(time: &DateTime<Utc>, path: &Path, bytes: usize) -> String {
    format!("[{}] Served: {} ({bytes} bytes)", timestamp(time), path.display())
}

pub fn not_found_line(time: &DateTime<Utc>, path: &Path) -> String {
    format!("[{}] File not found: {}", timestamp(time), path.display())
}

pub fn server_error_line(time: &DateTime<Utc>, code: &str, path: &Path) -> String {
    format!("[{}] Server error: {code} for {}", timestamp(time), path.display())
}

/// One access log line worth of request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Utc>,
    pub method: String,
    /// Request target as received, query string included
    pub uri: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    pub fn new(remote_addr: String, time: DateTime<Utc>, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time,
            method,
            uri,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the entry; anything other than a known format name is a pattern
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            "common" => self.format_common(),
            "json" => self.format_json(),
            pattern => self.format_custom(pattern),
        }
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.uri, self.http_version)
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        let optional = |value: Option<&String>| {
            value.map_or_else(|| "null".to_string(), |v| format!("\"{}\"", escape_json(v)))
        };

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","uri":"{}","http_version":"{}","status":{},"body_bytes":{},"referer":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            timestamp(&self.time),
            escape_json(&self.method),
            escape_json(&self.uri),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            optional(self.referer.as_ref()),
            optional(self.user_agent.as_ref()),
            self.request_time_us,
        )
    }

    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$request_time`,
    /// `$status`, `$body_bytes_sent`, `$http_referer`, `$http_user_agent`
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        // $request_* before $request, otherwise the shorter name eats the prefix
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace("$time_local", &self.time_local())
            .replace("$time_iso8601", &timestamp(&self.time))
            .replace("$request_time", &format!("{request_time:.3}"))
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.uri)
            .replace("$request", &self.request_line())
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
            .replace("$http_referer", self.referer.as_deref().unwrap_or("-"))
            .replace("$http_user_agent", self.user_agent.as_deref().unwrap_or("-"))
    }
}

/// Escape special characters for JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_entry() -> AccessLogEntry {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            time,
            "GET".to_string(),
            "/pkg/app.wasm?v=2".to_string(),
        );
        entry.body_bytes = 1234;
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 1_250_000;
        entry
    }

    #[test]
    fn test_timestamp() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(timestamp(&time), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_request_lines() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(
            request_line(&time, "GET", "/pkg/app.wasm?v=2"),
            "[2024-05-01T12:30:00.000Z] GET /pkg/app.wasm?v=2"
        );
        assert_eq!(
            served_line(&time, Path::new("./pkg/app.wasm"), 4),
            "[2024-05-01T12:30:00.000Z] Served: ./pkg/app.wasm (4 bytes)"
        );
        assert_eq!(
            not_found_line(&time, Path::new("./missing.xyz")),
            "[2024-05-01T12:30:00.000Z] File not found: ./missing.xyz"
        );
        assert_eq!(
            server_error_line(&time, "EACCES", Path::new("./secret.txt")),
            "[2024-05-01T12:30:00.000Z] Server error: EACCES for ./secret.txt"
        );
    }

    #[test]
    fn test_served_line_empty_file() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(
            served_line(&time, Path::new("./empty.txt"), 0),
            "[2024-05-01T00:00:00.007Z] Served: ./empty.txt (0 bytes)"
        );
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert_eq!(
            log,
            "192.168.1.1 - - [01/May/2024:12:30:00 +0000] \"GET /pkg/app.wasm?v=2 HTTP/1.1\" 200 1234 \"https://example.com\" \"Mozilla/5.0\""
        );
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.ends_with("\"GET /pkg/app.wasm?v=2 HTTP/1.1\" 200 1234"));
        assert!(!log.contains("Mozilla"));
    }

    #[test]
    fn test_format_json() {
        let mut entry = create_test_entry();
        entry.user_agent = None;
        entry.uri = "/say \"hi\"".to_string();
        let log = entry.format("json");
        assert!(log.contains(r#""uri":"/say \"hi\"""#));
        assert!(log.contains(r#""user_agent":null"#));
        assert!(log.contains(r#""time":"2024-05-01T12:30:00.000Z""#));
    }

    #[test]
    fn test_format_custom() {
        let log = create_test_entry().format("$request_method $request_uri -> $status in $request_time ($request)");
        assert_eq!(
            log,
            "GET /pkg/app.wasm?v=2 -> 200 in 1.250 (GET /pkg/app.wasm?v=2 HTTP/1.1)"
        );
    }
}
