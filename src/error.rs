//! Error types
//!
//! `ServeError` covers per-request failures and maps each onto an HTTP outcome.
//! `StartupError` covers everything that stops the process before it serves.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a file for one request
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Request path tried to leave the site root
    #[error("path escapes site root: {request_path}")]
    Forbidden { request_path: String },

    #[error("{} for {}", io_error_code(.source), .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Classify a file system error into the not-found / other split
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Errno-style name for an I/O error, used in 500 bodies and logs
pub fn io_error_code(err: &io::Error) -> String {
    let code = match err.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::IsADirectory => "EISDIR",
        io::ErrorKind::NotADirectory => "ENOTDIR",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::OutOfMemory => "ENOMEM",
        io::ErrorKind::StorageFull => "ENOSPC",
        io::ErrorKind::Interrupted => "EINTR",
        other => return format!("{other:?}"),
    };
    code.to_string()
}

/// Failure before the accept loop starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file: {0}")]
    Logger(#[source] io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl StartupError {
    /// Classify a bind failure, singling out an occupied port
    pub fn from_bind(addr: SocketAddr, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AddrInUse {
            Self::PortInUse { port: addr.port() }
        } else {
            Self::Bind { addr, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = ServeError::from_io(
            PathBuf::from("./missing.txt"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, ServeError::NotFound { .. }));
    }

    #[test]
    fn test_from_io_other() {
        let err = ServeError::from_io(
            PathBuf::from("./secret.txt"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ServeError::Io { .. }));
        assert_eq!(err.to_string(), "EACCES for ./secret.txt");
    }

    #[test]
    fn test_forbidden_display() {
        let err = ServeError::Forbidden {
            request_path: "/../etc/passwd".to_string(),
        };
        assert_eq!(err.to_string(), "path escapes site root: /../etc/passwd");
    }

    #[test]
    fn test_io_error_code() {
        assert_eq!(io_error_code(&io::Error::from(io::ErrorKind::IsADirectory)), "EISDIR");
        assert_eq!(io_error_code(&io::Error::from(io::ErrorKind::NotADirectory)), "ENOTDIR");
        assert_eq!(io_error_code(&io::Error::from(io::ErrorKind::TimedOut)), "TimedOut");
    }

    #[test]
    fn test_port_in_use() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let err = StartupError::from_bind(addr, io::Error::from(io::ErrorKind::AddrInUse));
        assert!(matches!(err, StartupError::PortInUse { port: 8080 }));

        let err = StartupError::from_bind(addr, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
