//! Server configuration from the command line and environment

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "board-server", version, about = "Task service for the kanban board")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "KANBAN_BIND", default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,

    /// SQLite database file (`:memory:` for a throwaway one)
    #[arg(long, env = "KANBAN_DB", default_value = "kanban.db")]
    pub db: PathBuf,

    /// Directory for rotated log files
    #[arg(long, env = "KANBAN_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Rotate the log file past this many bytes
    #[arg(long, env = "KANBAN_MAX_LOG_BYTES", default_value_t = rolling_logger::DEFAULT_MAX_BYTES)]
    pub max_log_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["board-server"]).unwrap();
        assert_eq!(config.bind.port(), 8787);
        assert_eq!(config.db, PathBuf::from("kanban.db"));
        assert_eq!(config.max_log_bytes, rolling_logger::DEFAULT_MAX_BYTES);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::try_parse_from([
            "board-server",
            "--bind",
            "0.0.0.0:9000",
            "--db",
            ":memory:",
            "--max-log-bytes",
            "1024",
        ])
        .unwrap();
        assert_eq!(config.bind.to_string(), "0.0.0.0:9000");
        assert_eq!(config.db, PathBuf::from(":memory:"));
        assert_eq!(config.max_log_bytes, 1024);
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(ServerConfig::try_parse_from(["board-server", "--bind", "nowhere"]).is_err());
    }
}
