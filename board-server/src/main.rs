use clap::Parser;

use board_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    let mut log_config = rolling_logger::LoggerConfig::new(&config.log_dir, "board-server");
    log_config.max_bytes = config.max_log_bytes;
    match rolling_logger::init_with(log_config) {
        Ok(handle) => tracing::info!(path = %handle.log_path().display(), "logging to file"),
        Err(e) => eprintln!("failed to start logger: {}", e),
    }

    if let Err(e) = board_server::run(config).await {
        let _ = rolling_logger::error(&e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
