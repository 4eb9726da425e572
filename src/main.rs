use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use taskdeskd::{config::DaemonConfig, ipc, storage::Storage, AppContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "taskdeskd",
    about = "TaskDesk daemon — chat-driven task management service",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON-RPC WebSocket server port
    #[arg(long, env = "TASKDESK_PORT")]
    port: Option<u16>,

    /// Data directory for config and the SQLite database
    #[arg(long, env = "TASKDESK_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKDESK_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKDESK_BIND")]
    bind_address: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASKDESK_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon server (default when no subcommand given).
    Serve,
}

fn init_tracing(level: &str, log_file: Option<&std::path::Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let file = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "taskdeskd.log".to_string());
            let appender = tracing_appender::rolling::daily(dir, file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(args.port, args.data_dir, args.log, args.bind_address, args.log_file).await,
    }
}

async fn serve(
    port: Option<u16>,
    data_dir: Option<std::path::PathBuf>,
    log: Option<String>,
    bind_address: Option<String>,
    log_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let config = Arc::new(DaemonConfig::new(port, data_dir, log, bind_address));
    init_tracing(&config.log_level, log_file.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        port = config.port,
        "starting taskdeskd"
    );

    let storage = Arc::new(Storage::new(&config.data_dir).await?);
    let ctx = Arc::new(AppContext::new(config, storage));

    ipc::run(ctx).await
}
