use std::io;

mod cli;
use cli::{parse_cli_mode, run, USAGE};

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if let Err(e) = run(options).await {
        eprintln!("Error: {}", e);
        tracing::error!("Command failed: {}", e);
    }

    Ok(())
}

fn setup_logging() {
    let log_dir = room_availability::storage::config::Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "room-availability.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("room-availability started");
}
