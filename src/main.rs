use std::sync::Arc;
use tokio::sync::Notify;

use coiserve::config::{AppState, Config};
use coiserve::{logger, server};

const USAGE: &str = "Usage: coiserve [port]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port_override = match parse_args(std::env::args().skip(1)) {
        Ok(port) => port,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let mut cfg = Config::load()?;
    if let Some(port) = port_override {
        cfg.server.port = port;
    }

    logger::init(&cfg)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let port = cfg.server.port;

    // Bind failure is fatal: surface the io::Error and exit non-zero.
    let listener = server::listener::bind(addr)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    let state = Arc::new(AppState::new(cfg));
    let shutdown = Arc::new(Notify::new());
    server::signal::spawn_signal_listener(Arc::clone(&shutdown));

    logger::log_server_start(port);

    server::serve(listener, state, shutdown).await?;

    logger::log_server_stop();
    Ok(())
}

/// Parse the optional positional port argument.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<u16>, String> {
    let Some(first) = args.next() else {
        return Ok(None);
    };

    if args.next().is_some() {
        return Err("Too many arguments".to_string());
    }

    match first.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535".to_string()),
        Ok(port) => Ok(Some(port)),
        Err(_) => Err(format!("Invalid port '{first}'")),
    }
}
