use clap::Parser;
use std::sync::Arc;

use monastery_guide::config::{AppState, Config};
use monastery_guide::knowledge::Language;
use monastery_guide::{logger, server};

/// Bilingual keyword guide for the Sikkim monasteries project
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file path without extension (`config` reads `config.toml`)
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog)?;

    let state = Arc::new(AppState::new(cfg)?);
    let feature_count = state.knowledge.features(Language::En).len();
    logger::log_server_start(&addr, &state.config, feature_count);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    let remaining = server::run_server_loop(listener, state, signals).await;
    if remaining > 0 {
        logger::log_warning(&format!(
            "[Shutdown] Exiting with {remaining} connection(s) still open"
        ));
    }
    logger::log_info("[Shutdown] Server stopped");
    Ok(())
}
