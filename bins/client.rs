use std::process::ExitCode;

use clap::Parser;
use client::Cli;
use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env first so RUST_LOG, CONFIG_PATH and AUTH_API_BASE_URL apply
    dotenv().ok();

    let config = cli.load_config();
    let format = config.as_ref().map(|c| LogFormat::parse(&c.logging.format)).unwrap_or_default();
    init_logging(format);
    info!(service = "client", event = "logger_init", ?format, "tracing subscriber initialized");

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "client", event = "panic", %instance_id, pid, message = %info, "unhandled panic occurred");
    }));

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "client", event = "config_invalid", error = %e, "failed to load config");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "client", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "client", event = "start", %instance_id, pid, version, base_url = %config.api.base_url, "client starting");

    rt.block_on(async move {
        tokio::select! {
            res = client::run(config, cli.command) => match res {
                Ok(report) => {
                    println!("{report}");
                    info!(service = "client", event = "stop", %instance_id, success = report.success, "client finished");
                    if report.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
                }
                Err(e) => {
                    error!(service = "client", event = "run_failed", error = %e, "client::run returned error");
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "client", event = "shutdown_signal", %instance_id, "received Ctrl+C, aborting");
                ExitCode::FAILURE
            }
        }
    })
}
