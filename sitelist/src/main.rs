//! sitelist Entry Point

use anyhow::Context;
use clap::Parser;
use sitelist::cli::Cli;
use sitelist::config::SyncConfig;
use sitelist::{logging, sync};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse CLI (only -h/--help and -V/--version)
    let _cli = Cli::parse();

    let guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Sync failed");
            eprintln!("Error: {:#}", e);
            1
        }
    };

    // ファイル出力を確実にフラッシュしてから終了する
    drop(guard);
    std::process::exit(code);
}

async fn run() -> anyhow::Result<()> {
    info!("sitelist v{}", env!("CARGO_PKG_VERSION"));

    let config = SyncConfig::from_env().context("failed to load configuration")?;
    let outcome = sync::run(&config).await.context("sync failed")?;

    println!("已生成 {} 个站点", outcome.report.written);
    Ok(())
}
