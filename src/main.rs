//! Payroll engine HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::service::PayrollServices;

/// Payroll period and payslip service.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding service.yaml, periods.yaml and salaries.yaml.
    #[arg(short, long, default_value = "./config")]
    config: PathBuf,

    /// Address to listen on. Overrides the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let service = loader.config().service().clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| service.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = loader.seed_store().context("seeding payroll store")?;
    info!(
        service = %service.name,
        periods = loader.config().periods().len(),
        salary_rows = loader.config().salaries().len(),
        "configuration loaded"
    );

    let state = AppState::new(PayrollServices::new(Arc::new(store)));
    let router = create_router(state);

    let bind_address = args.bind.unwrap_or(service.bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;
    info!(address = %bind_address, "payroll engine listening");

    axum::serve(listener, router).await.context("serving HTTP")?;
    Ok(())
}
