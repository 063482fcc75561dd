use tracing::{info, error};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

mod api;
mod models;
mod services;
mod utils;

use api::yahoo::YahooClient;
use services::chart_service::PngChartSink;
use services::pipeline_service::run_pipeline;
use services::price_service::PriceRequest;
use utils::{Config, PipelineError};

async fn run(config: &Config) -> Result<(), PipelineError> {
    let request = PriceRequest::parse(&config.ticker, &config.start, &config.end)?;
    let client = YahooClient::new();
    let mut sink = PngChartSink::new(&config.output, config.width, config.height);

    let report = run_pipeline(&client, &request, &config.subject, &mut sink).await?;
    info!(
        "Chart of {} months ({} days) saved to {}",
        report.months,
        report.days,
        sink.path().display()
    );

    println!("Monthly {} prices retrieved and visualized successfully.", config.subject);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = match "monthly_open=debug".parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🚀 Starting monthly-open...");

    let config = Config::from_env()?;

    if let Err(e) = run(&config).await {
        error!("Run failed: {}", e);
        return Err(e);
    }

    Ok(())
}
