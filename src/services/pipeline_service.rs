use tracing::{debug, info, warn};
use crate::services::aggregate_service::summarize_monthly;
use crate::services::chart_service::{build_chart, ChartSink};
use crate::services::price_service::{PriceRequest, PriceSource};
use crate::utils::{PipelineError, Table};

/// What a successful run processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    pub days: usize,
    pub months: usize,
}

/// Fetch daily prices, summarize them per month and render the chart.
///
/// Any stage failure aborts the run; nothing is retried.
pub async fn run_pipeline<S, K>(
    source: &S,
    request: &PriceRequest,
    subject: &str,
    sink: &mut K,
) -> Result<PipelineReport, PipelineError>
where
    S: PriceSource + ?Sized,
    K: ChartSink + ?Sized,
{
    info!(
        "📈 Fetching {} daily prices from {} to {}",
        request.ticker, request.start, request.end
    );
    let prices = source.fetch(request).await?;

    let summaries = summarize_monthly(&prices);
    info!("Summarized {} days into {} months", prices.len(), summaries.len());
    debug!("Monthly opens for {}:\n{}", request.ticker, Table::from_summaries(&summaries).render());

    let chart = build_chart(&summaries, subject);
    if chart.is_empty() {
        warn!("No daily prices returned for {}, chart will be empty", request.ticker);
    }
    sink.render(&chart)?;

    Ok(PipelineReport {
        days: prices.len(),
        months: summaries.len(),
    })
}
