//! `dashboard` and `history` commands.
use crate::aggregation::{summarize, summarize_parallel};
use crate::cli::OutputFormat;
use crate::config::TriagemapConfig;
use crate::history::history_rows;
use crate::report::{to_json, Reporter};
use crate::store::PredictionRepository;
use anyhow::Result;

pub fn handle_dashboard<S: PredictionRepository>(
    config: &TriagemapConfig,
    reporter: &Reporter,
    store: &S,
    top: Option<usize>,
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let records = store.all()?;
    let top_n = top.unwrap_or(config.dashboard.top_n);
    let summary = if parallel {
        summarize_parallel(&records, top_n)
    } else {
        summarize(&records, top_n)
    };
    log::debug!("Summarized {} predictions", summary.total);

    match format {
        OutputFormat::Json => println!("{}", to_json(&summary)?),
        OutputFormat::Terminal => print!("{}", reporter.dashboard(&summary)),
    }
    Ok(())
}

pub fn handle_history<S: PredictionRepository>(
    config: &TriagemapConfig,
    reporter: &Reporter,
    store: &S,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let limit = limit.unwrap_or(config.dashboard.history_limit);
    let rows = history_rows(&store.all()?, limit);

    match format {
        OutputFormat::Json => println!("{}", to_json(&rows)?),
        OutputFormat::Terminal => print!("{}", reporter.history(&rows)),
    }
    Ok(())
}
