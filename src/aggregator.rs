use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::{Candidate, CoinAnalysis, ScanResult, TokenRecord};
use crate::report;
use crate::scanner::MarketDataProvider;
use crate::strategy::analyze;
use futures::{StreamExt, stream};
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Run one scan: fetch candidates, enrich them, score every record and
/// build the summary.
///
/// Only a failed candidate fetch aborts the scan. Candidates whose details
/// cannot be fetched are logged and left out.
pub async fn scan<P>(provider: &P, config: &ScanConfig) -> Result<ScanResult, ScanError>
where
    P: MarketDataProvider + ?Sized,
{
    info!("Scanning trending coins (limit {})", config.candidate_limit);

    let candidates = provider
        .fetch_candidates(config.candidate_limit)
        .await
        .map_err(|e| {
            error!("Fetching trending candidates failed: {:#}", e);
            ScanError::DataSourceUnavailable(format!("{:#}", e))
        })?;
    let candidates = dedupe(candidates);
    info!("Fetched {} candidates", candidates.len());

    let records = enrich_all(provider, candidates, config.detail_concurrency).await;
    if records.is_empty() {
        info!("No trending coins found");
        return Ok(empty_result());
    }

    let all_analyses: Vec<CoinAnalysis> = records.into_iter().map(analyze).collect();
    let buy_recommendations: Vec<CoinAnalysis> = all_analyses
        .iter()
        .filter(|a| a.advice.is_buy())
        .cloned()
        .collect();
    let summary = report::summarize(&all_analyses, &buy_recommendations);

    info!(
        "Scan finished: {} analyzed, {} buy recommendations",
        all_analyses.len(),
        buy_recommendations.len()
    );
    Ok(ScanResult {
        all_analyses,
        buy_recommendations,
        summary,
    })
}

fn empty_result() -> ScanResult {
    ScanResult {
        all_analyses: Vec::new(),
        buy_recommendations: Vec::new(),
        summary: report::NO_TRENDING_COINS.to_string(),
    }
}

/// Keep the first candidate per address, compared case-insensitively.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.address.to_ascii_lowercase());
            if !fresh {
                debug!("Skipping duplicate candidate {}", c.address);
            }
            fresh
        })
        .collect()
}

/// Fetch details for every candidate with at most `concurrency` requests in
/// flight. Output follows candidate order regardless of completion order.
async fn enrich_all<P>(
    provider: &P,
    candidates: Vec<Candidate>,
    concurrency: usize,
) -> Vec<TokenRecord>
where
    P: MarketDataProvider + ?Sized,
{
    let results: Vec<Option<TokenRecord>> = stream::iter(candidates)
        .map(|candidate| async move {
            match provider.fetch_details(&candidate.address).await {
                Ok(details) => Some(TokenRecord::enrich(candidate, details)),
                Err(e) => {
                    let err = ScanError::DetailFetchFailed {
                        address: candidate.address,
                        reason: format!("{:#}", e),
                    };
                    warn!("{}", err);
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    results.into_iter().flatten().collect()
}
