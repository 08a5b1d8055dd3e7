#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Candidate list could not be fetched. Fatal to the scan.
    #[error("market data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// Enrichment of a single candidate failed. The candidate is dropped.
    #[error("failed to fetch details for {address}: {reason}")]
    DetailFetchFailed { address: String, reason: String },
}
