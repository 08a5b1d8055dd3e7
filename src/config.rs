use log::warn;

pub const DEFAULT_ZORA_API_URL: &str = "https://api-sdk.zora.engineering";

#[derive(Debug, Clone)]
pub struct Config {
    pub zora_api_key: Option<String>,
    pub zora_api_url: String,
    pub scan: ScanConfig,
}

/// Tuning for a single scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Number of candidates requested from the provider
    pub candidate_limit: usize,

    /// Maximum detail requests in flight at once
    pub detail_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 20,   // top 20 gainers
            detail_concurrency: 4, // parallel detail lookups
        }
    }
}

impl ScanConfig {
    /// Apply a candidate limit from the command line. Zero is rejected the
    /// same way `SCAN_LIMIT=0` is, keeping the current value.
    pub fn override_candidate_limit(&mut self, limit: Option<usize>) {
        match limit {
            Some(0) => warn!("Ignoring candidate limit 0, keeping {}", self.candidate_limit),
            Some(n) => self.candidate_limit = n,
            None => {}
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScanConfig::default();
        let parse_count = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };

        Config {
            zora_api_key: lookup("ZORA_API_KEY").filter(|k| !k.trim().is_empty()),
            zora_api_url: lookup("ZORA_API_URL")
                .unwrap_or_else(|| DEFAULT_ZORA_API_URL.to_string()),
            scan: ScanConfig {
                candidate_limit: parse_count("SCAN_LIMIT", defaults.candidate_limit),
                detail_concurrency: parse_count("SCAN_CONCURRENCY", defaults.detail_concurrency),
            },
        }
    }
}
