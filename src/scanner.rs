use crate::models::{Candidate, CoinDetails};
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Source of token candidates and their market details.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch up to `limit` trending candidates.
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>>;

    /// Fetch market details for one candidate address.
    async fn fetch_details(&self, address: &str) -> Result<CoinDetails>;
}

// Zora API structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExploreResponse {
    explore_list: Option<ExploreList>,
}

#[derive(Debug, Deserialize)]
struct ExploreList {
    #[serde(default)]
    edges: Vec<ExploreEdge>,
}

#[derive(Debug, Deserialize)]
struct ExploreEdge {
    node: ZoraCoin,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinResponse {
    zora20_token: Option<ZoraCoin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ZoraCoin {
    address: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
    description: Option<String>,
    total_supply: Option<Value>,
    market_cap: Option<Value>,
    market_cap_delta_24h: Option<Value>,
    volume_24h: Option<Value>,
    unique_holders: Option<Value>,
    created_at: Option<String>,
    token_price: Option<TokenPrice>,
    creator_profile: Option<CreatorProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TokenPrice {
    price_in_usdc: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreatorProfile {
    social_accounts: Option<SocialAccounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SocialAccounts {
    twitter: Option<SocialAccount>,
    telegram: Option<SocialAccount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SocialAccount {
    username: Option<String>,
}

// The API mixes JSON numbers and numeric strings.
fn value_f64(v: &Option<Value>) -> Option<f64> {
    match v.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_string(v: &Option<Value>) -> Option<String> {
    match v.as_ref()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 24h change in percent, derived from the market cap and its absolute 24h delta.
fn percent_change(market_cap: Option<f64>, delta: Option<f64>) -> Option<f64> {
    let (cap, delta) = (market_cap?, delta?);
    let previous = cap - delta;
    (previous > 0.0).then(|| delta / previous * 100.0)
}

impl From<ZoraCoin> for Candidate {
    fn from(c: ZoraCoin) -> Self {
        Candidate {
            address: c.address.unwrap_or_default(),
            market_cap: value_f64(&c.market_cap),
            volume_24h: value_f64(&c.volume_24h),
            unique_holders: value_f64(&c.unique_holders).map(|h| h.max(0.0) as u64),
            total_supply: value_string(&c.total_supply),
            created_at: c
                .created_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc)),
            name: c.name,
            symbol: c.symbol,
        }
    }
}

impl From<ZoraCoin> for CoinDetails {
    fn from(c: ZoraCoin) -> Self {
        let market_cap = value_f64(&c.market_cap);
        let socials = c
            .creator_profile
            .and_then(|p| p.social_accounts)
            .unwrap_or_default();

        CoinDetails {
            price: c.token_price.and_then(|p| value_f64(&p.price_in_usdc)),
            price_change_24h: percent_change(market_cap, value_f64(&c.market_cap_delta_24h)),
            volume_24h: value_f64(&c.volume_24h),
            market_cap,
            holders: value_f64(&c.unique_holders).map(|h| h.max(0.0) as u64),
            description: c.description,
            website: None,
            twitter: socials
                .twitter
                .and_then(|a| a.username)
                .map(|u| format!("https://twitter.com/{}", u)),
            telegram: socials
                .telegram
                .and_then(|a| a.username)
                .map(|u| format!("https://t.me/{}", u)),
        }
    }
}

/// HTTP client for the Zora coins API.
#[derive(Clone)]
pub struct ZoraClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ZoraClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("zora-trend-scanner/0.1")
            .build()
            .context("building HTTP client")?;

        Ok(ZoraClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url).query(query);
        if let Some(k) = &self.api_key {
            req = req.header("api-key", k);
        }

        let resp = req.send().await.with_context(|| format!("GET {}", url))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("GET {} returned {}", url, status);
        }
        let body = resp.text().await?;
        debug!("[zora] GET {} -> {} bytes", url, body.len());
        serde_json::from_str(&body).with_context(|| format!("decoding response from {}", url))
    }
}

#[async_trait]
impl MarketDataProvider for ZoraClient {
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
        let resp: ExploreResponse = self
            .get_json(
                "/explore",
                &[("listType", "TOP_GAINERS".to_string()), ("count", limit.to_string())],
            )
            .await?;

        let candidates = resp
            .explore_list
            .map(|l| l.edges)
            .unwrap_or_default()
            .into_iter()
            .map(|e| Candidate::from(e.node))
            .filter(|c| !c.address.is_empty())
            .take(limit)
            .collect();
        Ok(candidates)
    }

    async fn fetch_details(&self, address: &str) -> Result<CoinDetails> {
        let resp: CoinResponse = self
            .get_json(
                "/coin",
                &[("address", address.to_string()), ("chain", "8453".to_string())],
            )
            .await?;
        resp.zora20_token
            .map(CoinDetails::from)
            .ok_or_else(|| anyhow!("coin {} not found", address))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureEntry {
    #[serde(flatten)]
    candidate: Candidate,
    #[serde(default)]
    details: Option<CoinDetails>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureFile {
    candidates: Vec<FixtureEntry>,
}

/// Deterministic provider backed by a JSON document. Entries without
/// `details` fail enrichment.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    entries: Vec<FixtureEntry>,
}

impl FixtureProvider {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(json).context("parsing fixture")?;
        Ok(FixtureProvider {
            entries: file.candidates,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl MarketDataProvider for FixtureProvider {
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
        Ok(self
            .entries
            .iter()
            .take(limit)
            .map(|e| e.candidate.clone())
            .collect())
    }

    async fn fetch_details(&self, address: &str) -> Result<CoinDetails> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.candidate.address.eq_ignore_ascii_case(address))
            .ok_or_else(|| anyhow!("unknown address {}", address))?;
        entry
            .details
            .clone()
            .ok_or_else(|| anyhow!("no details recorded for {}", address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zora_coin_parses_string_numbers() {
        let node: ZoraCoin = serde_json::from_value(json!({
            "address": "0xAbC",
            "name": "Sample",
            "symbol": "SMP",
            "totalSupply": "1000000000",
            "marketCap": "1,200,000",
            "marketCapDelta24h": "200000",
            "volume24h": 45000,
            "uniqueHolders": 321,
            "createdAt": "2025-05-01T12:00:00Z",
            "tokenPrice": { "priceInUsdc": "0.0012" },
            "creatorProfile": { "socialAccounts": { "twitter": { "username": "sample" } } }
        }))
        .unwrap();

        let candidate = Candidate::from(node.clone());
        assert_eq!(candidate.address, "0xAbC");
        assert_eq!(candidate.market_cap, Some(1_200_000.0));
        assert_eq!(candidate.unique_holders, Some(321));
        assert_eq!(candidate.total_supply.as_deref(), Some("1000000000"));
        assert!(candidate.created_at.is_some());

        let details = CoinDetails::from(node);
        assert_eq!(details.price, Some(0.0012));
        assert_eq!(details.price_change_24h, Some(20.0));
        assert_eq!(details.volume_24h, Some(45_000.0));
        assert_eq!(details.twitter.as_deref(), Some("https://twitter.com/sample"));
        assert!(details.telegram.is_none());
    }

    #[test]
    fn percent_change_needs_positive_base() {
        assert_eq!(percent_change(Some(100.0), Some(100.0)), None);
        assert_eq!(percent_change(Some(50.0), Some(-50.0)), Some(-50.0));
        assert_eq!(percent_change(None, Some(1.0)), None);
    }

    #[tokio::test]
    async fn fixture_provider_limits_and_fails_missing_details() {
        let provider = FixtureProvider::from_json(
            r#"{"candidates": [
                {"address": "0xA1", "symbol": "AAA", "details": {"price": 0.5}},
                {"address": "0xB2", "symbol": "BBB"},
                {"address": "0xC3", "symbol": "CCC", "details": {}}
            ]}"#,
        )
        .unwrap();

        let candidates = provider.fetch_candidates(2).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].symbol.as_deref(), Some("BBB"));

        assert_eq!(provider.fetch_details("0xa1").await.unwrap().price, Some(0.5));
        assert!(provider.fetch_details("0xB2").await.is_err());
        assert!(provider.fetch_details("0xFF").await.is_err());
    }
}
